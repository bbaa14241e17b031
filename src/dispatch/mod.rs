/// Dispatch module
///
/// Runs recognition plus registry lookup for a captured trace and publishes
/// the outcome to subscribed observers.

pub mod dispatcher;
pub mod events;

pub use dispatcher::{GestureDispatcher, HANDLER_FORCE_DEFAULT, HANDLER_OVERWRITE_DEFAULT};
pub use events::{CommandMatched, GestureUnmatched, Observers, Outcome};
