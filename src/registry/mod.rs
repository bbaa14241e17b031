/// Registry module
///
/// The command catalog and the gesture bindings that point into it.

pub mod commands;
pub mod gestures;
pub mod models;

pub use commands::{CommandCatalog, CommandStore};
pub use gestures::GestureRegistry;
pub use models::{Command, GestureCommand};
