/// gesture-commands library
///
/// Recognize directional mouse gestures and resolve them to named commands.

pub mod config;
pub mod core;
pub mod dispatch;
pub mod error;
pub mod registry;

// Re-exports for convenience
pub use config::{AppConfig, RecognizerConfig, SegmentMode};
pub use core::{Gesture, GestureRecognizer, Point, Symbol};
pub use dispatch::{GestureDispatcher, Outcome};
pub use error::{GestureError, Result};
pub use registry::{Command, CommandCatalog, CommandStore, GestureCommand, GestureRegistry};
