/// Error types for gesture-commands
///
/// Every failure the recognizer, the command catalog or the gesture registry
/// can report. Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for gesture-commands operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GestureError {
    /// Empty point trace, too few points, blank ids or gesture strings
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Command id is not in the command catalog
    #[error("Unknown '{0}' command!")]
    UnknownCommand(String),

    /// Command id is known to the catalog but has no gesture binding
    #[error("Command '{0}' not found!")]
    CommandNotFound(String),

    /// A second entry for the same command id
    #[error("Command '{0}' already exists!")]
    DuplicateCommand(String),

    /// Gesture already bound to some command
    #[error("Provided gesture '{0}' is already in use!")]
    GestureInUse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for gesture-commands operations
pub type Result<T> = std::result::Result<T, GestureError>;

/// Convert GestureError to a user-friendly error message
impl GestureError {
    pub fn user_message(&self) -> String {
        match self {
            GestureError::InvalidInput(reason) => {
                format!("Gesture could not be read: {}", reason)
            }
            GestureError::UnknownCommand(id) => {
                format!("There is no command called '{}'", id)
            }
            GestureError::CommandNotFound(id) => {
                format!("Command '{}' has no gesture yet. Bind one first.", id)
            }
            GestureError::DuplicateCommand(id) => {
                format!("Command '{}' is already registered", id)
            }
            GestureError::GestureInUse(gesture) => {
                format!(
                    "Gesture '{}' is already taken. Use force to move it here.",
                    gesture
                )
            }
            GestureError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
        }
    }
}
