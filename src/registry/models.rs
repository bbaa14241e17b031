/// Data models for commands and their gesture bindings

use crate::core::Gesture;
use serde::{Deserialize, Serialize};

/// A named action the application can run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    id: String,
    pub description: String,
}

impl Command {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }

    /// The id never changes once the command exists
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.id, self.description)
    }
}

/// A command together with every gesture bound to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureCommand {
    pub command: Command,
    pub gestures: Vec<Gesture>,
}

impl GestureCommand {
    pub fn new(command: Command, gesture: Gesture) -> Self {
        Self {
            command,
            gestures: vec![gesture],
        }
    }

    pub fn with_gestures(command: Command, gestures: Vec<Gesture>) -> Self {
        Self { command, gestures }
    }

    pub fn command_id(&self) -> &str {
        self.command.id()
    }

    pub fn description(&self) -> &str {
        &self.command.description
    }

    /// Check whether this command owns `gesture_string`
    pub fn has_gesture(&self, gesture_string: &str) -> bool {
        self.gestures
            .iter()
            .any(|g| g.gesture_string() == gesture_string)
    }

    /// Gesture strings in binding order
    pub fn gesture_strings(&self) -> Vec<String> {
        self.gestures.iter().map(Gesture::gesture_string).collect()
    }

    /// Remove the first binding matching `gesture_string`.
    ///
    /// Returns whether anything was removed.
    pub(crate) fn detach(&mut self, gesture_string: &str) -> bool {
        match self
            .gestures
            .iter()
            .position(|g| g.gesture_string() == gesture_string)
        {
            Some(index) => {
                self.gestures.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every binding matching `gesture_string`, returning how many went
    pub(crate) fn detach_all(&mut self, gesture_string: &str) -> usize {
        let before = self.gestures.len();
        self.gestures.retain(|g| g.gesture_string() != gesture_string);
        before - self.gestures.len()
    }
}
