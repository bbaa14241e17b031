// The command catalog
//
// Plain list of what the app can do. The gesture registry asks it
// "does this command exist?" before binding anything.

use super::models::Command;
use crate::error::{GestureError, Result};
use tracing::debug;

/// Lookup and edit access to the set of known commands
pub trait CommandCatalog {
    fn has(&self, command_id: &str) -> bool;
    fn get(&self, command_id: &str) -> Option<&Command>;
    fn add(&mut self, command: Command) -> Result<()>;
    fn update(&mut self, command_id: &str, description: &str);
    fn remove(&mut self, command_id: &str);
}

/// In-memory catalog, keeps insertion order
#[derive(Debug, Default, Clone)]
pub struct CommandStore {
    commands: Vec<Command>,
}

impl CommandStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    // "<id> - <description>" for every command
    pub fn commands_info(&self) -> Vec<String> {
        self.commands.iter().map(|c| c.to_string()).collect()
    }
}

impl CommandCatalog for CommandStore {
    fn has(&self, command_id: &str) -> bool {
        self.commands.iter().any(|c| c.id() == command_id)
    }

    fn get(&self, command_id: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.id() == command_id)
    }

    fn add(&mut self, command: Command) -> Result<()> {
        if command.id().trim().is_empty() {
            return Err(GestureError::InvalidInput("command id is empty".to_string()));
        }
        if self.has(command.id()) {
            return Err(GestureError::DuplicateCommand(command.id().to_string()));
        }

        debug!(command = command.id(), "command added to catalog");
        self.commands.push(command);
        Ok(())
    }

    // Unknown ids are ignored
    fn update(&mut self, command_id: &str, description: &str) {
        if let Some(cmd) = self.commands.iter_mut().find(|c| c.id() == command_id) {
            cmd.description = description.to_string();
        }
    }

    // Unknown ids are ignored
    fn remove(&mut self, command_id: &str) {
        self.commands.retain(|c| c.id() != command_id);
    }
}
