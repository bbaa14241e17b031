// Gesture dispatcher
//
// Trace in, notification out. Recognize the trace, look the gesture up, and
// tell whoever is listening whether it hit a command. Also the handler-level
// API for binding gestures straight from captured traces.

use super::events::{CommandMatched, GestureUnmatched, Observers, Outcome};
use crate::config::AppConfig;
use crate::core::{Gesture, GestureRecognizer, Point};
use crate::error::Result;
use crate::registry::{Command, CommandCatalog, CommandStore, GestureRegistry};
use std::collections::BTreeMap;
use tracing::{debug, warn};

// Rebinding from a drawn trace steals the gesture unless told otherwise.
// The registry itself defaults to not forcing.
pub const HANDLER_FORCE_DEFAULT: bool = true;
pub const HANDLER_OVERWRITE_DEFAULT: bool = true;

pub struct GestureDispatcher<C: CommandCatalog = CommandStore> {
    recognizer: GestureRecognizer,
    registry: GestureRegistry<C>,
    observers: Observers,
}

impl Default for GestureDispatcher<CommandStore> {
    fn default() -> Self {
        Self::new(GestureRecognizer::default(), GestureRegistry::default())
    }
}

impl GestureDispatcher<CommandStore> {
    /// Build a dispatcher with the configured recognizer and command seeds.
    ///
    /// Each seed's first gesture creates its binding and the rest extend it,
    /// so a gesture listed twice anywhere is a `GestureInUse` error.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.recognizer.validate()?;

        let mut registry: GestureRegistry = GestureRegistry::default();
        for seed in config.seeds() {
            registry
                .catalog_mut()
                .add(Command::new(seed.id.as_str(), seed.description.as_str()))?;

            let mut gestures = seed.gestures.iter();
            if let Some(first) = gestures.next() {
                registry.add(&seed.id, first)?;
            }
            for gesture in gestures {
                registry.add_gesture(&seed.id, gesture, false)?;
            }
        }

        debug!(commands = registry.len(), "dispatcher seeded");
        Ok(Self::new(
            GestureRecognizer::new(config.recognizer.clone()),
            registry,
        ))
    }
}

impl<C: CommandCatalog> GestureDispatcher<C> {
    pub fn new(recognizer: GestureRecognizer, registry: GestureRegistry<C>) -> Self {
        Self {
            recognizer,
            registry,
            observers: Observers::default(),
        }
    }

    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    pub fn registry(&self) -> &GestureRegistry<C> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut GestureRegistry<C> {
        &mut self.registry
    }

    /// Subscribe to "command matched" notifications
    pub fn on_matched(&mut self, observer: impl FnMut(&CommandMatched) + 'static) {
        self.observers.on_matched(observer);
    }

    /// Subscribe to "gesture unrecognized" notifications
    pub fn on_unmatched(&mut self, observer: impl FnMut(&GestureUnmatched) + 'static) {
        self.observers.on_unmatched(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Drop every subscriber on both channels
    pub fn clear_observers(&mut self) {
        debug!(observers = self.observers.len(), "clearing observers");
        self.observers.clear();
    }

    /// Recognize a trace and resolve it to a command.
    ///
    /// An unbound gesture is a normal `Unmatched` outcome. The only errors
    /// come from recognition itself (too few points, no movement). Exactly
    /// one channel is notified, inline, before this returns.
    pub fn dispatch(&mut self, points: &[Point]) -> Result<Outcome> {
        let gesture = self.recognizer.recognize(points)?;
        let gesture_string = gesture.gesture_string();

        if gesture.is_empty() {
            warn!(points = points.len(), "trace produced an empty gesture");
        }

        let outcome = match self.registry.lookup_by_gesture(&gesture) {
            Some(entry) => Outcome::Matched(CommandMatched {
                command_id: entry.command_id().to_string(),
                gesture: gesture_string,
            }),
            None => Outcome::Unmatched(GestureUnmatched {
                gesture: gesture_string,
            }),
        };

        debug!(
            gesture = outcome.gesture(),
            command = outcome.command_id().unwrap_or("-"),
            "dispatched gesture"
        );
        self.observers.publish(&outcome);

        Ok(outcome)
    }

    // ---- binding from traces ----

    fn recognize(&self, points: &[Point]) -> Result<Gesture> {
        self.recognizer.recognize(points)
    }

    /// Create a command's first binding from a drawn trace
    pub fn add_gesture_command(&mut self, command_id: &str, points: &[Point]) -> Result<()> {
        let gesture = self.recognize(points)?;
        self.registry.add(command_id, &gesture.gesture_string())
    }

    /// Create a command's first binding from a gesture string
    pub fn add_gesture_command_str(&mut self, command_id: &str, gesture_string: &str) -> Result<()> {
        self.registry.add(command_id, gesture_string)
    }

    /// Rebind from a trace with the handler defaults (overwrite, force)
    pub fn update_gesture_command(&mut self, command_id: &str, points: &[Point]) -> Result<()> {
        self.update_gesture_command_with(
            command_id,
            points,
            HANDLER_OVERWRITE_DEFAULT,
            HANDLER_FORCE_DEFAULT,
        )
    }

    pub fn update_gesture_command_with(
        &mut self,
        command_id: &str,
        points: &[Point],
        overwrite: bool,
        force: bool,
    ) -> Result<()> {
        let gesture = self.recognize(points)?;
        self.registry
            .update_gesture(command_id, &gesture, overwrite, force)
    }

    pub fn remove_gesture_command(&mut self, command_id: &str) -> Result<()> {
        self.registry.remove(command_id)
    }

    /// Bind one more gesture from a trace, forcing by default
    pub fn add_gesture_to_command(&mut self, command_id: &str, points: &[Point]) -> Result<()> {
        self.add_gesture_to_command_with(command_id, points, HANDLER_FORCE_DEFAULT)
    }

    pub fn add_gesture_to_command_with(
        &mut self,
        command_id: &str,
        points: &[Point],
        force: bool,
    ) -> Result<()> {
        let gesture = self.recognize(points)?;
        self.registry
            .add_gesture(command_id, &gesture.gesture_string(), force)
    }

    pub fn remove_gesture_from_command(&mut self, command_id: &str, points: &[Point]) -> Result<()> {
        let gesture = self.recognize(points)?;
        self.registry
            .remove_gesture(command_id, &gesture.gesture_string())
    }

    /// Gesture string -> command description, for help screens
    pub fn gestures_info(&self) -> BTreeMap<String, String> {
        self.registry.list_gestures()
    }
}
