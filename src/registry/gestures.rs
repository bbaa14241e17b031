// Gesture -> command bindings
//
// One rule above all: a gesture string belongs to at most one command.
// Every operation checks everything first and only then touches state, so a
// failed call never leaves a half-applied change behind.

use super::commands::{CommandCatalog, CommandStore};
use super::models::{Command, GestureCommand};
use crate::core::Gesture;
use crate::error::{GestureError, Result};
use std::collections::BTreeMap;
use tracing::{debug, info};

pub struct GestureRegistry<C: CommandCatalog = CommandStore> {
    catalog: C,
    entries: Vec<GestureCommand>,
}

impl Default for GestureRegistry<CommandStore> {
    fn default() -> Self {
        Self::new(CommandStore::new())
    }
}

impl<C: CommandCatalog> GestureRegistry<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            entries: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Edit the command catalog. Bindings already made keep the command
    /// snapshot taken at bind time; listings read descriptions live.
    pub fn catalog_mut(&mut self) -> &mut C {
        &mut self.catalog
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GestureCommand> {
        self.entries.iter()
    }

    // ---- lookups ----

    pub fn lookup_by_id(&self, command_id: &str) -> Option<&GestureCommand> {
        self.entries.iter().find(|e| e.command_id() == command_id)
    }

    /// Exact match on the gesture string, no prefix matching
    pub fn lookup_by_gesture(&self, gesture: &Gesture) -> Option<&GestureCommand> {
        self.lookup_by_gesture_str(&gesture.gesture_string())
    }

    pub fn lookup_by_gesture_str(&self, gesture_string: &str) -> Option<&GestureCommand> {
        self.entries.iter().find(|e| e.has_gesture(gesture_string))
    }

    /// True when no command has `gesture_string` bound
    pub fn is_gesture_available(&self, gesture_string: &str) -> bool {
        self.owner_index(gesture_string).is_none()
    }

    // ---- binding ----

    /// Create the first binding for a command.
    ///
    /// Fails with `UnknownCommand` if the catalog doesn't know the id,
    /// `DuplicateCommand` if it is already registered, and `GestureInUse`
    /// if another command owns the gesture.
    pub fn add(&mut self, command_id: &str, gesture_string: &str) -> Result<()> {
        validate_gesture_string(gesture_string)?;
        let command = self.resolve(command_id)?;
        self.insert(GestureCommand::new(command, Gesture::from(gesture_string)))
    }

    /// Same as [`add`](Self::add) starting from a command value
    pub fn add_command(&mut self, command: &Command, gesture: Gesture) -> Result<()> {
        validate_gesture_string(&gesture.gesture_string())?;
        let command = self.resolve(command.id())?;
        self.insert(GestureCommand::new(command, gesture))
    }

    /// Register a prebuilt entry. Every one of its gestures must be free.
    pub fn insert(&mut self, entry: GestureCommand) -> Result<()> {
        if !self.catalog.has(entry.command_id()) {
            return Err(GestureError::UnknownCommand(entry.command_id().to_string()));
        }
        if self.entry_index(entry.command_id()).is_some() {
            return Err(GestureError::DuplicateCommand(entry.command_id().to_string()));
        }
        if entry.gestures.is_empty() {
            return Err(GestureError::InvalidInput(format!(
                "command '{}' needs at least one gesture",
                entry.command_id()
            )));
        }

        for (i, gesture) in entry.gestures.iter().enumerate() {
            let gesture_string = gesture.gesture_string();
            validate_gesture_string(&gesture_string)?;

            let repeated = entry.gestures[..i].contains(gesture);
            if repeated || !self.is_gesture_available(&gesture_string) {
                return Err(GestureError::GestureInUse(gesture_string));
            }
        }

        debug!(
            command = entry.command_id(),
            gestures = ?entry.gesture_strings(),
            "gesture command registered"
        );
        self.entries.push(entry);
        Ok(())
    }

    /// Bind one more gesture to an already registered command.
    ///
    /// With `force`, whichever command currently owns the gesture (this one
    /// included) loses it first.
    pub fn add_gesture(&mut self, command_id: &str, gesture_string: &str, force: bool) -> Result<()> {
        validate_gesture_string(gesture_string)?;
        self.require_known(command_id)?;
        let target = self.require_entry(command_id)?;

        if let Some(owner) = self.owner_index(gesture_string) {
            if !force {
                return Err(GestureError::GestureInUse(gesture_string.to_string()));
            }
            self.evict(owner, gesture_string);
        }

        self.entries[target]
            .gestures
            .push(Gesture::from(gesture_string));
        debug!(command = command_id, gesture = gesture_string, "gesture bound");
        Ok(())
    }

    /// Rebind a registered command.
    ///
    /// A gesture owned by a *different* command is an error unless `force`,
    /// in which case that command loses it. Then `overwrite` replaces the
    /// whole gesture list; otherwise the gesture is appended without any
    /// same-command duplicate check.
    pub fn update(
        &mut self,
        command_id: &str,
        gesture_string: &str,
        overwrite: bool,
        force: bool,
    ) -> Result<()> {
        validate_gesture_string(gesture_string)?;
        self.require_known(command_id)?;
        let target = self.require_entry(command_id)?;

        let other_owner = self
            .owner_index(gesture_string)
            .filter(|&owner| owner != target);
        if let Some(owner) = other_owner {
            if !force {
                return Err(GestureError::GestureInUse(gesture_string.to_string()));
            }
            self.evict(owner, gesture_string);
        }

        let gesture = Gesture::from(gesture_string);
        let entry = &mut self.entries[target];
        if overwrite {
            entry.gestures = vec![gesture];
        } else {
            entry.gestures.push(gesture);
        }

        debug!(
            command = command_id,
            gesture = gesture_string,
            overwrite,
            "gesture command updated"
        );
        Ok(())
    }

    pub fn update_gesture(
        &mut self,
        command_id: &str,
        gesture: &Gesture,
        overwrite: bool,
        force: bool,
    ) -> Result<()> {
        self.update(command_id, &gesture.gesture_string(), overwrite, force)
    }

    // ---- removal ----

    /// Unbind one gesture. A gesture the command doesn't have is a no-op.
    pub fn remove_gesture(&mut self, command_id: &str, gesture_string: &str) -> Result<()> {
        let target = self.require_entry(command_id)?;

        if self.entries[target].detach(gesture_string) {
            debug!(command = command_id, gesture = gesture_string, "gesture unbound");
        }
        Ok(())
    }

    /// Drop a command's entry along with all of its gestures
    pub fn remove(&mut self, command_id: &str) -> Result<()> {
        if command_id.trim().is_empty() {
            return Err(GestureError::InvalidInput("command id is empty".to_string()));
        }
        let target = self.require_entry(command_id)?;

        self.entries.remove(target);
        debug!(command = command_id, "gesture command removed");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // ---- listings ----

    /// Every bound gesture with the description of its command
    pub fn list_gestures(&self) -> BTreeMap<String, String> {
        let mut info = BTreeMap::new();

        for entry in &self.entries {
            let description = self.describe(entry);
            for gesture in &entry.gestures {
                info.insert(gesture.gesture_string(), description.clone());
            }
        }

        info
    }

    /// Every registered command with its gesture strings, in binding order
    pub fn list_commands(&self) -> BTreeMap<String, Vec<String>> {
        self.entries
            .iter()
            .map(|e| (e.command_id().to_string(), e.gesture_strings()))
            .collect()
    }

    // ---- helpers ----

    fn resolve(&self, command_id: &str) -> Result<Command> {
        self.catalog
            .get(command_id)
            .cloned()
            .ok_or_else(|| GestureError::UnknownCommand(command_id.to_string()))
    }

    fn require_known(&self, command_id: &str) -> Result<()> {
        if self.catalog.has(command_id) {
            Ok(())
        } else {
            Err(GestureError::UnknownCommand(command_id.to_string()))
        }
    }

    fn require_entry(&self, command_id: &str) -> Result<usize> {
        self.entry_index(command_id)
            .ok_or_else(|| GestureError::CommandNotFound(command_id.to_string()))
    }

    fn entry_index(&self, command_id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.command_id() == command_id)
    }

    // Linear scan, registries hold tens of entries
    fn owner_index(&self, gesture_string: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.has_gesture(gesture_string))
    }

    // Takes every copy, an append-mode update may have bound it twice
    fn evict(&mut self, owner: usize, gesture_string: &str) {
        let entry = &mut self.entries[owner];
        entry.detach_all(gesture_string);
        info!(
            command = entry.command_id(),
            gesture = gesture_string,
            remaining = entry.gestures.len(),
            "gesture evicted by forced binding"
        );
    }

    // Live catalog description, falling back to the bind-time snapshot
    fn describe(&self, entry: &GestureCommand) -> String {
        self.catalog
            .get(entry.command_id())
            .map(|c| c.description.clone())
            .unwrap_or_else(|| entry.description().to_string())
    }
}

fn validate_gesture_string(gesture_string: &str) -> Result<()> {
    if gesture_string.trim().is_empty() {
        return Err(GestureError::InvalidInput("gesture string is empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    fn catalog(ids: &[&str]) -> CommandStore {
        let mut store = CommandStore::new();
        for id in ids {
            store.add(Command::new(*id, format!("{} command", id))).unwrap();
        }
        store
    }

    fn registry() -> GestureRegistry {
        GestureRegistry::new(catalog(&["Go", "Stop", "Jump", "Idle"]))
    }

    fn gestures_of(registry: &GestureRegistry, id: &str) -> Vec<String> {
        registry.lookup_by_id(id).unwrap().gesture_strings()
    }

    fn assert_unique(registry: &GestureRegistry) {
        let mut owners: HashMap<String, String> = HashMap::new();
        for entry in registry.iter() {
            for gesture in entry.gesture_strings() {
                if let Some(prev) = owners.insert(gesture.clone(), entry.command_id().to_string()) {
                    assert_eq!(
                        prev,
                        entry.command_id(),
                        "gesture {} bound to two commands",
                        gesture
                    );
                }
            }
        }
    }

    #[test]
    fn test_add_and_lookup() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();
        registry.add("Stop", "LR").unwrap();

        assert_eq!(registry.lookup_by_gesture_str("U").unwrap().command_id(), "Go");
        assert_eq!(
            registry.lookup_by_gesture(&Gesture::from("LR")).unwrap().command_id(),
            "Stop"
        );
        assert!(registry.lookup_by_gesture_str("L").is_none());
        assert!(registry.lookup_by_id("Jump").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_add_unknown_command() {
        let mut registry = registry();
        match registry.add("Fly", "U") {
            Err(GestureError::UnknownCommand(id)) => assert_eq!(id, "Fly"),
            other => panic!("Expected UnknownCommand, got {:?}", other),
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_add_duplicate_command() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();
        match registry.add("Go", "D") {
            Err(GestureError::DuplicateCommand(id)) => assert_eq!(id, "Go"),
            other => panic!("Expected DuplicateCommand, got {:?}", other),
        }
        assert_eq!(gestures_of(&registry, "Go"), vec!["U"]);
    }

    #[test]
    fn test_add_gesture_in_use() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();
        assert!(matches!(
            registry.add("Stop", "U"),
            Err(GestureError::GestureInUse(_))
        ));
        assert!(registry.lookup_by_id("Stop").is_none());
    }

    #[test]
    fn test_add_blank_gesture() {
        let mut registry = registry();
        assert!(matches!(
            registry.add("Go", " "),
            Err(GestureError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_add_command_value() {
        let mut registry = registry();
        let cmd = Command::new("Jump", "ignored, catalog wins");
        registry.add_command(&cmd, Gesture::from("UD")).unwrap();

        let entry = registry.lookup_by_id("Jump").unwrap();
        assert_eq!(entry.description(), "Jump command");
        assert_eq!(entry.gesture_strings(), vec!["UD"]);

        let stranger = Command::new("Fly", "not in catalog");
        assert!(matches!(
            registry.add_command(&stranger, Gesture::from("R")),
            Err(GestureError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_insert_checks_every_gesture() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();

        let entry = GestureCommand::with_gestures(
            Command::new("Stop", "Stop command"),
            vec![Gesture::from("D"), Gesture::from("U")],
        );
        assert!(matches!(
            registry.insert(entry),
            Err(GestureError::GestureInUse(g)) if g == "U"
        ));

        let twice = GestureCommand::with_gestures(
            Command::new("Stop", "Stop command"),
            vec![Gesture::from("D"), Gesture::from("D")],
        );
        assert!(matches!(
            registry.insert(twice),
            Err(GestureError::GestureInUse(_))
        ));

        let empty = GestureCommand::with_gestures(Command::new("Stop", ""), vec![]);
        assert!(matches!(
            registry.insert(empty),
            Err(GestureError::InvalidInput(_))
        ));

        let ok = GestureCommand::with_gestures(
            Command::new("Stop", "Stop command"),
            vec![Gesture::from("D"), Gesture::from("DL")],
        );
        registry.insert(ok).unwrap();
        assert_eq!(gestures_of(&registry, "Stop"), vec!["D", "DL"]);
    }

    #[test]
    fn test_add_gesture_extends_command() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();
        registry.add_gesture("Go", "UR", false).unwrap();

        assert_eq!(gestures_of(&registry, "Go"), vec!["U", "UR"]);
        assert_eq!(registry.lookup_by_gesture_str("UR").unwrap().command_id(), "Go");
    }

    #[test]
    fn test_add_gesture_requires_registration() {
        let mut registry = registry();
        match registry.add_gesture("Go", "U", false) {
            Err(GestureError::CommandNotFound(id)) => assert_eq!(id, "Go"),
            other => panic!("Expected CommandNotFound, got {:?}", other),
        }
        assert!(matches!(
            registry.add_gesture("Fly", "U", true),
            Err(GestureError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_add_gesture_already_on_same_command() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();

        assert!(matches!(
            registry.add_gesture("Go", "U", false),
            Err(GestureError::GestureInUse(_))
        ));

        // forced: detached then re-added, still a single binding
        registry.add_gesture("Go", "U", true).unwrap();
        assert_eq!(gestures_of(&registry, "Go"), vec!["U"]);
    }

    #[test]
    fn test_force_steals_gesture() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();
        registry.add("Stop", "D").unwrap();

        assert!(matches!(
            registry.add_gesture("Stop", "U", false),
            Err(GestureError::GestureInUse(_))
        ));
        assert_eq!(gestures_of(&registry, "Go"), vec!["U"]);

        registry.add_gesture("Stop", "U", true).unwrap();
        assert!(gestures_of(&registry, "Go").is_empty());
        assert_eq!(gestures_of(&registry, "Stop"), vec!["D", "U"]);
        assert_eq!(registry.lookup_by_gesture_str("U").unwrap().command_id(), "Stop");
    }

    #[test]
    fn test_force_shrinks_owner_by_one() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();
        registry.add_gesture("Go", "UR", false).unwrap();
        registry.add_gesture("Go", "UL", false).unwrap();
        registry.add("Stop", "D").unwrap();

        registry.update("Stop", "UR", false, true).unwrap();
        assert_eq!(gestures_of(&registry, "Go"), vec!["U", "UL"]);
        assert_eq!(gestures_of(&registry, "Stop"), vec!["D", "UR"]);
    }

    #[test]
    fn test_update_overwrite() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();
        registry.add_gesture("Go", "UR", false).unwrap();

        registry.update("Go", "RD", true, false).unwrap();
        assert_eq!(gestures_of(&registry, "Go"), vec!["RD"]);
        assert!(registry.is_gesture_available("U"));
    }

    #[test]
    fn test_update_append_tolerates_duplicates() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();

        registry.update("Go", "U", false, false).unwrap();
        assert_eq!(gestures_of(&registry, "Go"), vec!["U", "U"]);
        assert_unique(&registry);
    }

    #[test]
    fn test_force_evicts_every_copy() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();
        registry.update("Go", "U", false, false).unwrap();
        registry.add("Stop", "D").unwrap();

        registry.update("Stop", "U", false, true).unwrap();
        assert!(gestures_of(&registry, "Go").is_empty());
        assert_unique(&registry);
    }

    #[test]
    fn test_update_conflict_without_force() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();
        registry.add("Stop", "D").unwrap();

        match registry.update("Stop", "U", true, false) {
            Err(GestureError::GestureInUse(g)) => assert_eq!(g, "U"),
            other => panic!("Expected GestureInUse, got {:?}", other),
        }
        // nothing moved
        assert_eq!(gestures_of(&registry, "Go"), vec!["U"]);
        assert_eq!(gestures_of(&registry, "Stop"), vec!["D"]);
    }

    #[test]
    fn test_update_force_overwrite() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();
        registry.add("Stop", "D").unwrap();

        registry
            .update_gesture("Stop", &Gesture::from("U"), true, true)
            .unwrap();
        assert!(gestures_of(&registry, "Go").is_empty());
        assert_eq!(gestures_of(&registry, "Stop"), vec!["U"]);
    }

    #[test]
    fn test_update_unregistered() {
        let mut registry = registry();
        assert!(matches!(
            registry.update("Go", "U", true, false),
            Err(GestureError::CommandNotFound(_))
        ));
        assert!(matches!(
            registry.update("Fly", "U", true, false),
            Err(GestureError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_scenario_stolen_by_force() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();
        registry.add("Stop", "L").unwrap();

        assert!(matches!(
            registry.add_gesture("Stop", "U", false),
            Err(GestureError::GestureInUse(_))
        ));
        registry.add_gesture("Stop", "U", true).unwrap();

        assert_eq!(registry.lookup_by_id("Go").unwrap().gestures.len(), 0);
        assert_unique(&registry);
    }

    #[test]
    fn test_remove_gesture() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();
        registry.add_gesture("Go", "UR", false).unwrap();

        registry.remove_gesture("Go", "U").unwrap();
        assert_eq!(gestures_of(&registry, "Go"), vec!["UR"]);

        // not bound: silently ignored
        registry.remove_gesture("Go", "LLL").unwrap();
        assert_eq!(gestures_of(&registry, "Go"), vec!["UR"]);

        // emptying is allowed
        registry.remove_gesture("Go", "UR").unwrap();
        assert!(gestures_of(&registry, "Go").is_empty());

        assert!(matches!(
            registry.remove_gesture("Stop", "U"),
            Err(GestureError::CommandNotFound(_))
        ));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();
        registry.add("Stop", "D").unwrap();

        registry.remove("Go").unwrap();
        assert!(registry.lookup_by_id("Go").is_none());
        assert!(registry.is_gesture_available("U"));
        assert!(matches!(
            registry.remove("Go"),
            Err(GestureError::CommandNotFound(_))
        ));

        // catalog is untouched, so Go can be bound again
        registry.add("Go", "U").unwrap();

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.catalog().has("Go"));
    }

    #[test]
    fn test_listings() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();
        registry.add_gesture("Go", "UR", false).unwrap();
        registry.add("Stop", "D").unwrap();

        let gestures = registry.list_gestures();
        assert_eq!(gestures.len(), 3);
        assert_eq!(gestures["UR"], "Go command");
        assert_eq!(gestures["D"], "Stop command");

        let commands = registry.list_commands();
        assert_eq!(commands["Go"], vec!["U", "UR"]);
        assert_eq!(commands["Stop"], vec!["D"]);
    }

    #[test]
    fn test_listing_reads_live_description() {
        let mut registry = registry();
        registry.add("Go", "U").unwrap();

        registry.catalog_mut().update("Go", "Go really fast");
        assert_eq!(registry.list_gestures()["U"], "Go really fast");
    }

    #[test]
    fn test_random_operations_keep_gestures_unique() {
        let ids = ["Go", "Stop", "Jump", "Idle"];
        let pool = ["U", "D", "L", "R", "UD", "LR", "RL", "LUR"];
        let mut rng = StdRng::seed_from_u64(42);
        let mut registry = registry();

        for _ in 0..2000 {
            let id = ids[rng.gen_range(0..ids.len())];
            let gesture = pool[rng.gen_range(0..pool.len())];
            let force = rng.gen_bool(0.5);
            let before = registry.list_commands();

            let result = match rng.gen_range(0..6) {
                0 => registry.add(id, gesture),
                1 => registry.add_gesture(id, gesture, force),
                2 => registry.update(id, gesture, rng.gen_bool(0.5), force),
                3 => registry.remove_gesture(id, gesture),
                4 => registry.remove(id),
                _ => {
                    if rng.gen_bool(0.05) {
                        registry.clear();
                    }
                    Ok(())
                }
            };

            if result.is_err() {
                assert_eq!(registry.list_commands(), before, "failed call mutated state");
            }
            assert_unique(&registry);
        }
    }
}
