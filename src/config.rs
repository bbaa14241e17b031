//! Configuration for the recognizer and the demo command set.
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file
//! at all) gives the stock behavior.

use crate::core::geometry::DEFAULT_MIN_DELTA;
use crate::error::{GestureError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Which segments of the filtered trace get classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SegmentMode {
    /// Classify every segment, including the last one
    #[default]
    AllSegments,
    /// Stop one segment early, matching gesture strings recorded by older
    /// capture tools that never classified the final stroke
    Legacy,
}

/// Recognition tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Minimum per-axis movement (pixels) for a point to survive filtering
    pub min_delta: i32,
    /// Skip ambiguous (diagonal / zero-length) segments instead of emitting `?`
    pub drop_unrecognized: bool,
    pub segment_mode: SegmentMode,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            min_delta: DEFAULT_MIN_DELTA,
            drop_unrecognized: true,
            segment_mode: SegmentMode::AllSegments,
        }
    }
}

impl RecognizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_delta < 1 {
            return Err(GestureError::Config(format!(
                "min_delta must be at least 1, got {}",
                self.min_delta
            )));
        }
        Ok(())
    }
}

/// A command to seed at startup, with the gestures bound to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSeed {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub gestures: Vec<String>,
}

impl CommandSeed {
    pub fn new(id: &str, description: &str, gestures: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            gestures: gestures.iter().map(|g| g.to_string()).collect(),
        }
    }
}

/// The stock command set used when the config file defines none
pub fn demo_commands() -> Vec<CommandSeed> {
    vec![
        CommandSeed::new("ChangeBgToGreen", "Change bg to green", &["U"]),
        CommandSeed::new("ChangeBgToYellow", "Change bg to yellow", &["D"]),
        CommandSeed::new("ChangeBgToBlue", "Change bg to blue", &["L"]),
        CommandSeed::new("ChangeBgToViolet", "Change bg to violet", &["R"]),
        CommandSeed::new("ChangeBgToLime", "Change bg to lime", &["LR"]),
        CommandSeed::new("ChangeBgToOrange", "Change bg to orange", &["UD"]),
        CommandSeed::new("ChangeBgToIndigo", "Change bg to indigo", &["LU"]),
        CommandSeed::new("ChangeBgToWhite", "Change bg to white", &["RD"]),
        CommandSeed::new("ChangeBgToKhaki", "Change bg to khaki", &["LUR"]),
        CommandSeed::new("ChangePenToBlack", "Change pen to black", &["LRL"]),
        CommandSeed::new("ChangePenToRed", "Change pen to red", &["RLR"]),
    ]
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub recognizer: RecognizerConfig,
    pub commands: Vec<CommandSeed>,
}

impl AppConfig {
    /// Gets the configuration directory path.
    ///
    /// - Linux: `~/.config/gesture-commands/`
    /// - macOS: `~/Library/Application Support/gesture-commands/`
    /// - Windows: `%APPDATA%\gesture-commands\`
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            GestureError::Config("Could not determine config directory".to_string())
        })?;
        Ok(dir.join("gesture-commands"))
    }

    /// Gets the default config file path.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)
            .map_err(|e| GestureError::Config(format!("Failed to parse config: {}", e)))?;
        config.recognizer.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GestureError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Configured commands, or the demo set when there are none
    pub fn seeds(&self) -> Vec<CommandSeed> {
        if self.commands.is_empty() {
            demo_commands()
        } else {
            self.commands.clone()
        }
    }

    /// Load from the default location, falling back to defaults when there is no file.
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }
}
