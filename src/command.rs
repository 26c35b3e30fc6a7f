//! Inbound commands and persisted preferences.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// User preferences controlling an `apply`.
///
/// Missing keys take their defaults: emphasis and coloring on, font off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Bold the first half of each word
    #[serde(default = "default_true")]
    pub bionic: bool,

    /// Color words along the line gradient
    #[serde(default = "default_true")]
    pub beeline: bool,

    /// Force the serif reading font
    #[serde(default)]
    pub font: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bionic: true,
            beeline: true,
            font: false,
        }
    }
}

impl Settings {
    /// Create settings with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable emphasis.
    pub fn with_bionic(mut self, enabled: bool) -> Self {
        self.bionic = enabled;
        self
    }

    /// Enable or disable coloring.
    pub fn with_beeline(mut self, enabled: bool) -> Self {
        self.beeline = enabled;
        self
    }

    /// Enable or disable the font override.
    pub fn with_font(mut self, enabled: bool) -> Self {
        self.font = enabled;
        self
    }

    /// Parse settings from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save settings to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// A request to process or restore a document.
///
/// ```
/// use beeline::{Command, Settings};
///
/// let cmd = Command::from_json(
///     r#"{"command": "apply", "settings": {"bionic": true, "beeline": false, "font": true}}"#,
/// ).unwrap();
/// assert_eq!(cmd, Command::Apply { settings: Settings::new().with_beeline(false).with_font(true) });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum Command {
    /// Segment, optionally color, and set the font override
    Apply {
        /// Preferences for this run
        #[serde(default)]
        settings: Settings,
    },
    /// Undo all processing
    Reset,
}

impl Command {
    /// Decode a command message.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidCommand(e.to_string()))
    }

    /// Encode as a command message.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
