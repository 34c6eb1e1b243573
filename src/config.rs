use crate::action::Action;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SessionConfig {
    /// Maximum snapshots kept per item; unbounded when absent.
    /// The baseline entry is never evicted.
    #[serde(default)]
    pub history_limit: Option<usize>,

    #[serde(default = "SessionConfig::default_keybindings")]
    pub keybindings: Vec<Keybinding>,
}

/// Keybinding definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Keybinding {
    /// Key name (e.g., "z", "Delete", "Backspace")
    pub key: String,

    /// Modifiers (e.g., ["ctrl"], ["ctrl", "shift"])
    #[serde(default)]
    pub modifiers: Vec<String>,

    /// Action to perform (e.g., "undo", "save")
    pub action: String,
}

impl Keybinding {
    pub fn new(key: &str, modifiers: &[&str], action: &str) -> Self {
        Self {
            key: key.to_string(),
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
            action: action.to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: None,
            keybindings: Self::default_keybindings(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: SessionConfig =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    fn default_keybindings() -> Vec<Keybinding> {
        vec![
            // Undo/redo
            Keybinding::new("z", &["ctrl"], "undo"),
            Keybinding::new("y", &["ctrl"], "redo"),
            Keybinding::new("z", &["ctrl", "shift"], "redo"),
            // Persistence
            Keybinding::new("s", &["ctrl"], "save"),
            // Selection
            Keybinding::new("Delete", &[], "delete_item"),
            Keybinding::new("Backspace", &["ctrl", "shift"], "clear_history"),
        ]
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(limit) = self.history_limit {
            if limit < 2 {
                return Err(ConfigError::ValidationError(
                    "history_limit must be at least 2".to_string(),
                ));
            }
        }

        for binding in &self.keybindings {
            if binding.key.is_empty() {
                return Err(ConfigError::ValidationError(
                    "keybinding key cannot be empty".to_string(),
                ));
            }
            if Action::from_name(&binding.action).is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "unknown keybinding action '{}'",
                    binding.action
                )));
            }
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
