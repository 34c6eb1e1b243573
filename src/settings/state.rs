//! Live settings state
//!
//! Holds the parsed DSL read-only, the mutable settings map seeded from
//! `defaultSettings`, and which accordion groups are expanded. Expansion is
//! panel state only and never part of the settings map.

use super::coerce::{coerce_value, values_equal, CoerceError};
use super::items::{resolve_with_expanded, RenderPlan};
use super::schema::ConfigDsl;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Live map of control id to current value
pub type Settings = serde_json::Map<String, Value>;

/// Errors from editing a control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// No control with this id exists in the DSL
    UnknownControl(String),
    /// The selected item carries no control DSL, or nothing is selected
    NoSettings,
    /// The raw input could not be coerced to the control's type
    Rejected { id: String, reason: CoerceError },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::UnknownControl(id) => write!(f, "unknown control '{id}'"),
            SettingsError::NoSettings => write!(f, "no settings for the selected item"),
            SettingsError::Rejected { id, reason } => {
                write!(f, "rejected edit of '{id}': {reason}")
            }
        }
    }
}

impl std::error::Error for SettingsError {}

/// The settings panel state for one DSL
#[derive(Debug, Clone)]
pub struct SettingsState {
    dsl: ConfigDsl,
    settings: Settings,
    expanded_groups: HashSet<String>,
}

impl SettingsState {
    /// Create a state from a DSL, seeding settings from its defaults
    pub fn new(dsl: ConfigDsl) -> Self {
        let settings = dsl.default_settings.clone();
        Self {
            dsl,
            settings,
            expanded_groups: HashSet::new(),
        }
    }

    /// Parse a DSL payload and create a state from it
    pub fn from_json(json: &str) -> Self {
        Self::new(ConfigDsl::parse(json))
    }

    pub fn dsl(&self) -> &ConfigDsl {
        &self.dsl
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings as a JSON object, for handing to the processor
    pub fn to_value(&self) -> Value {
        Value::Object(self.settings.clone())
    }

    /// The value a control displays: live value, else the control default
    pub fn display_value(&self, id: &str) -> Option<Value> {
        let control = self.dsl.control(id)?;
        Some(
            self.settings
                .get(id)
                .cloned()
                .unwrap_or_else(|| control.default_value()),
        )
    }

    /// Apply a raw edit to a control
    ///
    /// Returns the value stored after coercion.
    pub fn apply_edit(&mut self, id: &str, raw: Value) -> Result<&Value, SettingsError> {
        let Some(control) = self.dsl.control(id) else {
            tracing::debug!("Settings: edit of unknown control '{}' ignored", id);
            return Err(SettingsError::UnknownControl(id.to_string()));
        };

        let value = coerce_value(&control.kind, &raw).map_err(|reason| {
            tracing::debug!("Settings: edit of '{}' rejected: {}", id, reason);
            SettingsError::Rejected {
                id: id.to_string(),
                reason,
            }
        })?;

        tracing::debug!("Settings: {} = {}", id, value);
        let slot = self.settings.entry(id.to_string()).or_insert(Value::Null);
        *slot = value;
        Ok(slot)
    }

    /// Whether a control's displayed value differs from its own default
    pub fn is_modified(&self, id: &str) -> bool {
        match (self.dsl.control(id), self.display_value(id)) {
            (Some(control), Some(value)) => {
                !values_equal(&control.kind, &value, &control.default_value())
            }
            _ => false,
        }
    }

    /// Whether settings differ from the DSL's `defaultSettings`
    pub fn has_changes(&self) -> bool {
        let seeds = &self.dsl.default_settings;
        if self.settings.len() != seeds.len() {
            return true;
        }
        self.settings.iter().any(|(id, value)| match seeds.get(id) {
            Some(seed) => match self.dsl.control(id) {
                Some(control) => !values_equal(&control.kind, value, seed),
                None => value != seed,
            },
            None => true,
        })
    }

    /// Restore one control to its seeded value
    ///
    /// Returns false for an unknown id.
    pub fn reset_control(&mut self, id: &str) -> bool {
        if self.dsl.control(id).is_none() {
            return false;
        }
        match self.dsl.default_settings.get(id) {
            Some(seed) => {
                self.settings.insert(id.to_string(), seed.clone());
            }
            None => {
                self.settings.remove(id);
            }
        }
        true
    }

    /// Restore every value to `defaultSettings`
    pub fn reset_all(&mut self) {
        self.settings = self.dsl.default_settings.clone();
    }

    /// Flip a group's expanded state, returning the new state
    pub fn toggle_group(&mut self, group_id: &str) -> bool {
        if self.expanded_groups.remove(group_id) {
            false
        } else {
            self.expanded_groups.insert(group_id.to_string());
            true
        }
    }

    pub fn set_group_expanded(&mut self, group_id: &str, expanded: bool) {
        if expanded {
            self.expanded_groups.insert(group_id.to_string());
        } else {
            self.expanded_groups.remove(group_id);
        }
    }

    pub fn is_group_expanded(&self, group_id: &str) -> bool {
        self.expanded_groups.contains(group_id)
    }

    /// Resolve the panel's render plan against the live settings
    pub fn render_plan(&self) -> RenderPlan {
        resolve_with_expanded(&self.dsl, &self.settings, &self.expanded_groups)
    }
}

impl Default for SettingsState {
    fn default() -> Self {
        Self::new(ConfigDsl::default())
    }
}
