//! Control DSL definitions and lenient parsing
//!
//! A [`ConfigDsl`] is a JSON document embedded on an external record:
//!
//! ```json
//! {
//!   "controls": [
//!     { "id": "seed", "type": "number", "label": "Seed", "defaultValue": 42 },
//!     { "id": "blur", "type": "slider", "label": "Blur", "min": 0, "max": 1, "step": 0.1, "defaultValue": 0.5 }
//!   ],
//!   "layout": [
//!     { "controlId": "seed" },
//!     { "id": "fx", "label": "Effects", "controlIds": ["blur"] }
//!   ],
//!   "defaultSettings": { "seed": 7 }
//! }
//! ```
//!
//! Parsing never fails. A payload that is not JSON or has no `controls` array
//! becomes the empty DSL; individual malformed controls, duplicate ids and
//! malformed layout entries are dropped with a warning.

use crate::model::SourceRecord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// One option of a `select` control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Payload of `checkbox` and `toggle`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoolControl {
    #[serde(default)]
    pub default_value: bool,
}

/// Payload of `textfield`, `multiinput` and `colorpicker`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TextControl {
    #[serde(default)]
    pub default_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Payload of `select`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectControl {
    #[serde(default)]
    pub default_value: String,
    #[serde(default)]
    pub options: Vec<SelectOption>,
}

impl SelectControl {
    /// Label shown for a stored value, if it is one of the options
    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}

/// Payload of `number` and `slider`
///
/// Range fields are hints for the rendering control; values outside them are
/// not rejected here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NumericControl {
    #[serde(default)]
    pub default_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

/// The eight control kinds, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControlKind {
    Checkbox(BoolControl),
    Toggle(BoolControl),
    Textfield(TextControl),
    Multiinput(TextControl),
    Colorpicker(TextControl),
    Select(SelectControl),
    Number(NumericControl),
    Slider(NumericControl),
}

/// Value type a control stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Boolean,
    Numeric,
    Text,
}

impl ControlKind {
    /// The `type` tag as written in the DSL
    pub fn type_name(&self) -> &'static str {
        match self {
            ControlKind::Checkbox(_) => "checkbox",
            ControlKind::Toggle(_) => "toggle",
            ControlKind::Textfield(_) => "textfield",
            ControlKind::Multiinput(_) => "multiinput",
            ControlKind::Colorpicker(_) => "colorpicker",
            ControlKind::Select(_) => "select",
            ControlKind::Number(_) => "number",
            ControlKind::Slider(_) => "slider",
        }
    }

    pub fn value_kind(&self) -> ValueKind {
        match self {
            ControlKind::Checkbox(_) | ControlKind::Toggle(_) => ValueKind::Boolean,
            ControlKind::Number(_) | ControlKind::Slider(_) => ValueKind::Numeric,
            ControlKind::Textfield(_)
            | ControlKind::Multiinput(_)
            | ControlKind::Colorpicker(_)
            | ControlKind::Select(_) => ValueKind::Text,
        }
    }

    /// The control's own default as a JSON value
    pub fn default_value(&self) -> Value {
        match self {
            ControlKind::Checkbox(c) | ControlKind::Toggle(c) => Value::Bool(c.default_value),
            ControlKind::Textfield(c) | ControlKind::Multiinput(c) | ControlKind::Colorpicker(c) => {
                Value::String(c.default_value.clone())
            }
            ControlKind::Select(c) => Value::String(c.default_value.clone()),
            ControlKind::Number(c) | ControlKind::Slider(c) => Value::from(c.default_value),
        }
    }
}

/// A single editable parameter definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ControlConfig {
    /// Unique key within one DSL
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub kind: ControlKind,
}

impl ControlConfig {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: ControlKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_value(&self) -> Value {
        self.kind.default_value()
    }
}

/// An accordion section grouping several controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayoutGroup {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub control_ids: Vec<String>,
}

/// A control rendered on its own, outside any accordion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStandalone {
    pub control_id: String,
}

/// One entry of the layout tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LayoutItem {
    Group(LayoutGroup),
    Standalone(LayoutStandalone),
}

impl LayoutItem {
    pub fn standalone(control_id: impl Into<String>) -> Self {
        LayoutItem::Standalone(LayoutStandalone {
            control_id: control_id.into(),
        })
    }

    pub fn group<I, S>(id: impl Into<String>, label: impl Into<String>, control_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LayoutItem::Group(LayoutGroup {
            id: id.into(),
            label: label.into(),
            control_ids: control_ids.into_iter().map(Into::into).collect(),
        })
    }
}

/// Declarative description of editable controls, their layout and defaults
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDsl {
    pub controls: Vec<ControlConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Vec<LayoutItem>>,
    #[serde(default)]
    pub default_settings: serde_json::Map<String, Value>,
}

impl ConfigDsl {
    /// Parse a DSL payload, degrading to the empty DSL on malformed input
    pub fn parse(json: &str) -> Self {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                tracing::warn!("Control DSL is not valid JSON, ignoring it: {}", e);
                Self::default()
            }
        }
    }

    /// Parse the DSL embedded on a source record, if it carries one
    pub fn from_record(record: &SourceRecord) -> Option<Self> {
        record.config.as_deref().map(Self::parse)
    }

    /// Build a DSL from an already-parsed JSON value
    pub fn from_value(value: &Value) -> Self {
        let Some(raw_controls) = value.get("controls").and_then(Value::as_array) else {
            tracing::warn!("Control DSL has no `controls` array, ignoring it");
            return Self::default();
        };

        let mut seen = HashSet::new();
        let controls = raw_controls
            .iter()
            .filter_map(|raw| match ControlConfig::deserialize(raw) {
                Ok(control) => Some(control),
                Err(e) => {
                    tracing::warn!("Dropping malformed control {}: {}", raw, e);
                    None
                }
            })
            .filter(|control| {
                let fresh = seen.insert(control.id.clone());
                if !fresh {
                    tracing::warn!("Dropping duplicate control id '{}'", control.id);
                }
                fresh
            })
            .collect();

        let layout = value.get("layout").and_then(Value::as_array).map(|entries| {
            entries
                .iter()
                .filter_map(|raw| match LayoutItem::deserialize(raw) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        tracing::warn!("Dropping malformed layout entry {}: {}", raw, e);
                        None
                    }
                })
                .collect()
        });

        let default_settings = value
            .get("defaultSettings")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Self {
            controls,
            layout,
            default_settings,
        }
    }

    /// Look up a control by id
    pub fn control(&self, id: &str) -> Option<&ControlConfig> {
        self.controls.iter().find(|c| c.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Serialize back to the JSON form
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
