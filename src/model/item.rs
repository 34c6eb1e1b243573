//! Editable items supplied by the surrounding list/grid.
//!
//! The core never creates items on its own; they arrive from an
//! [`ItemSource`](crate::services::item_source::ItemSource) load and leave only
//! through an explicit delete.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an item within the current collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemIndex(pub usize);

impl fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The external record an item was built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Identifier of the record in the external store
    pub id: String,

    /// Stored value (e.g. an image payload reference)
    pub value: String,

    /// Embedded control DSL, as a raw JSON string
    #[serde(default)]
    pub config: Option<String>,
}

impl SourceRecord {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            config: None,
        }
    }

    /// Attach a control DSL payload
    pub fn with_config(mut self, config: impl Into<String>) -> Self {
        self.config = Some(config.into());
        self
    }
}

/// An editable unit of the session
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub index: ItemIndex,

    /// Current stored value; replaced on commit
    pub value: String,

    /// Back-reference to the record this item came from
    pub source: SourceRecord,
}

impl Item {
    /// Build an item from its source record
    pub fn from_record(index: ItemIndex, source: SourceRecord) -> Self {
        Self {
            index,
            value: source.value.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_from_record_copies_value() {
        let record = SourceRecord::new("rec-1", "img-v1").with_config("{}");
        let item = Item::from_record(ItemIndex(4), record);

        assert_eq!(item.index, ItemIndex(4));
        assert_eq!(item.value, "img-v1");
        assert_eq!(item.source.config.as_deref(), Some("{}"));
    }

    #[test]
    fn test_source_record_config_defaults_to_none() {
        let record: SourceRecord =
            serde_json::from_str(r#"{"id": "a", "value": "b"}"#).unwrap();
        assert_eq!(record.config, None);
    }
}
