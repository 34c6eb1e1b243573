//! Session data model: items and their snapshot histories

pub mod history;
pub mod item;

pub use history::{HistoryBucket, Snapshot, SnapshotHistory};
pub use item::{Item, ItemIndex, SourceRecord};
