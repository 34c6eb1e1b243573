//! External item collection
//!
//! The session does not own durable storage. Loading a collection and
//! persisting a committed value are delegated to an [`ItemSource`] supplied by
//! the host. Both calls may fail; the session catches the error at its
//! boundary and keeps its own state intact.

use crate::model::SourceRecord;
use async_trait::async_trait;

/// Host-provided access to the records behind the editable items
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetch the item collection
    ///
    /// Position in the returned list becomes the item's index.
    async fn load(&self) -> anyhow::Result<Vec<SourceRecord>>;

    /// Write a committed value back to its record
    async fn commit(&self, record: &SourceRecord, value: &str) -> anyhow::Result<()>;
}

/// A source with nothing to load that accepts every commit
///
/// Used when the host wires no persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedSource;

#[async_trait]
impl ItemSource for DetachedSource {
    async fn load(&self) -> anyhow::Result<Vec<SourceRecord>> {
        Ok(Vec::new())
    }

    async fn commit(&self, record: &SourceRecord, _value: &str) -> anyhow::Result<()> {
        tracing::debug!("Detached source: dropping commit for record '{}'", record.id);
        Ok(())
    }
}
