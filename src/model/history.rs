//! Per-item snapshot history with undo/redo
//!
//! Every editable item owns an independent [`HistoryBucket`]: an ordered log of
//! [`Snapshot`]s plus a cursor marking the active one. Buckets are created lazily on
//! the first edit of an item and live until the item is deleted or the whole
//! history is cleared.
//!
//! Two write paths exist:
//! - [`SnapshotHistory::record_edit`] is the live path. Once a bucket exists it
//!   overwrites the working slot at index 0, so a slider drag never grows history.
//! - [`SnapshotHistory::add_snapshot`] is the checkpoint path. It discards any
//!   redo entries after the cursor and appends.
//!
//! On an empty bucket both behave the same: the bucket is created holding the
//! value, with the cursor at 0.

use super::item::ItemIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A point-in-time capture of an item's edited value
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub item_index: ItemIndex,
    pub value: String,
}

impl Snapshot {
    pub fn new(item_index: ItemIndex, value: impl Into<String>) -> Self {
        Self {
            item_index,
            value: value.into(),
        }
    }
}

/// Snapshot log of a single item
///
/// Invariant: never empty, and `cursor < entries.len()`.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryBucket {
    entries: Vec<Snapshot>,
    cursor: usize,
}

impl HistoryBucket {
    fn new(first: Snapshot) -> Self {
        Self {
            entries: vec![first],
            cursor: 0,
        }
    }

    /// All snapshots, oldest first
    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The snapshot under the cursor
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    fn last_index(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    /// Replace the working slot in place, leaving the cursor alone
    fn overwrite_working(&mut self, snapshot: Snapshot) {
        if let Some(slot) = self.entries.first_mut() {
            *slot = snapshot;
        }
    }

    /// Drop redo entries, append, and move the cursor to the new end
    fn push(&mut self, snapshot: Snapshot, limit: Option<usize>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);

        if let Some(limit) = limit {
            // Evict the oldest checkpoint, never the baseline at index 0
            while self.entries.len() > limit && self.entries.len() > 2 {
                self.entries.remove(1);
            }
        }

        self.cursor = self.last_index();
    }

    fn undo(&mut self) -> bool {
        if self.can_undo() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    fn redo(&mut self) -> bool {
        if self.can_redo() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Keep only the baseline entry
    fn collapse_to_baseline(&mut self) {
        self.entries.truncate(1);
        self.cursor = 0;
    }

    fn seek_latest(&mut self) {
        self.cursor = self.last_index();
    }
}

/// History manager owning one bucket per edited item
#[derive(Debug, Default)]
pub struct SnapshotHistory {
    buckets: HashMap<ItemIndex, HistoryBucket>,

    /// Maximum entries per bucket (`None` = unbounded)
    limit: Option<usize>,
}

impl SnapshotHistory {
    /// Create an unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history capping each bucket at `limit` entries
    ///
    /// Limits below 2 are raised to 2 so a baseline and one checkpoint always fit.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            buckets: HashMap::new(),
            limit: limit.map(|l| l.max(2)),
        }
    }

    /// Live edit: seed the bucket, or overwrite its working slot
    pub fn record_edit(&mut self, item: ItemIndex, value: impl Into<String>) {
        let snapshot = Snapshot::new(item, value);
        match self.buckets.get_mut(&item) {
            Some(bucket) => {
                bucket.overwrite_working(snapshot);
                tracing::debug!(
                    "History: live edit item={} cursor={} len={}",
                    item,
                    bucket.cursor,
                    bucket.len()
                );
            }
            None => {
                self.buckets.insert(item, HistoryBucket::new(snapshot));
                tracing::debug!("History: created bucket for item={} via live edit", item);
            }
        }
    }

    /// Deliberate checkpoint: truncate redo entries and append
    pub fn add_snapshot(&mut self, item: ItemIndex, value: impl Into<String>) {
        let snapshot = Snapshot::new(item, value);
        let limit = self.limit;
        match self.buckets.get_mut(&item) {
            Some(bucket) => {
                let discarded = bucket.len() - bucket.cursor - 1;
                bucket.push(snapshot, limit);
                tracing::debug!(
                    "History: snapshot item={} cursor={} len={} discarded={}",
                    item,
                    bucket.cursor,
                    bucket.len(),
                    discarded
                );
            }
            None => {
                self.buckets.insert(item, HistoryBucket::new(snapshot));
                tracing::debug!("History: created bucket for item={} via snapshot", item);
            }
        }
    }

    /// Step the cursor back
    ///
    /// Returns the new current snapshot, or None if nothing moved.
    pub fn undo(&mut self, item: ItemIndex) -> Option<&Snapshot> {
        let bucket = self.buckets.get_mut(&item)?;
        if !bucket.undo() {
            return None;
        }
        tracing::debug!("History: undo item={} cursor={}", item, bucket.cursor);
        bucket.current()
    }

    /// Step the cursor forward
    ///
    /// Returns the new current snapshot, or None if nothing moved.
    pub fn redo(&mut self, item: ItemIndex) -> Option<&Snapshot> {
        let bucket = self.buckets.get_mut(&item)?;
        if !bucket.redo() {
            return None;
        }
        tracing::debug!("History: redo item={} cursor={}", item, bucket.cursor);
        bucket.current()
    }

    /// Snapshot under the cursor of an item's bucket
    pub fn current(&self, item: ItemIndex) -> Option<&Snapshot> {
        self.buckets.get(&item).and_then(HistoryBucket::current)
    }

    /// Move an item's cursor to its newest entry
    pub fn seek_latest(&mut self, item: ItemIndex) {
        if let Some(bucket) = self.buckets.get_mut(&item) {
            bucket.seek_latest();
        }
    }

    /// Clear one item's history down to its baseline, or drop every bucket
    pub fn clear(&mut self, item: Option<ItemIndex>) {
        match item {
            Some(item) => self.clear_item(item),
            None => self.clear_all(),
        }
    }

    /// Truncate a bucket to its first entry ("undo everything but keep a working copy")
    pub fn clear_item(&mut self, item: ItemIndex) {
        if let Some(bucket) = self.buckets.get_mut(&item) {
            bucket.collapse_to_baseline();
            tracing::debug!("History: cleared item={} to baseline", item);
        }
    }

    /// Drop all buckets
    pub fn clear_all(&mut self) {
        tracing::debug!("History: dropping {} buckets", self.buckets.len());
        self.buckets.clear();
    }

    /// Forget an item's bucket entirely (used on delete)
    pub fn remove(&mut self, item: ItemIndex) -> Option<HistoryBucket> {
        self.buckets.remove(&item)
    }

    pub fn bucket(&self, item: ItemIndex) -> Option<&HistoryBucket> {
        self.buckets.get(&item)
    }

    pub fn can_undo(&self, item: ItemIndex) -> bool {
        self.buckets.get(&item).is_some_and(HistoryBucket::can_undo)
    }

    pub fn can_redo(&self, item: ItemIndex) -> bool {
        self.buckets.get(&item).is_some_and(HistoryBucket::can_redo)
    }

    /// Number of items with a bucket
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
