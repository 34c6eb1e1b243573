//! History operations for the Session.
//!
//! Every handler here acts on the selected item and is a no-op when nothing
//! is selected:
//! - Live edits that overwrite the working slot
//! - Explicit checkpoints
//! - Undo/redo within the selected item's bucket
//! - Clearing one or all buckets

use crate::model::ItemIndex;

use super::Session;

impl Session {
    /// Record a live edit of the selected item
    ///
    /// Called on every change while the user is editing. It only seeds or
    /// overwrites the working slot, so a stream of edits never grows history.
    pub fn record_edit(&mut self, value: impl Into<String>) {
        if let Some(index) = self.current {
            self.history.record_edit(index, value);
        }
    }

    /// Record a checkpoint for the selected item, discarding any redo branch
    pub fn add_snapshot(&mut self, value: impl Into<String>) {
        if let Some(index) = self.current {
            self.history.add_snapshot(index, value);
        }
    }

    pub fn handle_undo(&mut self) {
        let Some(index) = self.current else {
            return;
        };
        if self.history.undo(index).is_none() {
            tracing::trace!("Undo: nothing to undo for item {}", index);
        }
    }

    pub fn handle_redo(&mut self) {
        let Some(index) = self.current else {
            return;
        };
        if self.history.redo(index).is_none() {
            tracing::trace!("Redo: nothing to redo for item {}", index);
        }
    }

    /// Collapse history back to the baseline
    ///
    /// With an index, only that item's bucket is collapsed. Without one, every
    /// bucket is dropped; the selection is kept.
    pub fn clear_history(&mut self, item: Option<ItemIndex>) {
        self.history.clear(item);
    }
}
