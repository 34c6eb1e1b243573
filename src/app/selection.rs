//! Selection lifecycle for the Session.
//!
//! Selecting an item activates its history bucket and its settings; deleting
//! it forgets both; resetting the session forgets all history.

use crate::model::{Item, ItemIndex};

use super::Session;

impl Session {
    /// Toggle selection of an item
    ///
    /// Selecting the already selected item deselects it. Selecting another item
    /// moves its cursor to the latest entry, seeding the bucket with the item's
    /// current value if it has no history yet. Unknown indices are ignored.
    pub fn select_item(&mut self, index: ItemIndex) {
        if self.current == Some(index) {
            self.deselect();
            return;
        }

        let Some(value) = self.item(index).map(|item| item.value.clone()) else {
            tracing::debug!("Selection: ignoring unknown item {}", index);
            return;
        };

        self.current = Some(index);
        if self.history.bucket(index).is_some() {
            self.history.seek_latest(index);
        } else {
            self.history.record_edit(index, value);
        }
        self.activate_settings(index);
        tracing::debug!("Selection: select item {}", index);
    }

    /// Clear the selection, keeping every item's history
    pub fn deselect(&mut self) {
        if let Some(index) = self.current.take() {
            tracing::debug!("Selection: deselect item {}", index);
        }
    }

    /// Delete the selected item from the collection
    ///
    /// Its history is discarded and the selection cleared. Returns the removed
    /// item, or `None` when nothing was selected.
    pub fn delete_current_item(&mut self) -> Option<Item> {
        let index = self.current.take()?;
        self.history.remove(index);

        let position = self.items.iter().position(|item| item.index == index)?;
        let removed = self.items.remove(position);

        // Drop cached settings once no remaining item shares the record
        let record_id = &removed.source.id;
        if !self.items.iter().any(|item| &item.source.id == record_id) {
            self.settings.remove(record_id);
        }

        tracing::debug!("Selection: deleted item {}", index);
        Some(removed)
    }

    /// Forget every item's history and clear the selection
    pub fn reset_session(&mut self) {
        self.history.clear_all();
        self.deselect();
        tracing::debug!("Selection: session reset");
    }
}
