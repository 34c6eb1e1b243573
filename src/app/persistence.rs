//! Load and commit through the item source.
//!
//! Both operations hold the busy flag for their whole duration. Failures are
//! logged and surfaced through the status message; the session state is left
//! exactly as it was before the call.

use super::Session;

impl Session {
    /// Write the selected item's current snapshot back to its record
    ///
    /// On success the item takes the committed value and its history collapses
    /// to a single baseline entry holding that value.
    pub async fn commit(&mut self) {
        let Some(index) = self.current else {
            tracing::debug!("Commit: no item selected");
            return;
        };
        let Some(value) = self.current_snapshot().map(|s| s.value.clone()) else {
            tracing::debug!("Commit: item {} has no history", index);
            return;
        };
        let Some(record) = self.item(index).map(|item| item.source.clone()) else {
            return;
        };

        let result = {
            let _busy = self.busy.enter();
            self.source.commit(&record, &value).await
        };

        match result {
            Ok(()) => {
                if let Some(item) = self.items.iter_mut().find(|item| item.index == index) {
                    item.value = value.clone();
                    item.source.value = value.clone();
                }
                self.history.clear_item(index);
                self.history.record_edit(index, value);
                tracing::info!("Committed item {} (record '{}')", index, record.id);
                self.set_status_message(format!("Saved item {}", index));
            }
            Err(e) => {
                tracing::error!("Failed to commit item {} (record '{}'): {:#}", index, record.id, e);
                self.set_status_message(format!("Failed to save item {}: {}", index, e));
            }
        }
    }

    /// Replace the item collection with a fresh load from the source
    pub async fn load(&mut self) {
        let result = {
            let _busy = self.busy.enter();
            self.source.load().await
        };

        match result {
            Ok(records) => {
                let count = records.len();
                self.replace_items(records);
                tracing::info!("Loaded {} items", count);
                self.set_status_message(format!("Loaded {} items", count));
            }
            Err(e) => {
                tracing::error!("Failed to load items: {:#}", e);
                self.set_status_message(format!("Failed to load items: {}", e));
            }
        }
    }
}
