//! Editing session coordinator
//!
//! [`Session`] binds the selected item to its history bucket and to the
//! settings state of its source record. All mutations run synchronously except
//! the two calls into the [`ItemSource`] (load and commit), which are wrapped
//! in the busy flag.
//!
//! Handlers are split by concern:
//! - `history_actions.rs` - live edits, checkpoints, undo/redo, clearing
//! - `selection.rs` - select, delete, reset
//! - `persistence.rs` - commit and load through the item source
//! - `dispatch.rs` - action and keyboard routing

mod dispatch;
mod history_actions;
mod persistence;
mod selection;

use crate::config::SessionConfig;
use crate::keybindings::KeybindingResolver;
use crate::model::{Item, ItemIndex, Snapshot, SnapshotHistory, SourceRecord};
use crate::services::{BusyFlag, DetachedSource, ItemSource};
use crate::settings::{ConfigDsl, RenderPlan, SettingsError, SettingsState};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// One editing session, tied to one hosting widget
pub struct Session {
    history: SnapshotHistory,

    /// Items in the current collection; indices stay stable across deletes
    items: Vec<Item>,

    /// Index of the selected item
    current: Option<ItemIndex>,

    /// Settings per source record id, parsed once on first selection
    settings: HashMap<String, SettingsState>,

    source: Arc<dyn ItemSource>,
    keybindings: KeybindingResolver,
    busy: BusyFlag,

    /// User-visible notification, e.g. after a failed save
    status_message: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("items", &self.items.len())
            .field("current", &self.current)
            .field("buckets", &self.history.len())
            .field("busy", &self.busy.is_busy())
            .field("status_message", &self.status_message)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create an empty session backed by an item source
    pub fn new(config: &SessionConfig, source: Arc<dyn ItemSource>) -> Self {
        Self {
            history: SnapshotHistory::with_limit(config.history_limit),
            items: Vec::new(),
            current: None,
            settings: HashMap::new(),
            source,
            keybindings: KeybindingResolver::new(&config.keybindings),
            busy: BusyFlag::new(),
            status_message: None,
        }
    }

    /// Create a session whose commits go nowhere
    pub fn detached(config: &SessionConfig) -> Self {
        Self::new(config, Arc::new(DetachedSource))
    }

    /// Replace the item collection and start over
    ///
    /// Old indices no longer name the same items, so history, selection and
    /// cached settings are dropped.
    pub fn replace_items(&mut self, records: Vec<SourceRecord>) {
        self.items = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| Item::from_record(ItemIndex(i), record))
            .collect();
        self.history.clear_all();
        self.current = None;
        self.settings.clear();
        tracing::debug!("Session: collection replaced with {} items", self.items.len());
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, index: ItemIndex) -> Option<&Item> {
        self.items.iter().find(|item| item.index == index)
    }

    pub fn current_index(&self) -> Option<ItemIndex> {
        self.current
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.current.and_then(|index| self.item(index))
    }

    /// The snapshot the preview renders, if an item with history is selected
    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.current.and_then(|index| self.history.current(index))
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.current.is_some_and(|index| self.history.can_undo(index))
    }

    pub fn can_redo(&self) -> bool {
        self.current.is_some_and(|index| self.history.can_redo(index))
    }

    /// Handle the UI polls to disable triggers while a load or save runs
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Settings of the selected item's source record
    pub fn settings(&self) -> Option<&SettingsState> {
        let item = self.current_item()?;
        self.settings.get(&item.source.id)
    }

    pub fn settings_mut(&mut self) -> Option<&mut SettingsState> {
        let record_id = self.current_item()?.source.id.clone();
        self.settings.get_mut(&record_id)
    }

    /// Apply a control edit to the selected item's settings
    pub fn apply_edit(&mut self, control_id: &str, raw: Value) -> Result<(), SettingsError> {
        match self.settings_mut() {
            Some(settings) => settings.apply_edit(control_id, raw).map(|_| ()),
            None => {
                tracing::debug!(
                    "Session: edit of '{}' ignored, selected item has no settings",
                    control_id
                );
                Err(SettingsError::NoSettings)
            }
        }
    }

    /// Render plan for the settings panel; empty when the item has no DSL
    pub fn render_plan(&self) -> RenderPlan {
        self.settings()
            .map(SettingsState::render_plan)
            .unwrap_or_default()
    }

    /// Parse the DSL of an item's record the first time it is selected
    fn activate_settings(&mut self, index: ItemIndex) {
        let Some(item) = self.items.iter().find(|item| item.index == index) else {
            return;
        };
        if self.settings.contains_key(&item.source.id) {
            return;
        }
        if let Some(dsl) = ConfigDsl::from_record(&item.source) {
            tracing::debug!(
                "Session: parsed {} controls for record '{}'",
                dsl.controls.len(),
                item.source.id
            );
            self.settings
                .insert(item.source.id.clone(), SettingsState::new(dsl));
        }
    }
}
