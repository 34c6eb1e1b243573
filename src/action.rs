use crate::model::ItemIndex;
use serde::{Deserialize, Serialize};

/// High-level operations the surrounding UI can trigger
///
/// Buttons, menus and keyboard shortcuts all produce one of these and go
/// through [`Session::dispatch`](crate::app::Session::dispatch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    // History
    Undo,
    Redo,
    RecordEdit(String), // Live edit of the working slot
    AddSnapshot(String), // Deliberate checkpoint
    ClearHistory,       // Collapse the current item's history to its baseline
    ClearAllHistory,    // Drop every bucket, keep the selection

    // Persistence
    Save, // Commit the current snapshot back to the source record

    // Selection
    SelectItem(ItemIndex),
    DeleteItem,
    ResetSession,

    // Settings panel
    ToggleGroup(String),
    ResetControl(String),
    ResetAllControls,

    // No-op
    None,
}

impl Action {
    /// Parse an action from its configuration name
    ///
    /// Only argument-free actions have names; the rest are produced by code.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "undo" => Action::Undo,
            "redo" => Action::Redo,
            "clear_history" => Action::ClearHistory,
            "clear_all_history" => Action::ClearAllHistory,
            "save" => Action::Save,
            "delete_item" => Action::DeleteItem,
            "reset_session" => Action::ResetSession,
            "reset_all_controls" => Action::ResetAllControls,
            "none" => Action::None,
            _ => return None,
        })
    }

    /// Whether this action awaits the external item source
    pub fn is_async(&self) -> bool {
        matches!(self, Action::Save)
    }
}
