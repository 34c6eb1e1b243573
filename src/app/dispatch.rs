//! Action routing for the Session.
//!
//! Buttons, host calls and keyboard shortcuts all end up in
//! [`Session::dispatch`], so every trigger runs the same handler.

use crate::action::Action;

use super::Session;

impl Session {
    /// Run one action against the session
    pub async fn dispatch(&mut self, action: Action) {
        tracing::trace!("Dispatch: {:?}", action);
        match action {
            Action::Undo => self.handle_undo(),
            Action::Redo => self.handle_redo(),
            Action::RecordEdit(value) => self.record_edit(value),
            Action::AddSnapshot(value) => self.add_snapshot(value),
            Action::ClearHistory => {
                let current = self.current;
                if current.is_some() {
                    self.clear_history(current);
                }
            }
            Action::ClearAllHistory => self.clear_history(None),
            Action::Save => self.commit().await,
            Action::SelectItem(index) => self.select_item(index),
            Action::DeleteItem => {
                self.delete_current_item();
            }
            Action::ResetSession => self.reset_session(),
            Action::ToggleGroup(group_id) => {
                if let Some(settings) = self.settings_mut() {
                    settings.toggle_group(&group_id);
                }
            }
            Action::ResetControl(control_id) => {
                if let Some(settings) = self.settings_mut() {
                    settings.reset_control(&control_id);
                }
            }
            Action::ResetAllControls => {
                if let Some(settings) = self.settings_mut() {
                    settings.reset_all();
                }
            }
            Action::None => {}
        }
    }

    /// Resolve a key chord and dispatch its action
    ///
    /// Returns `false` when the chord is not bound. While a load or commit is
    /// in flight, the asynchronous actions are refused.
    pub async fn handle_key(&mut self, key: &str, modifiers: &[&str]) -> bool {
        let Some(action) = self.keybindings.resolve(key, modifiers).cloned() else {
            return false;
        };
        if action.is_async() && self.busy.is_busy() {
            tracing::debug!("Dispatch: {:?} refused while busy", action);
            return true;
        }
        self.dispatch(action).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::action::Action;
    use crate::config::SessionConfig;
    use crate::model::{ItemIndex, SourceRecord};
    use crate::Session;
    use serde_json::json;

    const DSL: &str = r#"{
        "controls": [
            {"id": "a", "type": "toggle", "label": "A", "defaultValue": false},
            {"id": "b", "type": "textfield", "label": "B", "defaultValue": ""}
        ],
        "layout": [{"id": "g", "label": "G", "controlIds": ["a", "b"]}]
    }"#;

    fn session() -> Session {
        let mut session = Session::detached(&SessionConfig::default());
        session.replace_items(vec![SourceRecord::new("r", "orig").with_config(DSL)]);
        session
    }

    #[tokio::test]
    async fn test_dispatch_history_actions() {
        let mut session = session();
        session.dispatch(Action::SelectItem(ItemIndex(0))).await;
        session.dispatch(Action::AddSnapshot("v1".into())).await;
        // Live edits land in the working slot, leaving the checkpoint alone
        session.dispatch(Action::RecordEdit("draft".into())).await;
        session.dispatch(Action::Undo).await;
        assert_eq!(session.current_snapshot().unwrap().value, "draft");

        session.dispatch(Action::Redo).await;
        assert_eq!(session.current_snapshot().unwrap().value, "v1");

        session.dispatch(Action::ClearHistory).await;
        assert_eq!(session.current_snapshot().unwrap().value, "draft");
        assert!(!session.can_undo());
    }

    #[tokio::test]
    async fn test_dispatch_settings_actions() {
        let mut session = session();
        session.dispatch(Action::SelectItem(ItemIndex(0))).await;

        session.dispatch(Action::ToggleGroup("g".into())).await;
        assert!(session.settings().unwrap().is_group_expanded("g"));

        session.apply_edit("a", json!(true)).unwrap();
        session.apply_edit("b", json!("hi")).unwrap();
        session.dispatch(Action::ResetControl("a".into())).await;
        assert_eq!(session.settings().unwrap().settings().get("a"), None);
        assert!(session.settings().unwrap().has_changes());

        session.dispatch(Action::ResetAllControls).await;
        assert!(!session.settings().unwrap().has_changes());
    }

    #[tokio::test]
    async fn test_handle_key_uses_default_bindings() {
        let mut session = session();
        session.select_item(ItemIndex(0));
        session.add_snapshot("v1");

        assert!(session.handle_key("z", &["ctrl"]).await);
        assert_eq!(session.current_snapshot().unwrap().value, "orig");

        assert!(session.handle_key("Z", &["shift", "ctrl"]).await);
        assert_eq!(session.current_snapshot().unwrap().value, "v1");

        assert!(!session.handle_key("q", &["ctrl"]).await);
    }

    #[tokio::test]
    async fn test_delete_key_removes_selected_item() {
        let mut session = session();
        session.select_item(ItemIndex(0));
        assert!(session.handle_key("Delete", &[]).await);
        assert!(session.items().is_empty());
        assert_eq!(session.current_index(), None);
    }
}
