// Integration tests - the session driving history, settings and the item source together

mod common;

use common::fixtures::{MemorySource, SLIDER_DSL};
use common::tracing::init_tracing_from_env;
use easel::action::Action;
use easel::config::SessionConfig;
use easel::model::{ItemIndex, SnapshotHistory, SourceRecord};
use easel::settings::RenderBlock;
use easel::Session;
use serde_json::json;
use std::sync::Arc;

fn records() -> Vec<SourceRecord> {
    vec![
        SourceRecord::new("r0", "img-0").with_config(SLIDER_DSL),
        SourceRecord::new("r1", "img-1"),
        SourceRecord::new("r2", "img-2"),
        SourceRecord::new("r3", "img-3").with_config(SLIDER_DSL),
    ]
}

async fn loaded_session() -> (Session, Arc<MemorySource>) {
    init_tracing_from_env();
    let source = Arc::new(MemorySource::new(records()));
    let mut session = Session::new(&SessionConfig::default(), source.clone());
    session.load().await;
    (session, source)
}

fn bucket_values(history: &SnapshotHistory, index: ItemIndex) -> Vec<String> {
    history
        .bucket(index)
        .map(|b| b.entries().iter().map(|s| s.value.clone()).collect())
        .unwrap_or_default()
}

/// Walk through the slider example end to end
#[tokio::test]
async fn test_slider_and_history_scenario() {
    let (mut session, _source) = loaded_session().await;
    let item = ItemIndex(3);
    session.select_item(item);

    // One implicit group holding the slider at its default
    let plan = session.render_plan();
    assert_eq!(plan.blocks.len(), 1);
    let groups: Vec<_> = plan.groups().collect();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].controls.len(), 1);
    assert_eq!(groups[0].controls[0].config.id, "x");
    assert_eq!(groups[0].controls[0].value, json!(0.5));

    session.apply_edit("x", json!("0.8")).unwrap();
    assert_eq!(session.settings().unwrap().to_value(), json!({"x": 0.8}));

    // Start from an empty bucket while keeping the selection
    session.clear_history(None);
    session.add_snapshot("img-v2");
    assert_eq!(bucket_values(session.history(), item), vec!["img-v2"]);
    assert_eq!(session.history().bucket(item).unwrap().cursor(), 0);

    session.handle_undo();
    assert_eq!(session.history().bucket(item).unwrap().cursor(), 0);

    session.add_snapshot("img-v3");
    session.handle_undo();
    assert_eq!(session.history().bucket(item).unwrap().cursor(), 0);

    session.add_snapshot("img-v4");
    assert_eq!(bucket_values(session.history(), item), vec!["img-v2", "img-v4"]);
    assert_eq!(session.history().bucket(item).unwrap().cursor(), 1);
    assert_eq!(session.current_snapshot().unwrap().value, "img-v4");
}

#[tokio::test]
async fn test_load_replaces_collection() {
    let (session, _source) = loaded_session().await;
    assert_eq!(session.items().len(), 4);
    assert_eq!(session.item(ItemIndex(2)).unwrap().value, "img-2");
    assert_eq!(session.status_message(), Some("Loaded 4 items"));
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_reload_resets_history_and_selection() {
    let (mut session, _source) = loaded_session().await;
    session.select_item(ItemIndex(1));
    session.add_snapshot("edited");

    session.load().await;
    assert_eq!(session.current_index(), None);
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_failed_load_keeps_state() {
    let (mut session, source) = loaded_session().await;
    session.select_item(ItemIndex(1));
    session.add_snapshot("edited");

    source.set_fail_load(true);
    session.load().await;

    assert_eq!(session.items().len(), 4);
    assert_eq!(session.current_index(), Some(ItemIndex(1)));
    assert_eq!(session.current_snapshot().unwrap().value, "edited");
    assert!(session
        .status_message()
        .unwrap()
        .contains("collection unavailable"));
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_commit_writes_back_and_resets_baseline() {
    let (mut session, source) = loaded_session().await;
    let item = ItemIndex(1);
    session.select_item(item);
    session.add_snapshot("v1");
    session.add_snapshot("v2");
    session.handle_undo();

    session.dispatch(Action::Save).await;

    assert_eq!(source.commits(), vec![("r1".to_string(), "v1".to_string())]);
    assert_eq!(source.record_value("r1").as_deref(), Some("v1"));
    assert_eq!(session.item(item).unwrap().value, "v1");

    let bucket = session.history().bucket(item).unwrap();
    assert_eq!(bucket.len(), 1);
    assert_eq!(bucket.cursor(), 0);
    assert_eq!(session.current_snapshot().unwrap().value, "v1");
    assert!(!session.can_undo());
    assert!(!session.can_redo());
}

#[tokio::test]
async fn test_failed_commit_keeps_history() {
    let (mut session, source) = loaded_session().await;
    let item = ItemIndex(2);
    session.select_item(item);
    session.add_snapshot("v1");

    source.set_fail_commit(true);
    session.commit().await;

    assert!(source.commits().is_empty());
    assert_eq!(session.item(item).unwrap().value, "img-2");
    assert_eq!(bucket_values(session.history(), item), vec!["img-2", "v1"]);
    assert!(session.status_message().unwrap().contains("read-only"));
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_commit_without_selection_does_nothing() {
    let (mut session, source) = loaded_session().await;
    session.commit().await;
    assert!(source.commits().is_empty());
}

#[tokio::test]
async fn test_busy_flag_raised_during_source_calls() {
    init_tracing_from_env();
    let source = Arc::new(MemorySource::new(records()));
    let mut session = Session::new(&SessionConfig::default(), source.clone());
    let flag = session.busy_flag();
    source.watch_busy(flag.clone());

    session.load().await;
    assert!(source.was_busy_during_call());
    assert!(!flag.is_busy());

    session.select_item(ItemIndex(0));
    session.commit().await;
    assert!(!flag.is_busy());
}

#[tokio::test]
async fn test_save_shortcut_refused_while_busy() {
    let (mut session, source) = loaded_session().await;
    session.select_item(ItemIndex(0));
    session.add_snapshot("v1");

    let flag = session.busy_flag();
    let guard = flag.enter();
    assert!(session.handle_key("s", &["ctrl"]).await);
    assert!(source.commits().is_empty());

    drop(guard);
    assert!(session.handle_key("s", &["ctrl"]).await);
    assert_eq!(source.commits().len(), 1);
}

#[tokio::test]
async fn test_histories_are_independent_per_item() {
    let (mut session, _source) = loaded_session().await;
    session.select_item(ItemIndex(0));
    session.add_snapshot("a1");
    session.select_item(ItemIndex(1));
    session.add_snapshot("b1");
    session.add_snapshot("b2");

    session.select_item(ItemIndex(0));
    session.handle_undo();
    assert_eq!(session.current_snapshot().unwrap().value, "img-0");
    assert_eq!(bucket_values(session.history(), ItemIndex(1)), vec!["img-1", "b1", "b2"]);
    assert_eq!(session.history().bucket(ItemIndex(1)).unwrap().cursor(), 2);
}

#[tokio::test]
async fn test_settings_survive_session_reset() {
    let (mut session, _source) = loaded_session().await;
    session.select_item(ItemIndex(0));
    session.apply_edit("x", json!("abc")).unwrap();
    assert_eq!(session.render_plan().control("x").unwrap().value, json!(0.0));

    session.reset_session();
    session.select_item(ItemIndex(0));
    assert_eq!(
        session.settings().unwrap().settings().get("x"),
        Some(&json!(0.0))
    );
}

#[tokio::test]
async fn test_grouped_layout_through_session() {
    init_tracing_from_env();
    let dsl = r##"{
        "controls": [
            {"id": "on", "type": "toggle", "label": "On", "defaultValue": true},
            {"id": "w", "type": "number", "label": "Width", "min": 0, "max": 100, "step": 1, "defaultValue": 10},
            {"id": "h", "type": "number", "label": "Height", "min": 0, "max": 100, "step": 1, "defaultValue": 10},
            {"id": "c", "type": "colorpicker", "label": "Color", "defaultValue": "#000000"}
        ],
        "layout": [
            {"controlId": "on"},
            {"id": "size", "label": "Size", "controlIds": ["w", "h"]},
            {"id": "look", "label": "Look", "controlIds": ["c"]}
        ],
        "defaultSettings": {"w": 20}
    }"##;
    let source = Arc::new(MemorySource::new(vec![
        SourceRecord::new("r", "img").with_config(dsl),
    ]));
    let mut session = Session::new(&SessionConfig::default(), source);
    session.load().await;
    session.select_item(ItemIndex(0));

    let plan = session.render_plan();
    assert_eq!(plan.blocks.len(), 2);
    assert!(matches!(&plan.blocks[0], RenderBlock::Standalone(c) if c.config.id == "on"));
    match &plan.blocks[1] {
        RenderBlock::Accordion(groups) => {
            let ids: Vec<_> = groups.iter().map(|g| g.id.as_str()).collect();
            assert_eq!(ids, vec!["size", "look"]);
            assert!(groups.iter().all(|g| !g.expanded));
        }
        other => panic!("expected accordion, got {:?}", other),
    }
    assert_eq!(plan.control("w").unwrap().value, json!(20));

    session.dispatch(Action::ToggleGroup("size".into())).await;
    let plan = session.render_plan();
    let size = plan.groups().find(|g| g.id == "size").unwrap();
    assert!(size.expanded);
}
