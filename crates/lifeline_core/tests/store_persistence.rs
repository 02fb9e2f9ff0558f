use chrono::{TimeZone, Utc};
use lifeline_core::{EventKind, ParsedDate, TimelineEvent, TimelineStore, STORE_VERSION};
use serde_json::Value;
use std::fs;

fn sample_event(id: i64, title: &str) -> TimelineEvent {
    let dt = Utc.with_ymd_and_hms(2021, 3, 14, 9, 0, 0).unwrap();
    TimelineEvent {
        id,
        date: "14/03/2021".to_string(),
        date_parsed: ParsedDate::from_datetime(&dt),
        kind: EventKind::Dating,
        title: title.to_string(),
        description: "Ăn tối cùng vợ yêu".to_string(),
        location: String::new(),
        witnesses: String::new(),
        documents: String::new(),
        images: Vec::new(),
    }
}

#[test]
fn save_then_load_round_trips_events_and_stamps_last_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("timeline.json");
    let store = TimelineStore::new(&path);

    let saved = store
        .save_events(vec![sample_event(1, "Ăn tối cùng vợ")])
        .unwrap();
    assert!(saved.last_saved.is_some());
    assert_eq!(saved.version, STORE_VERSION);

    let loaded = store.load_or_default();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.timeline_events[0].title, "Ăn tối cùng vợ");
}

#[test]
fn saved_file_uses_schema_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timeline.json");
    let store = TimelineStore::new(&path);
    store.save_events(vec![sample_event(7, "Title")]).unwrap();

    let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(value["lastSaved"].is_string());
    assert_eq!(value["version"], "1.0");
    let event = &value["timelineEvents"][0];
    assert_eq!(event["type"], "dating");
    assert!(event["dateParsed"]["date"].is_string());
    assert_eq!(event["dateParsed"]["format"], "DD/MM/YYYY");
}

#[test]
fn corrupt_store_degrades_to_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timeline.json");
    fs::write(&path, "][ definitely not json").unwrap();

    let store = TimelineStore::new(&path);
    let document = store.load_or_default();
    assert!(document.timeline_events.is_empty());
    assert_eq!(document.version, STORE_VERSION);
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timeline.json");
    let store = TimelineStore::new(&path);
    store.save_events(vec![sample_event(3, "t")]).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}
