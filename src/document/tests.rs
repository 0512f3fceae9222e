use std::fs;

use serde_json::json;

use crate::document::{DocState, Document};

#[test]
fn test_saved_file_round_trips() {
    let test_path = "/tmp/jed_test_save.json";
    fs::write(test_path, r#"{"name": "test", "value": 123}"#).unwrap();

    let mut doc = Document::load_file(test_path).unwrap();
    assert_eq!(doc.state(), DocState::Tree);
    assert!(!doc.is_modified());

    // Simulate an edit and save back.
    doc.replace(json!({"name": "test", "value": 123, "new_field": "hello"}));
    assert!(doc.is_modified());
    doc.save().unwrap();
    assert!(!doc.is_modified());

    let saved = fs::read_to_string(test_path).unwrap();
    fs::remove_file(test_path).ok();

    let reparsed: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(reparsed, *doc.value());
}

#[test]
fn test_import_failure_keeps_document() {
    let mut doc = Document::from_value(json!({"keep": true}));
    let err = doc.import_str("{not valid json");
    assert!(err.is_err());
    assert_eq!(*doc.value(), json!({"keep": true}));
}

#[test]
fn test_import_replaces_document() {
    let mut doc = Document::new();
    doc.import_str(r#"[1, 2, 3]"#).unwrap();
    assert_eq!(*doc.value(), json!([1, 2, 3]));
    assert!(doc.is_modified());
}

#[test]
fn test_doc_state_classification() {
    assert_eq!(Document::from_value(json!({})).state(), DocState::Empty);
    assert_eq!(Document::from_value(json!([])).state(), DocState::Empty);
    assert_eq!(Document::from_value(json!({"a": 1})).state(), DocState::Tree);
    assert_eq!(Document::from_value(json!([0])).state(), DocState::Tree);
    assert_eq!(Document::from_value(json!(42)).state(), DocState::InvalidRoot);
    assert_eq!(Document::from_value(json!("s")).state(), DocState::InvalidRoot);
    assert_eq!(Document::from_value(json!(null)).state(), DocState::InvalidRoot);
}

#[test]
fn test_export_timestamped_writes_pretty_json() {
    let mut doc = Document::from_value(json!({"a": [1, 2]}));
    let path = doc.export_timestamped(&std::env::temp_dir()).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();

    assert!(path.starts_with(std::env::temp_dir()));
    assert!(path.to_string_lossy().ends_with(".json"));
    // Pretty form: multi-line with 2-space indent.
    assert!(text.contains("\n  \"a\""));
    let reparsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed, json!({"a": [1, 2]}));
}
