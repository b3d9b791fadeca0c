// Loader: file errors, malformed JSON, non-array input, tolerance of unread fields

use snapshot_report::error::InputError;
use snapshot_report::loader::{load_snapshots, parse_snapshots};
use tempfile::TempDir;

#[test]
fn test_loads_array_of_documents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapshotHistory.json");
    std::fs::write(
        &path,
        r#"[{"state":"COMPLETE","clusterName":"A"},{"state":"FAILED","rsId":"rs0","extra":true}]"#,
    )
    .unwrap();

    let docs = load_snapshots(&path).unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].cluster_name.as_deref(), Some("A"));
    assert_eq!(docs[1].rs_id.as_deref(), Some("rs0"));
}

#[test]
fn test_empty_array() {
    assert!(parse_snapshots(b"[]").unwrap().is_empty());
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");
    let err = load_snapshots(&path).unwrap_err();
    assert!(matches!(err, InputError::NotFound { .. }));
    assert!(err.to_string().contains("missing.json"));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_invalid_json_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "[{\"state\": ").unwrap();
    let err = load_snapshots(&path).unwrap_err();
    assert!(matches!(err, InputError::Malformed { .. }));
    assert!(err.to_string().starts_with("Invalid JSON in '"));
}

#[test]
fn test_top_level_object_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("object.json");
    std::fs::write(&path, r#"{"state":"COMPLETE"}"#).unwrap();
    assert!(matches!(
        load_snapshots(&path).unwrap_err(),
        InputError::Malformed { .. }
    ));
}

#[test]
fn test_directory_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = load_snapshots(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        InputError::Read { .. } | InputError::NotFound { .. }
    ));
}

#[test]
fn test_odd_values_in_unread_fields_still_load() {
    let docs = parse_snapshots(
        br#"[
            {"state":"FAILED","startTime":{"time":1,"inc":"x"}},
            {"state":"COMPLETE","clusterName":"A","lastUpdateTS":{"time":2,"inc":{"$timestamp":true}},
             "snapshotsMetadata":[{"state":"COMPLETE","rsId":7,"transferSpeed":3.5}]},
            {"state":"COMPLETE","clusterName":"B","dataSize":{"$numberDecimal":"12"}}
        ]"#,
    )
    .unwrap();

    assert_eq!(docs.len(), 3);
    assert_eq!(docs[0].epoch_time(), Some(1.0));
    assert_eq!(docs[1].epoch_time(), Some(2.0));
    assert_eq!(docs[1].metadata()[0].transfer_speed, Some(3.5));
    assert_eq!(docs[2].data_size, Some(12.0));
}
