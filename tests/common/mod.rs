// Shared test helpers
#![allow(dead_code)]

use chrono::{DateTime, Local, TimeZone, Utc};
use serde_json::{Value, json};
use snapshot_report::models::SnapshotDocument;

/// Fixed clock so reports are reproducible.
pub fn fixed_utc() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap()
}

pub fn fixed_local() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap()
}

pub fn doc(value: Value) -> SnapshotDocument {
    serde_json::from_value(value).expect("snapshot document")
}

pub fn docs(value: Value) -> Vec<SnapshotDocument> {
    serde_json::from_value(value).expect("snapshot documents")
}

/// COMPLETE snapshot with one COMPLETE replica set carrying all metrics.
pub fn complete_snapshot(cluster: &str, epoch: i64, duration: f64) -> Value {
    json!({
        "state": "COMPLETE",
        "clusterName": cluster,
        "totalDuration": duration,
        "startTime": { "time": epoch, "inc": 1 },
        "snapshotsMetadata": [{
            "state": "COMPLETE",
            "numNewBytes": 2147483648u64,
            "dataBlockUploadDuration": 60,
            "transferSpeed": 35.5
        }]
    })
}

/// The single-snapshot example from the product documentation.
pub fn scenario_input() -> Value {
    json!([{
        "state": "COMPLETE",
        "clusterName": "A",
        "totalDuration": 120,
        "startTime": { "time": 1700000000 },
        "snapshotsMetadata": [{
            "state": "COMPLETE",
            "numNewBytes": 2147483648u64,
            "dataBlockUploadDuration": 60,
            "transferSpeed": 35.5
        }]
    }])
}
