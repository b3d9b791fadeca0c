// Input records: one snapshot document per backup attempt, with per-replica-set metadata.
// Every field is optional; unknown fields are ignored.

use std::fmt;

use serde::Deserialize;

use super::number;

/// Value of `state` on a finished snapshot or replica-set entry.
pub const STATE_COMPLETE: &str = "COMPLETE";

/// BSON timestamp as exported: `{"time": <epoch seconds>, "inc": <ordinal>}`.
/// Only `time` is read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BsonTimestamp {
    #[serde(default, deserialize_with = "number::optional")]
    pub time: Option<f64>,
}

/// `_id` / `clustershotId`: either an Extended JSON ObjectId, a string, or anything else.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    ObjectId {
        #[serde(rename = "$oid")]
        oid: String,
    },
    Text(String),
    Other(serde_json::Value),
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::ObjectId { oid } => f.write_str(oid),
            DocumentId::Text(s) => f.write_str(s),
            DocumentId::Other(v) => write!(f, "{}", v),
        }
    }
}

/// One replica set's contribution to a snapshot (an entry of `snapshotsMetadata`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaSetMetadata {
    pub state: Option<String>,
    #[serde(default, deserialize_with = "number::optional")]
    pub num_new_bytes: Option<f64>,
    #[serde(default, deserialize_with = "number::optional")]
    pub num_new_compressed_bytes: Option<f64>,
    #[serde(default, deserialize_with = "number::optional")]
    pub data_block_upload_duration: Option<f64>,
    /// MB/s.
    #[serde(default, deserialize_with = "number::optional")]
    pub transfer_speed: Option<f64>,
}

impl ReplicaSetMetadata {
    pub fn is_complete(&self) -> bool {
        self.state.as_deref() == Some(STATE_COMPLETE)
    }

    /// `numNewBytes` when non-zero, else `numNewCompressedBytes` when non-zero.
    pub fn new_bytes(&self) -> Option<f64> {
        nonzero(self.num_new_bytes).or_else(|| nonzero(self.num_new_compressed_bytes))
    }

    /// True when any transfer metric carries a non-zero value.
    pub fn has_metrics(&self) -> bool {
        [
            self.num_new_bytes,
            self.num_new_compressed_bytes,
            self.data_block_upload_duration,
            self.transfer_speed,
        ]
        .into_iter()
        .any(|v| nonzero(v).is_some())
    }
}

/// One entry of the snapshot history export.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDocument {
    #[serde(rename = "_id")]
    pub id: Option<DocumentId>,
    pub clustershot_id: Option<DocumentId>,
    pub state: Option<String>,
    pub cluster_name: Option<String>,
    pub rs_id: Option<String>,
    /// Seconds.
    #[serde(default, deserialize_with = "number::optional")]
    pub total_duration: Option<f64>,
    pub start_time: Option<BsonTimestamp>,
    #[serde(rename = "lastUpdateTS")]
    pub last_update_ts: Option<BsonTimestamp>,
    pub incremental_backup: Option<bool>,
    pub snapshots_metadata: Option<Vec<ReplicaSetMetadata>>,
    #[serde(default, deserialize_with = "number::optional")]
    pub data_size: Option<f64>,
}

impl SnapshotDocument {
    pub fn is_complete(&self) -> bool {
        self.state.as_deref() == Some(STATE_COMPLETE)
    }

    pub fn is_incremental(&self) -> bool {
        self.incremental_backup.unwrap_or(false)
    }

    pub fn metadata(&self) -> &[ReplicaSetMetadata] {
        self.snapshots_metadata.as_deref().unwrap_or_default()
    }

    /// Epoch seconds of `startTime`, falling back to `lastUpdateTS`.
    pub fn epoch_time(&self) -> Option<f64> {
        self.start_time
            .as_ref()
            .and_then(|t| t.time)
            .or_else(|| self.last_update_ts.as_ref().and_then(|t| t.time))
    }

    /// `clustershotId`, then `_id`, then "N/A".
    pub fn snapshot_id(&self) -> String {
        self.clustershot_id
            .as_ref()
            .or(self.id.as_ref())
            .map(ToString::to_string)
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// Present and non-zero; NaN and infinities count as absent.
pub fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}
