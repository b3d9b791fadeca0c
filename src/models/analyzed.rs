// Derived records: one AnalyzedSnapshot per eligible document, grouped per cluster.

use std::fmt;

use crate::units::Quantity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupType {
    Full,
    Incremental,
}

impl BackupType {
    pub fn from_incremental(incremental: bool) -> Self {
        if incremental {
            BackupType::Incremental
        } else {
            BackupType::Full
        }
    }
}

impl fmt::Display for BackupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackupType::Full => "Full",
            BackupType::Incremental => "Incremental",
        })
    }
}

/// Metrics of one snapshot that passed the eligibility check. Raw values feed
/// statistics; the `Quantity` fields are what the table shows.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedSnapshot {
    pub snapshot_id: String,
    /// "Jan 05" style UTC date; `None` when the document has no usable timestamp.
    pub date: Option<String>,
    /// Epoch seconds, the sort key.
    pub epoch_time: Option<f64>,
    pub duration_seconds: Option<f64>,
    pub duration: Option<Quantity>,
    pub new_bytes: f64,
    pub new_bytes_display: Option<Quantity>,
    pub upload_seconds: f64,
    pub upload: Option<Quantity>,
    /// Mean of the positive per-replica-set speeds in MB/s, rounded to 1 decimal.
    pub transfer_speed: Option<f64>,
    pub backup_type: BackupType,
}

impl AnalyzedSnapshot {
    pub fn is_incremental(&self) -> bool {
        self.backup_type == BackupType::Incremental
    }
}

/// All analyzed snapshots of one cluster, most recent first.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterAnalysis {
    pub name: String,
    pub document_count: usize,
    pub snapshots: Vec<AnalyzedSnapshot>,
}
