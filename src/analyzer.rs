// Per-document eligibility and metric extraction.
//
// A snapshot counts only when it is COMPLETE and every replica-set entry is
// COMPLETE too; one unfinished replica set drops the whole snapshot.

use std::fmt;

use chrono::DateTime;
use serde::Deserialize;
use tracing::debug;

use crate::models::{AnalyzedSnapshot, BackupType, ClusterAnalysis, SnapshotDocument, nonzero};
use crate::stats;
use crate::units::{UnitScheme, round_to};

/// How strictly a COMPLETE snapshot must carry a duration to be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EligibilityPolicy {
    /// Accept snapshots without `totalDuration` when a replica set reports transfer metrics.
    #[default]
    Permissive,
    /// Require a non-zero `totalDuration`.
    Strict,
}

impl fmt::Display for EligibilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EligibilityPolicy::Permissive => "permissive",
            EligibilityPolicy::Strict => "strict",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalysisSettings {
    pub policy: EligibilityPolicy,
    pub units: UnitScheme,
}

/// Why a document was left out of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    NotComplete,
    NoDataSize,
    MissingDuration,
    NoMetadata,
    IncompleteReplicaSet,
    NoMetrics,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Exclusion::NotComplete => "snapshot state is not COMPLETE",
            Exclusion::NoDataSize => "no dataSize and no totalDuration",
            Exclusion::MissingDuration => "totalDuration missing or zero",
            Exclusion::NoMetadata => "snapshotsMetadata is empty",
            Exclusion::IncompleteReplicaSet => "a replica set is not COMPLETE",
            Exclusion::NoMetrics => "no transfer metrics and no totalDuration",
        })
    }
}

/// Checks run in order; the first failure is returned.
pub fn check_eligibility(
    doc: &SnapshotDocument,
    policy: EligibilityPolicy,
) -> Result<(), Exclusion> {
    if !doc.is_complete() {
        return Err(Exclusion::NotComplete);
    }

    if policy == EligibilityPolicy::Strict {
        if nonzero(doc.data_size).is_none() && doc.total_duration.is_none() {
            return Err(Exclusion::NoDataSize);
        }
        if nonzero(doc.total_duration).is_none() {
            return Err(Exclusion::MissingDuration);
        }
    }

    let metadata = doc.metadata();
    if metadata.is_empty() {
        return Err(Exclusion::NoMetadata);
    }
    if metadata.iter().any(|rs| !rs.is_complete()) {
        return Err(Exclusion::IncompleteReplicaSet);
    }

    if policy == EligibilityPolicy::Permissive
        && doc.total_duration.is_none()
        && !metadata.iter().any(|rs| rs.has_metrics())
    {
        return Err(Exclusion::NoMetrics);
    }

    Ok(())
}

/// Eligibility check, then aggregation over the COMPLETE replica-set entries.
pub fn analyze_snapshot(
    doc: &SnapshotDocument,
    settings: &AnalysisSettings,
) -> Result<AnalyzedSnapshot, Exclusion> {
    check_eligibility(doc, settings.policy)?;

    let mut new_bytes = 0.0;
    let mut upload_seconds = 0.0;
    let mut speeds = Vec::new();
    for rs in doc.metadata().iter().filter(|rs| rs.is_complete()) {
        new_bytes += rs.new_bytes().unwrap_or(0.0);
        upload_seconds += nonzero(rs.data_block_upload_duration).unwrap_or(0.0);
        if let Some(speed) = rs.transfer_speed.filter(|s| *s > 0.0) {
            speeds.push(speed);
        }
    }

    let transfer_speed = stats::summarize(speeds)
        .map(|s| round_to(s.avg, 1))
        .filter(|s| *s != 0.0);
    let epoch_time = doc.epoch_time();
    let units = settings.units;

    Ok(AnalyzedSnapshot {
        snapshot_id: doc.snapshot_id(),
        date: epoch_time.and_then(epoch_to_date),
        epoch_time,
        duration_seconds: doc.total_duration,
        duration: units.duration(doc.total_duration),
        new_bytes,
        new_bytes_display: units.bytes(Some(new_bytes)),
        upload_seconds,
        upload: units.duration(Some(upload_seconds)),
        transfer_speed,
        backup_type: BackupType::from_incremental(doc.is_incremental()),
    })
}

/// UTC "Mon DD" (e.g. "Jan 05"); `None` when the epoch is not representable.
pub fn epoch_to_date(epoch_seconds: f64) -> Option<String> {
    if !epoch_seconds.is_finite() {
        return None;
    }
    let secs = epoch_seconds.floor();
    let nanos = ((epoch_seconds - secs) * 1e9) as u32;
    DateTime::from_timestamp(secs as i64, nanos.min(999_999_999))
        .map(|dt| dt.format("%b %d").to_string())
}

/// Analyze every document of one cluster; result is sorted most recent first,
/// documents without a timestamp ordered as epoch 0.
pub fn analyze_cluster(
    name: &str,
    docs: &[SnapshotDocument],
    settings: &AnalysisSettings,
) -> ClusterAnalysis {
    let mut snapshots = Vec::with_capacity(docs.len());
    for doc in docs {
        match analyze_snapshot(doc, settings) {
            Ok(s) => snapshots.push(s),
            Err(reason) => {
                debug!(cluster = %name, snapshot = %doc.snapshot_id(), %reason, "snapshot excluded");
            }
        }
    }

    snapshots.sort_by(|a, b| {
        let a = a.epoch_time.unwrap_or(0.0);
        let b = b.epoch_time.unwrap_or(0.0);
        b.total_cmp(&a)
    });

    debug!(
        cluster = %name,
        documents = docs.len(),
        analyzed = snapshots.len(),
        "cluster analyzed"
    );

    ClusterAnalysis {
        name: name.to_string(),
        document_count: docs.len(),
        snapshots,
    }
}
