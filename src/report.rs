// Markdown rendering: header, one section per cluster (table + statistics), legend.
//
// Lines are joined with '\n'; a cluster section starts with an empty line so
// it stands apart from whatever precedes it.

use chrono::{DateTime, Utc};

use crate::models::{AnalyzedSnapshot, ClusterAnalysis, nonzero};
use crate::stats::{Summary, summarize};
use crate::units::{UnitScheme, format_number, round_to};

pub const TITLE: &str = "# Snapshot History Analysis Report";
const NOT_AVAILABLE: &str = "N/A";
const TABLE_HEADER: &str =
    "| Date | Duration | Type | numNewBytes | Data Upload Time | Transfer Speed | clustershotId |";
const TABLE_RULE: &str =
    "|------|----------|------|-------------|------------------|----------------|---------------|";

/// Values that only appear in the report header.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Input path as the user gave it.
    pub source: &'a str,
    pub generated_at: DateTime<Utc>,
    /// Number of documents in the input, eligible or not.
    pub document_count: usize,
    pub units: UnitScheme,
}

pub fn render_report(ctx: &ReportContext<'_>, clusters: &[ClusterAnalysis]) -> String {
    let mut out = vec![
        TITLE.to_string(),
        format!(
            "\nGenerated: {}",
            ctx.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        format!("\nSource file: {}", ctx.source),
        format!("\nTotal clusters found: {}", clusters.len()),
        format!("Total snapshots analyzed: {}", ctx.document_count),
    ];

    for cluster in clusters {
        out.push(render_cluster(cluster, ctx.units));
    }

    out.extend(legend(ctx.source));
    out.push(String::new());
    out.join("\n")
}

pub fn render_cluster(cluster: &ClusterAnalysis, units: UnitScheme) -> String {
    if cluster.snapshots.is_empty() {
        return format!(
            "\n### Cluster: {}\n\nNo detailed backup metrics available for this cluster.\n",
            cluster.name
        );
    }

    let mut out = vec![
        format!("\n### Cluster: {}", cluster.name),
        format!(
            "\nTotal snapshots with detailed metrics: {}",
            cluster.snapshots.len()
        ),
        String::new(),
        TABLE_HEADER.to_string(),
        TABLE_RULE.to_string(),
    ];
    out.extend(cluster.snapshots.iter().map(render_row));

    out.push(String::new());
    out.push("#### Statistics".to_string());
    out.push(String::new());

    let (incremental, full): (Vec<&AnalyzedSnapshot>, Vec<&AnalyzedSnapshot>) =
        cluster.snapshots.iter().partition(|s| s.is_incremental());

    if !incremental.is_empty() {
        out.push(format!(
            "**Incremental Backups ({} snapshots):**",
            incremental.len()
        ));
        out.extend(duration_line(&incremental, units));
        out.extend(bytes_line(&incremental, units));
        out.extend(speed_line(&incremental));
        out.push(String::new());
    }

    if !full.is_empty() {
        out.push(format!("**Full Backups ({} snapshots):**", full.len()));
        out.extend(duration_line(&full, units));
        out.extend(speed_line(&full));
        out.push(String::new());
    }

    out.join("\n")
}

fn render_row(s: &AnalyzedSnapshot) -> String {
    format!(
        "| {} | {} | {} | {} | {} | {} | {} |",
        s.date.as_deref().unwrap_or(NOT_AVAILABLE),
        cell(s.duration),
        s.backup_type,
        cell(s.new_bytes_display),
        cell(s.upload),
        s.transfer_speed
            .map(|v| format!("{} MB/s", format_number(v)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        s.snapshot_id,
    )
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn duration_line(snapshots: &[&AnalyzedSnapshot], units: UnitScheme) -> Option<String> {
    let summary = summarize(
        snapshots
            .iter()
            .filter_map(|s| nonzero(s.duration_seconds))
            .map(|secs| units.duration_basis(secs))
            .filter(|v| *v != 0.0),
    )?;
    Some(format!(
        "- Duration: {}",
        min_max_avg(&summary, |v| units.duration_from_basis(v).to_string())
    ))
}

fn bytes_line(snapshots: &[&AnalyzedSnapshot], units: UnitScheme) -> Option<String> {
    let summary = summarize(
        snapshots
            .iter()
            .filter_map(|s| nonzero(Some(s.new_bytes)))
            .map(|bytes| units.bytes_basis(bytes))
            .filter(|v| *v != 0.0),
    )?;
    Some(format!(
        "- Data transferred (numNewBytes): {}",
        min_max_avg(&summary, |v| units.bytes_from_basis(v).to_string())
    ))
}

/// Speeds are the per-snapshot rounded averages; only the overall mean is rounded again.
fn speed_line(snapshots: &[&AnalyzedSnapshot]) -> Option<String> {
    let summary = summarize(snapshots.iter().filter_map(|s| s.transfer_speed))?;
    Some(format!(
        "- Transfer speed: Min {} MB/s, Max {} MB/s, Avg {} MB/s",
        format_number(summary.min),
        format_number(summary.max),
        format_number(round_to(summary.avg, 1))
    ))
}

fn min_max_avg(summary: &Summary, show: impl Fn(f64) -> String) -> String {
    format!(
        "Min {}, Max {}, Avg {}",
        show(summary.min),
        show(summary.max),
        show(summary.avg)
    )
}

/// Single-quotes a path for the shell unless it is made only of safe characters.
fn shell_quote(path: &str) -> String {
    let safe = !path.is_empty()
        && path.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '/' | ':' | '@' | '+' | ',')
        });
    if safe {
        path.to_string()
    } else {
        format!("'{}'", path.replace('\'', "'\\''"))
    }
}

fn legend(file: &str) -> Vec<String> {
    let quoted = shell_quote(file);
    vec![
        "\n---".to_string(),
        "\n### Metrics Explanation".to_string(),
        String::new(),
        "- **Duration**: Total time taken for the backup to complete".to_string(),
        "- **Type**: Incremental (only changed data) or Full (complete backup)".to_string(),
        "- **numNewBytes**: Total number of new or modified bytes transferred during the backup. \
         This is the data payload the backup agent reads from the WiredTiger checkpoint and sends \
         to Ops Manager, which uploads it to backup storage. Higher values mean more data changed \
         since the previous snapshot and usually longer backups. Replica sets that only report \
         numNewCompressedBytes contribute that value instead."
            .to_string(),
        "- **Data Upload Time**: Time spent uploading data blocks to backup storage, summed over replica sets"
            .to_string(),
        "- **Transfer Speed**: Average data transfer rate during the backup, over replica sets that reported one"
            .to_string(),
        format!(
            "- **clustershotId**: Unique identifier for the snapshot entry. Use this to locate the \
             corresponding document in {} for validation or detailed analysis.",
            file
        ),
        String::new(),
        "### How to Validate Entries".to_string(),
        String::new(),
        format!(
            "To find a specific snapshot entry in {} using clustershotId, run:",
            file
        ),
        "```bash".to_string(),
        format!(
            "jq '.[] | select(.clustershotId == \"<clustershotId>\")' {}",
            quoted
        ),
        "```".to_string(),
        String::new(),
        "For replica set snapshots (without clustershotId), use _id:".to_string(),
        "```bash".to_string(),
        format!(
            "jq '.[] | select((._id.\"$oid\"? // ._id) == \"<_id>\")' {}",
            quoted
        ),
        "```".to_string(),
    ]
}
