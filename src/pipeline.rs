// One run: load → group → analyze → render → write. Nothing is written unless
// the whole report was built.

use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};
use tracing::info;

use crate::analyzer::{AnalysisSettings, analyze_cluster};
use crate::classify::group_by_cluster;
use crate::error::Error;
use crate::loader::load_snapshots;
use crate::models::{ClusterAnalysis, SnapshotDocument};
use crate::report::{ReportContext, render_report};
use crate::writer;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    /// Explicit report path; auto-named when `None`.
    pub output: Option<PathBuf>,
    /// Directory for auto-named reports.
    pub output_directory: Option<PathBuf>,
    pub settings: AnalysisSettings,
}

/// Rendered report plus the counts printed after a run.
#[derive(Debug, Clone)]
pub struct Report {
    pub markdown: String,
    pub cluster_count: usize,
    pub document_count: usize,
    pub analyzed_count: usize,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub cluster_count: usize,
    pub document_count: usize,
    pub analyzed_count: usize,
}

/// Pure part of the pipeline; `generated_at` is injected so output is reproducible.
pub fn build_report(
    source: &str,
    docs: Vec<SnapshotDocument>,
    settings: &AnalysisSettings,
    generated_at: DateTime<Utc>,
) -> Report {
    let document_count = docs.len();
    let clusters: Vec<ClusterAnalysis> = group_by_cluster(docs)
        .iter()
        .map(|(name, docs)| analyze_cluster(name, docs, settings))
        .collect();
    let analyzed_count = clusters.iter().map(|c| c.snapshots.len()).sum();

    let ctx = ReportContext {
        source,
        generated_at,
        document_count,
        units: settings.units,
    };
    Report {
        markdown: render_report(&ctx, &clusters),
        cluster_count: clusters.len(),
        document_count,
        analyzed_count,
    }
}

pub fn run(opts: &RunOptions, now: DateTime<Local>) -> Result<RunSummary, Error> {
    let docs = load_snapshots(&opts.input)?;
    info!(documents = docs.len(), input = %opts.input.display(), "snapshot history loaded");

    let source = opts.input.display().to_string();
    let report = build_report(&source, docs, &opts.settings, now.with_timezone(&Utc));

    let output = writer::resolve_output_path(
        &opts.input,
        opts.output.as_deref(),
        opts.output_directory.as_deref(),
        now,
    );
    if let (None, Some(dir)) = (&opts.output, opts.output_directory.as_deref()) {
        writer::ensure_directory(dir)?;
    }
    writer::write_report(&output, &report.markdown)?;
    info!(
        output = %output.display(),
        clusters = report.cluster_count,
        analyzed = report.analyzed_count,
        "report written"
    );

    Ok(RunSummary {
        input: opts.input.clone(),
        output,
        cluster_count: report.cluster_count,
        document_count: report.document_count,
        analyzed_count: report.analyzed_count,
    })
}
