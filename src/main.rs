use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use snapshot_report::analyzer::EligibilityPolicy;
use snapshot_report::config::AppConfig;
use snapshot_report::pipeline::{self, RunOptions};
use snapshot_report::units::UnitScheme;
use snapshot_report::version;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "snapshot-report",
    about = "Summarize Ops Manager snapshot history as a Markdown report",
    after_help = "If OUTPUT is omitted it is derived from the input name, e.g.\n  snapshotHistory.json -> snapshotHistory_analysis_20240105_093000.md",
    version
)]
struct Cli {
    /// Snapshot history export (JSON array of snapshot documents)
    input: PathBuf,

    /// Report path
    output: Option<PathBuf>,

    /// Which COMPLETE snapshots are reported (overrides config)
    #[arg(long, value_enum)]
    policy: Option<EligibilityPolicy>,

    /// Unit set for durations and byte counts (overrides config)
    #[arg(long, value_enum)]
    units: Option<UnitScheme>,

    /// TOML config file (default: $CONFIG_FILE, if set)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        tracing::debug!(error = ?e, "run failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let app_config = AppConfig::load(cli.config.as_deref())?;
    let mut settings = app_config.settings();
    if let Some(policy) = cli.policy {
        settings.policy = policy;
    }
    if let Some(units) = cli.units {
        settings.units = units;
    }

    tracing::info!(
        input = %cli.input.display(),
        policy = %settings.policy,
        units = %settings.units,
        "{} starting",
        version::banner()
    );

    let summary = pipeline::run(
        &RunOptions {
            input: cli.input,
            output: cli.output,
            output_directory: app_config.output_directory().map(PathBuf::from),
            settings,
        },
        chrono::Local::now(),
    )?;

    println!("Analysis complete!");
    println!("Input file:  {}", summary.input.display());
    println!("Output file: {}", summary.output.display());
    println!("Clusters analyzed: {}", summary.cluster_count);
    println!("Total snapshots: {}", summary.document_count);
    Ok(())
}
