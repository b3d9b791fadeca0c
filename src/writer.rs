// Output naming and the single write of the rendered report.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::OutputError;

const FALLBACK_STEM: &str = "snapshots";

/// `<input stem>_analysis_<YYYYMMDD_HHMMSS>.md`, stamped in local time.
pub fn default_output_name(input: &Path, now: DateTime<Local>) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_STEM.to_string());
    format!("{}_analysis_{}.md", stem, now.format("%Y%m%d_%H%M%S"))
}

/// Explicit path as given; otherwise the default name, inside `directory` when configured.
pub fn resolve_output_path(
    input: &Path,
    explicit: Option<&Path>,
    directory: Option<&Path>,
    now: DateTime<Local>,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let name = default_output_name(input, now);
    match directory {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

pub fn write_report(path: &Path, contents: &str) -> Result<(), OutputError> {
    std::fs::write(path, contents).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Create the configured report directory if missing.
pub fn ensure_directory(dir: &Path) -> Result<(), OutputError> {
    std::fs::create_dir_all(dir).map_err(|source| OutputError::Write {
        path: dir.to_path_buf(),
        source,
    })
}
