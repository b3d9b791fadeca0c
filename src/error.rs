// Error types for the load → render → write pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Failures reading or parsing the snapshot history file. Nothing is written.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("File '{}' not found.", .path.display())]
    NotFound { path: PathBuf },

    #[error("Could not read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in '{}': {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure persisting a fully rendered report.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Could not write output file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Output(#[from] OutputError),
}
