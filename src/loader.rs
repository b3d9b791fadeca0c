// Reads a snapshot history export (a JSON array of snapshot documents) into memory.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::InputError;
use crate::models::SnapshotDocument;

pub fn load_snapshots(path: &Path) -> Result<Vec<SnapshotDocument>, InputError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => InputError::NotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    parse_snapshots(&bytes).map_err(|source| InputError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse an in-memory export. Anything but a top-level array is rejected.
pub fn parse_snapshots(bytes: &[u8]) -> Result<Vec<SnapshotDocument>, serde_json::Error> {
    serde_json::from_slice(bytes)
}
