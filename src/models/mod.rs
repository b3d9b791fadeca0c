// Domain models: snapshot history input and analyzed output

mod analyzed;
mod number;
mod snapshot;

pub use analyzed::{AnalyzedSnapshot, BackupType, ClusterAnalysis};
pub use snapshot::{
    BsonTimestamp, DocumentId, ReplicaSetMetadata, STATE_COMPLETE, SnapshotDocument, nonzero,
};
