use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a whole photo wall run.
#[derive(Debug, Error)]
pub enum PhotowallError {
    #[error("Source directory {} does not exist!", .0.display())]
    SourceDirNotFound(PathBuf),

    #[error("Failed to write manifest {}: {source}", .path.display())]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    ManifestSerialize(#[from] serde_json::Error),
}
