use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CollectorError>;

/// Run-level failures. Per-anchor search failures never surface here; they
/// are absorbed by the runner as [`crate::search::SearchFailure`].
#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CollectorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CollectorError::Io {
            path: path.into(),
            source,
        }
    }
}
