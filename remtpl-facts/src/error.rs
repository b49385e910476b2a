use std::path::PathBuf;

use thiserror::Error;

/// Errors from fact collection and facts-file loading.
#[derive(Debug, Error)]
pub enum FactError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("facts file {path} must contain a mapping of fact name to value")]
    NotMapping { path: PathBuf },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> FactError {
    FactError::Io {
        path: path.into(),
        source,
    }
}
