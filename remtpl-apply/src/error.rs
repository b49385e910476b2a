//! Error types for remtpl-apply.

use std::path::PathBuf;

use thiserror::Error;

use remtpl_fetch::FetchError;
use remtpl_renderer::RenderError;

/// All errors that can halt an apply run.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// The template could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The template could not be parsed or rendered.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`ApplyError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ApplyError {
    ApplyError::Io {
        path: path.into(),
        source,
    }
}
