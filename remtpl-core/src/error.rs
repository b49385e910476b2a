//! Error types for remtpl-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while resolving module parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required parameter was not supplied (or was empty).
    #[error("missing required parameter: {name}")]
    MissingParam { name: &'static str },

    /// `url` could not be parsed.
    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// `url` parsed but is not an HTTP(S) URL.
    #[error("unsupported url scheme '{scheme}' in '{url}'; expected http or https")]
    UnsupportedScheme { url: String, scheme: String },

    /// Only one half of the basic-auth pair was supplied.
    #[error("'{present}' was given without '{missing}'; basic auth needs both or neither")]
    IncompleteCredentials {
        present: &'static str,
        missing: &'static str,
    },

    /// `vars` was present but is not a mapping.
    #[error("vars must be a mapping, found {found}")]
    VarsNotMapping { found: &'static str },

    /// A `KEY=VALUE` assignment could not be split.
    #[error("invalid variable assignment '{assignment}'; expected KEY=VALUE")]
    InvalidVar { assignment: String },

    /// Filesystem failure reading an args or vars file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON/YAML parse error, with the offending file.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
