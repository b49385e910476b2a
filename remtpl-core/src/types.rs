//! Domain types for a single remote-template invocation.
//!
//! Everything here is transient: built once from the module parameters,
//! read by the pipeline, dropped when the process exits.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// String-keyed mapping of arbitrary JSON-compatible values.
///
/// Used for facts, user `vars` and the merged render context alike.
pub type VarMap = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A basic-auth password. Never printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// The clear-text secret, for building the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for Password {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Password {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// HTTP basic-auth credential pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Password,
}

/// Validated, immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct RemoteTemplate {
    /// Where the template source is fetched from (http or https).
    pub url: Url,
    /// Local file the rendered output is written to.
    pub dest: PathBuf,
    /// Basic-auth credentials; `None` means an unauthenticated request.
    pub credentials: Option<Credentials>,
    /// User variables; these win over facts on key collision.
    pub vars: VarMap,
    /// Request timeout. `None` blocks until the server answers.
    pub timeout: Option<Duration>,
}

/// How the pipeline should behave beyond the basic fetch/render/write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunMode {
    /// Dry run: detect and report, but never touch the filesystem.
    pub check: bool,
    /// Include before/after content and a unified diff in the report.
    pub diff: bool,
}
