//! Change detection against the current destination, plus unified diffs for
//! diff mode.

use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use similar::TextDiff;

use crate::error::{io_err, ApplyError};
use crate::fingerprint::fingerprint;

/// Result of comparing the destination with freshly rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeReport {
    /// `true` when the destination is absent or its fingerprint differs.
    pub changed: bool,
    /// Current destination content (lossy UTF-8), if the file exists.
    pub before: Option<String>,
    pub fingerprint_before: Option<String>,
    pub fingerprint_after: String,
}

/// Before/after snapshot shown in diff mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentDiff {
    pub before: String,
    pub after: String,
    pub before_header: String,
    pub after_header: String,
    pub unified: String,
}

/// Compare `rendered` with what is currently at `dest`.
///
/// Advisory only: callers write regardless of the answer.
pub fn detect_change(dest: &Path, rendered: &str) -> Result<ChangeReport, ApplyError> {
    let fingerprint_after = fingerprint(rendered);

    let Some(existing) = read_existing(dest)? else {
        tracing::debug!("{} does not exist yet", dest.display());
        return Ok(ChangeReport {
            changed: true,
            before: None,
            fingerprint_before: None,
            fingerprint_after,
        });
    };

    let fingerprint_before = fingerprint(&existing);
    let changed = fingerprint_before != fingerprint_after;
    tracing::debug!(
        "{}: {} -> {} (changed: {changed})",
        dest.display(),
        fingerprint_before,
        fingerprint_after
    );

    Ok(ChangeReport {
        changed,
        before: Some(String::from_utf8_lossy(&existing).into_owned()),
        fingerprint_before: Some(fingerprint_before),
        fingerprint_after,
    })
}

/// Build the diff-mode payload. An absent destination diffs as empty.
pub fn content_diff(dest: &Path, before: Option<&str>, after: &str) -> ContentDiff {
    let before = before.unwrap_or_default();
    let before_header = format!("before: {}", dest.display());
    let after_header = format!("after: {}", dest.display());
    let unified = TextDiff::from_lines(before, after)
        .unified_diff()
        .header(&before_header, &after_header)
        .context_radius(3)
        .to_string();

    ContentDiff {
        before: before.to_string(),
        after: after.to_string(),
        before_header,
        after_header,
        unified,
    }
}

fn read_existing(path: &Path) -> Result<Option<Vec<u8>>, ApplyError> {
    match std::fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}
