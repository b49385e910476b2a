//! Single-run pipeline: fetch → merge context → render → detect change → write.

use std::path::PathBuf;

use serde::Serialize;

use remtpl_core::{RemoteTemplate, RunMode, VarMap};
use remtpl_fetch::TemplateSource;
use remtpl_renderer::{RenderContext, TemplateEngine};

use crate::diff::{content_diff, detect_change, ContentDiff};
use crate::error::ApplyError;
use crate::writer::write_rendered;

/// What an apply run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyOutcome {
    pub dest: PathBuf,
    /// Whether the destination content differs from what was there before.
    pub changed: bool,
    /// Whether the destination was written (always, except in check mode).
    pub written: bool,
    /// Status of the HTTP response the template came from.
    pub http_status: u16,
    pub fingerprint_before: Option<String>,
    pub fingerprint_after: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<ContentDiff>,
}

/// Run the whole pipeline once.
///
/// The first failing step halts the run; nothing is written unless fetch and
/// render both succeed. Outside check mode the destination is rewritten even
/// when its content is unchanged.
pub fn apply(
    config: &RemoteTemplate,
    facts: &VarMap,
    source: &dyn TemplateSource,
    mode: RunMode,
) -> Result<ApplyOutcome, ApplyError> {
    let fetched = source.fetch(&config.url, config.credentials.as_ref())?;

    let ctx = RenderContext::merge(facts, &config.vars);
    let rendered = TemplateEngine::from_source(&fetched.body)?.render(&ctx)?;

    let report = detect_change(&config.dest, &rendered)?;
    let diff = mode
        .diff
        .then(|| content_diff(&config.dest, report.before.as_deref(), &rendered));

    let written = if mode.check {
        tracing::info!("[check] would write: {}", config.dest.display());
        false
    } else {
        write_rendered(&config.dest, &rendered)?;
        true
    };

    Ok(ApplyOutcome {
        dest: config.dest.clone(),
        changed: report.changed,
        written,
        http_status: fetched.status,
        fingerprint_before: report.fingerprint_before,
        fingerprint_after: report.fingerprint_after,
        diff,
    })
}
