//! Result documents printed by `remtpl apply`.
//!
//! Success:
//!
//! ```json
//! {"msg": "...", "changed": true, "status_code": 200, "dest": "...", "checksum": "..."}
//! ```
//!
//! Failure:
//!
//! ```json
//! {"failed": true, "msg": "..."}
//! ```

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use remtpl_apply::{ApplyOutcome, ContentDiff};

/// How `apply` prints its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON document on stdout, for the invoking framework.
    #[default]
    Json,
    /// Human-readable summary.
    Text,
}

/// Status code reported on success, independent of the HTTP status.
const STATUS_OK: u16 = 200;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ModuleResult {
    Success {
        msg: String,
        changed: bool,
        status_code: u16,
        dest: String,
        checksum: String,
        http_status: u16,
        #[serde(skip_serializing_if = "Option::is_none")]
        diff: Option<ContentDiff>,
    },
    Failure {
        failed: bool,
        msg: String,
    },
}

impl ModuleResult {
    pub fn success(outcome: ApplyOutcome) -> Self {
        let dest = outcome.dest.display().to_string();
        let msg = match (outcome.written, outcome.changed) {
            (false, true) => format!("{dest} would be changed"),
            (false, false) => format!("{dest} is up to date"),
            (true, true) => format!("{dest} updated"),
            (true, false) => format!("{dest} rewritten, content unchanged"),
        };
        ModuleResult::Success {
            msg,
            changed: outcome.changed,
            status_code: STATUS_OK,
            dest,
            checksum: outcome.fingerprint_after,
            http_status: outcome.http_status,
            diff: outcome.diff,
        }
    }

    pub fn failure(err: &anyhow::Error) -> Self {
        ModuleResult::Failure {
            failed: true,
            msg: format!("{err:#}"),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ModuleResult::Failure { .. })
    }

    pub fn print(&self, format: OutputFormat) {
        match format {
            OutputFormat::Json => match serde_json::to_string(self) {
                Ok(json) => println!("{json}"),
                Err(e) => println!(r#"{{"failed": true, "msg": "result serialization failed: {e}"}}"#),
            },
            OutputFormat::Text => self.print_text(),
        }
    }

    fn print_text(&self) {
        match self {
            ModuleResult::Success {
                msg, changed, diff, ..
            } => {
                let mark = if *changed { "✎".green() } else { "·".dimmed() };
                println!("{mark} {msg}");
                if let Some(diff) = diff {
                    print!("{}", diff.unified);
                    if !diff.unified.is_empty() && !diff.unified.ends_with('\n') {
                        println!();
                    }
                }
            }
            ModuleResult::Failure { msg, .. } => println!("{} {msg}", "✗".red()),
        }
    }
}
