pub mod apply;
pub mod facts;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use remtpl_facts::{collect_host_facts, load_facts_file, merge_facts, Facts};

/// Fact sources shared by `apply` and `facts`.
#[derive(Args, Debug)]
pub struct FactArgs {
    /// JSON or YAML mapping of facts supplied by the caller; overrides host facts.
    #[arg(long, value_name = "FILE")]
    pub facts_file: Option<PathBuf>,

    /// Do not collect facts from this host.
    #[arg(long)]
    pub no_host_facts: bool,
}

impl FactArgs {
    /// Host facts (unless disabled) overlaid with the facts file (if any).
    pub fn resolve(&self) -> Result<Facts> {
        let collected = if self.no_host_facts {
            Facts::new()
        } else {
            collect_host_facts().context("failed to collect host facts")?
        };

        let supplied = match &self.facts_file {
            Some(path) => load_facts_file(path)
                .with_context(|| format!("failed to load facts from {}", path.display()))?,
            None => Facts::new(),
        };

        Ok(merge_facts(collected, supplied))
    }
}
