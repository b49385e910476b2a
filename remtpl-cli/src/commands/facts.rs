//! `remtpl facts`: print the fact mapping templates are rendered with.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use super::FactArgs;

/// Arguments for `remtpl facts`.
#[derive(Args, Debug)]
pub struct FactsArgs {
    #[command(flatten)]
    pub facts: FactArgs,

    /// Print only facts whose name starts with this prefix.
    #[arg(long, value_name = "PREFIX")]
    pub filter: Option<String>,
}

impl FactsArgs {
    pub fn run(self) -> ExitCode {
        match self.execute() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        }
    }

    fn execute(self) -> Result<()> {
        let mut facts = self.facts.resolve()?;
        if let Some(prefix) = &self.filter {
            facts.retain(|name, _| name.starts_with(prefix.as_str()));
        }
        let json = serde_json::to_string_pretty(&facts).context("failed to serialize facts")?;
        println!("{json}");
        Ok(())
    }
}
