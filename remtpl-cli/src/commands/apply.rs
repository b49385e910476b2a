//! `remtpl apply`: fetch, render and write one template.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use remtpl_apply::{apply, ApplyOutcome};
use remtpl_core::{
    load_args_file, load_vars_file, parse_var_assignment, ModuleParams, Password,
    VarMap, PASSWORD_ENV,
};
use remtpl_fetch::HttpFetcher;

use super::FactArgs;
use crate::report::{ModuleResult, OutputFormat};

/// Arguments for `remtpl apply`.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// JSON or YAML file with module parameters; flags below override it.
    #[arg(long, value_name = "FILE")]
    pub args_file: Option<PathBuf>,

    /// Template URL (http or https).
    #[arg(long)]
    pub url: Option<String>,

    /// Destination file on this host.
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Basic-auth user name.
    #[arg(long)]
    pub username: Option<String>,

    /// Basic-auth password. Falls back to $REMTPL_PASSWORD, which is only
    /// used when a username is given.
    #[arg(long)]
    pub password: Option<String>,

    /// Template variable; repeatable. Values are parsed as YAML scalars.
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var_assignment)]
    pub vars: Vec<(String, Value)>,

    /// JSON or YAML mapping of template variables.
    #[arg(long, value_name = "FILE")]
    pub vars_file: Option<PathBuf>,

    #[command(flatten)]
    pub facts: FactArgs,

    /// Report what would change without writing anything.
    #[arg(long)]
    pub check: bool,

    /// Include before/after content and a unified diff in the result.
    #[arg(long)]
    pub diff: bool,

    /// HTTP timeout in seconds (0 or unset waits indefinitely).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Result format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

impl ApplyArgs {
    pub fn run(self) -> ExitCode {
        let format = self.format;
        let result = match self.execute() {
            Ok(outcome) => ModuleResult::success(outcome),
            Err(err) => {
                tracing::error!("{err:#}");
                ModuleResult::failure(&err)
            }
        };
        result.print(format);
        if result.is_failure() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }

    fn execute(self) -> Result<ApplyOutcome> {
        let base = match &self.args_file {
            Some(path) => load_args_file(path)
                .with_context(|| format!("failed to load args file {}", path.display()))?,
            None => ModuleParams::default(),
        };

        let mut vars = match &self.vars_file {
            Some(path) => load_vars_file(path)
                .with_context(|| format!("failed to load vars from {}", path.display()))?,
            None => VarMap::new(),
        };
        vars.extend(self.vars);

        let flags = ModuleParams {
            url: self.url,
            dest: self.dest,
            username: self.username,
            password: self.password.map(Password::from),
            vars: (!vars.is_empty()).then_some(Value::Object(vars)),
            check_mode: self.check,
            diff: self.diff,
            timeout_secs: self.timeout,
        };

        let env_password = std::env::var(PASSWORD_ENV).ok().map(Password::from);
        let (config, mode) = base
            .overlay(flags)
            .with_fallback_password(env_password)
            .validate()
            .context("invalid module parameters")?;
        let facts = self.facts.resolve()?;

        let fetcher = HttpFetcher::new(config.timeout);
        apply(&config, &facts, &fetcher, mode)
            .with_context(|| format!("failed to apply template to {}", config.dest.display()))
    }
}
