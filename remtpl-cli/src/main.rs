//! remtpl: render a remote template onto the local host.
//!
//! # Usage
//!
//! ```text
//! remtpl apply --url <url> --dest <path> [--username <u> --password <p>] [--var KEY=VALUE]...
//! remtpl apply --args-file <file> [--check] [--diff]
//! remtpl facts [--facts-file <file>] [--no-host-facts]
//! ```
//!
//! `apply` prints one JSON result document on stdout and exits non-zero on
//! failure. Logs go to stderr (`REMTPL_LOG`, or `-v` / `-vv`).

mod commands;
mod report;

use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

use commands::{apply::ApplyArgs, facts::FactsArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "remtpl",
    version,
    about = "Fetch a template over HTTP, render it with host facts and write it locally",
    long_about = None,
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch, render and write a template; report whether the file changed.
    Apply(ApplyArgs),

    /// Print the facts a template would be rendered with.
    Facts(FactsArgs),
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("REMTPL_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Apply(args) => args.run(),
        Commands::Facts(args) => args.run(),
    }
}
