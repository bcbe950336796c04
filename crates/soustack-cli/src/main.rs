//! # soustack CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; handlers return an exit code and all terminal
//! output happens in the handler layer.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use soustack_cli::fixtures::{run_fixtures, FixturesArgs};
use soustack_cli::test::{run_test, TestArgs};

/// Soustack Conformance Runner.
///
/// Validates recipe documents against a component registry, either over a
/// caller-supplied glob or over a vendored fixture suite whose filenames
/// encode the expected outcome.
#[derive(Parser, Debug)]
#[command(name = "soustack", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Working directory to resolve relative patterns and paths against.
    #[arg(long, global = true, value_name = "DIR")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate recipe files that match the provided glob.
    Test(TestArgs),

    /// Run the fixture suite. Files containing .valid. must pass,
    /// .invalid. must fail.
    Fixtures(FixturesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = resolve_cwd(cli.cwd).and_then(|cwd| {
        tracing::debug!(cwd = %cwd.display(), "resolved working directory");
        match cli.command {
            Commands::Test(args) => run_test(&args, &cwd),
            Commands::Fixtures(args) => run_fixtures(&args, &cwd),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Resolve the working directory: an explicit `--cwd` wins, otherwise the
/// process working directory.
fn resolve_cwd(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(dir) if dir.is_absolute() => Ok(dir),
        Some(dir) => {
            let base = std::env::current_dir().context("cannot determine working directory")?;
            Ok(base.join(dir))
        }
        None => std::env::current_dir().context("cannot determine working directory"),
    }
}
