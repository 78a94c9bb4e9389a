//! tocgen CLI - hierarchical index synthesis.
//!
//! Provides commands for:
//! - `generate`: Generate and write every directory index
//! - `check`: Run synthesis without writing and enforce the hard budget

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, GenerateArgs};
use output::Output;

/// tocgen - budget-aware index synthesis for documentation trees.
#[derive(Parser)]
#[command(name = "tocgen", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate index documents for every directory.
    Generate(GenerateArgs),
    /// Check that generated indices respect the hard budget.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Generate(args) => args.pipeline.verbose,
        Commands::Check(args) => args.pipeline.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG (default WARN)
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
