//! # detyped CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use detyped_cli::check::{run_check, CheckArgs};
use detyped_cli::encoding::{run_encoding, EncodingArgs};

/// Detyped model toolchain.
///
/// Inspects bracket-encoded class names and checks values against persisted
/// type descriptors.
#[derive(Parser, Debug)]
#[command(name = "detyped", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse bracket-encoded class names.
    Encoding(EncodingArgs),

    /// Check a value document against a descriptor document.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut out = io::stdout().lock();
    let result = match cli.command {
        Commands::Encoding(args) => run_encoding(&args, &mut out),
        Commands::Check(args) => run_check(&args, &mut out),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
