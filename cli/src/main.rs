#![deny(missing_docs)]

//! # OASR CLI
//!
//! Command Line Interface for the OpenAPI reference resolver.
//!
//! Supported Commands:
//! - `validate`: Parses, resolves and validates one or more documents.
//! - `resolve`: Prints a document with every `$ref` inlined.

use clap::{Parser, Subcommand};
use env_logger::Env;
use std::io::{self, Write};
use std::process::ExitCode;

use crate::error::CliResult;

mod error;
mod resolve;
mod validate;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI reference resolver")]
struct Cli {
    /// Log resolution progress (overridden by RUST_LOG).
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate documents, resolving references.
    Validate(validate::ValidateArgs),
    /// Print a fully resolved document.
    Resolve(resolve::ResolveArgs),
}

fn run(cli: &Cli) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::Validate(args) => validate::execute(args, &mut out),
        Commands::Resolve(args) => resolve::execute(args, &mut out),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    finish(run(&cli), &mut io::stderr())
}

/// Reports a failure once on `err_out` and maps the result to an exit code.
fn finish(result: CliResult<()>, err_out: &mut impl Write) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = writeln!(err_out, "{}", e);
            ExitCode::FAILURE
        }
    }
}
