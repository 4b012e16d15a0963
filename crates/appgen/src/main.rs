//! appgen CLI - Tenant app component and instance scaffolding
//!
//! This is the main entry point for the appgen command-line interface.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use commands::GlobalOpts;

fn main() -> ExitCode {
    // Parse CLI args; usage errors exit 1 like every other failure
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    let globals = GlobalOpts {
        root: cli.root.as_deref(),
        config: cli.config.as_deref(),
    };

    // Run command
    let result = match cli.command {
        Commands::Component(args) => {
            commands::generate::run(appgen_core::GeneratorKind::Component, args, globals)
        }
        Commands::Instance(args) => {
            commands::generate::run(appgen_core::GeneratorKind::Instance, args, globals)
        }
        Commands::Check(args) => commands::check::run(args, globals),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so `--json` output stays parseable
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
