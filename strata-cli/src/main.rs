//! Main entry point for the strata CLI.
//!
//! Command-line interface for merging layered build-configuration
//! documents:
//! - `merge`: merge a base document with environment overlays
//! - `show`: print one value from the effective configuration
//! - `validate`: validate a single configuration document

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let logger = strata::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        quiet: cli.quiet,
        environment: cli.env,
        logger,
    };

    let result = match cli.command {
        cli::Command::Merge(cmd) => cmd.execute(&global),
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
