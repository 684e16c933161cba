//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{MergeCommand, ShowCommand, ValidateCommand};
use clap::{Parser, Subcommand};

/// Command-line tool for merging layered build-configuration documents.
#[derive(Parser)]
#[command(name = "strata")]
#[command(version, about = "Merge layered build-configuration documents", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Environment whose overlay stack to use (falls back to STRATA_ENV)
    #[arg(long, value_name = "NAME", global = true)]
    pub env: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Merge a base document with environment overlays
    Merge(MergeCommand),

    /// Print one value from the effective configuration
    Show(ShowCommand),

    /// Validate a configuration document
    Validate(ValidateCommand),
}
