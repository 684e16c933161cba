//! Command to merge configuration documents into an effective configuration.

use crate::error::CliError;
use crate::utils::{render, report_diagnostics, GlobalOptions, MergeInputs, OutputFormat};
use clap::Args;
use std::path::PathBuf;

/// Merge a base document with environment overlays.
#[derive(Args)]
pub struct MergeCommand {
    #[command(flatten)]
    pub inputs: MergeInputs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Write the result to a file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl MergeCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let effective = self.inputs.to_builder(global)?.build()?;
        report_diagnostics(&effective, global);

        let rendered = render(&effective, self.format)?;
        match self.output {
            Some(path) => std::fs::write(&path, rendered)?,
            None => print!("{rendered}"),
        }
        Ok(())
    }
}
