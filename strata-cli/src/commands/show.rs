//! Command to print one value from the effective configuration.

use crate::error::CliError;
use crate::utils::{report_diagnostics, GlobalOptions, MergeInputs};
use clap::Args;
use strata::ConfigNode;

/// Print the effective value at a dotted path.
#[derive(Args)]
pub struct ShowCommand {
    /// Dotted path to look up (e.g. output.filename)
    #[arg(value_name = "PATH")]
    pub path: String,

    #[command(flatten)]
    pub inputs: MergeInputs,
}

impl ShowCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let effective = self.inputs.to_builder(global)?.build()?;
        report_diagnostics(&effective, global);

        let Some(value) = effective.get(&self.path) else {
            return Err(CliError::SemanticFailure(format!(
                "no value at '{}'",
                self.path
            )));
        };

        // Bare scalars print plainly; structured values render as YAML.
        match value {
            ConfigNode::String(s) => println!("{s}"),
            ConfigNode::Null => println!("null"),
            ConfigNode::Bool(b) => println!("{b}"),
            ConfigNode::Int(i) => println!("{i}"),
            ConfigNode::Float(x) => println!("{x}"),
            structured => {
                let rendered =
                    serde_yaml::to_string(structured).map_err(|e| CliError::Config(e.to_string()))?;
                print!("{rendered}");
            }
        }
        Ok(())
    }
}
