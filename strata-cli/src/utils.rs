//! Utility functions for CLI operations.
//!
//! This module provides the shared input arguments and helpers used across
//! CLI commands: assembling a builder from flags, parsing policy specs, and
//! rendering effective configurations.

use crate::error::CliError;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use strata::{ConfigBuilder, EffectiveConfig, Logger, MergePolicy, MergeRule};

/// Global CLI options shared across all commands.
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Environment whose overlay stack to use.
    pub environment: Option<String>,

    /// Logger configured from verbosity flags.
    pub logger: Logger,
}

/// Output rendering format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML output.
    Yaml,
    /// Pretty-printed JSON output.
    Json,
}

/// Document and policy inputs shared by `merge` and `show`.
#[derive(Args)]
pub struct MergeInputs {
    /// Base configuration document
    #[arg(long, value_name = "FILE")]
    pub base: Option<PathBuf>,

    /// Overlay document, repeatable, applied in order
    #[arg(long = "overlay", value_name = "FILE")]
    pub overlays: Vec<PathBuf>,

    /// Directory holding an environment stack (base.yaml + {env}.yaml)
    #[arg(long, value_name = "DIR")]
    pub stack: Option<PathBuf>,

    /// Inline override, repeatable (dotted.path=value)
    #[arg(long = "set", value_name = "PATH=VALUE")]
    pub assignments: Vec<String>,

    /// Keyed-union rule for a sequence, repeatable (dotted.path:key)
    #[arg(long = "union", value_name = "PATH:KEY")]
    pub unions: Vec<String>,

    /// Replace rule for a path, repeatable
    #[arg(long = "replace", value_name = "PATH")]
    pub replacements: Vec<String>,

    /// Ignore STRATA_ENV and STRATA_OVERRIDES
    #[arg(long)]
    pub no_env: bool,
}

impl MergeInputs {
    /// Assemble a configuration builder from these inputs.
    pub fn to_builder(&self, global: &GlobalOptions) -> Result<ConfigBuilder, CliError> {
        if self.base.is_none() && self.stack.is_none() {
            return Err(CliError::InvalidArguments(
                "provide --base and/or --stack".to_string(),
            ));
        }

        let mut builder = ConfigBuilder::new().with_policy(self.build_policy()?);

        if let Some(ref base) = self.base {
            builder = builder.with_base_file(base);
        }
        if let Some(ref stack) = self.stack {
            builder = builder.with_environment_stack(stack);
        }
        if let Some(ref environment) = global.environment {
            builder = builder.with_environment(environment);
        }
        for overlay in &self.overlays {
            builder = builder.with_overlay_file(overlay);
        }
        for assignment in &self.assignments {
            builder = builder.with_assignment(assignment);
        }
        if self.no_env {
            builder = builder.skip_env();
        }

        Ok(builder)
    }

    /// Build the merge policy from `--union` and `--replace` specs.
    fn build_policy(&self) -> Result<MergePolicy, CliError> {
        let mut policy = MergePolicy::new();
        for spec in &self.unions {
            let (path, key) = spec.split_once(':').ok_or_else(|| {
                CliError::InvalidArguments(format!(
                    "invalid --union spec '{spec}' (expected dotted.path:key)"
                ))
            })?;
            policy = policy.with_keyed_union(path, key);
        }
        for path in &self.replacements {
            policy = policy.with_rule(path, MergeRule::Replace);
        }
        Ok(policy)
    }
}

/// Render an effective configuration in the requested format.
pub fn render(effective: &EffectiveConfig, format: OutputFormat) -> Result<String, CliError> {
    let rendered = match format {
        OutputFormat::Yaml => effective.to_yaml()?,
        OutputFormat::Json => effective.to_json()?,
    };
    Ok(rendered)
}

/// Report merge diagnostics through the logger.
pub fn report_diagnostics(effective: &EffectiveConfig, global: &GlobalOptions) {
    if global.quiet {
        return;
    }
    for diagnostic in effective.diagnostics() {
        global.logger.warn(&diagnostic.to_string());
    }
}
