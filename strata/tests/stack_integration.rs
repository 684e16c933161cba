//! Integration tests for the on-disk environment stack workflow.
//!
//! Covers the full path from files in a build directory through the builder
//! to an effective configuration, including environment selection via
//! `STRATA_ENV` and inline overrides via `STRATA_OVERRIDES`.
//!
//! Tests that modify environment variables are marked with `#[serial]`;
//! environment variables are process-global, so concurrent mutation would
//! race.

use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use strata::environment::{ENV_VAR, OVERRIDES_VAR};
use strata::{ConfigBuilder, ConfigNode, MergePolicy};

/// RAII guard restoring an environment variable on drop.
struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

impl EnvGuard {
    fn set(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(value) => env::set_var(&self.key, value),
            None => env::remove_var(&self.key),
        }
    }
}

fn write_build_dir(dir: &Path) {
    fs::write(
        dir.join("base.yaml"),
        "entry: src/main.js\noutput:\n  path: dist\n  filename: bundle.js\n",
    )
    .unwrap();
    fs::write(
        dir.join("development.yaml"),
        "mode: development\ndevServer:\n  port: 8090\n",
    )
    .unwrap();
    fs::write(
        dir.join("production.yaml"),
        "mode: production\noutput:\n  filename: js/[name].[contenthash].js\n",
    )
    .unwrap();
}

#[test]
fn stack_builds_development_environment() {
    let temp_dir = TempDir::new().unwrap();
    write_build_dir(temp_dir.path());

    let effective = ConfigBuilder::new()
        .with_environment_stack(temp_dir.path())
        .with_environment("development")
        .skip_env()
        .build()
        .unwrap();

    assert_eq!(
        effective.get("mode"),
        Some(&ConfigNode::from("development"))
    );
    assert_eq!(effective.get("devServer.port"), Some(&ConfigNode::from(8090)));
    assert_eq!(
        effective.get("output.filename"),
        Some(&ConfigNode::from("bundle.js"))
    );
}

#[test]
fn stack_builds_production_environment() {
    let temp_dir = TempDir::new().unwrap();
    write_build_dir(temp_dir.path());

    let effective = ConfigBuilder::new()
        .with_environment_stack(temp_dir.path())
        .with_environment("production")
        .skip_env()
        .build()
        .unwrap();

    assert_eq!(effective.get("mode"), Some(&ConfigNode::from("production")));
    assert_eq!(
        effective.get("output.filename"),
        Some(&ConfigNode::from("js/[name].[contenthash].js"))
    );
    // Base keys survive.
    assert_eq!(effective.get("output.path"), Some(&ConfigNode::from("dist")));
    assert_eq!(effective.get("devServer"), None);
}

#[test]
fn local_layer_shadows_environment_layer() {
    let temp_dir = TempDir::new().unwrap();
    write_build_dir(temp_dir.path());
    fs::write(
        temp_dir.path().join("development.local.yaml"),
        "devServer:\n  port: 9999\n",
    )
    .unwrap();

    let effective = ConfigBuilder::new()
        .with_environment_stack(temp_dir.path())
        .with_environment("development")
        .skip_env()
        .build()
        .unwrap();

    assert_eq!(effective.get("devServer.port"), Some(&ConfigNode::from(9999)));
}

#[test]
#[serial]
fn strata_env_selects_environment() {
    let temp_dir = TempDir::new().unwrap();
    write_build_dir(temp_dir.path());
    let _guard = EnvGuard::set(ENV_VAR, "production");

    let effective = ConfigBuilder::new()
        .with_environment_stack(temp_dir.path())
        .build()
        .unwrap();

    assert_eq!(effective.get("mode"), Some(&ConfigNode::from("production")));
}

#[test]
#[serial]
fn strata_overrides_apply_last() {
    let temp_dir = TempDir::new().unwrap();
    write_build_dir(temp_dir.path());
    let _env = EnvGuard::set(ENV_VAR, "development");
    let _overrides = EnvGuard::set(OVERRIDES_VAR, "devServer.port=7000,mode=staging");

    let effective = ConfigBuilder::new()
        .with_environment_stack(temp_dir.path())
        .build()
        .unwrap();

    assert_eq!(effective.get("mode"), Some(&ConfigNode::from("staging")));
    assert_eq!(effective.get("devServer.port"), Some(&ConfigNode::from(7000)));
}

#[test]
fn policy_applies_to_stacked_files() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("base.yaml"),
        "rules:\n  - test: css\n    use: [style-loader]\n",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("production.yaml"),
        "rules:\n  - test: css\n    minimize: true\n",
    )
    .unwrap();

    let effective = ConfigBuilder::new()
        .with_environment_stack(temp_dir.path())
        .with_environment("production")
        .with_policy(MergePolicy::new().with_keyed_union("rules", "test"))
        .skip_env()
        .build()
        .unwrap();

    let rules = effective.get("rules").unwrap().as_sequence().unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].get("minimize"), Some(&ConfigNode::from(true)));
    assert!(rules[0].get("use").is_some());
}

#[test]
fn missing_base_is_a_clear_error() {
    let temp_dir = TempDir::new().unwrap();

    let result = ConfigBuilder::new()
        .with_environment_stack(temp_dir.path())
        .with_environment("development")
        .skip_env()
        .build();

    let message = result.unwrap_err().to_string();
    assert!(message.contains("base"));
}
