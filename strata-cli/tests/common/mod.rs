//! Common test utilities for CLI integration tests.
//!
//! Provides an isolated test environment: a temporary directory for
//! configuration files and a command builder scrubbed of the STRATA_*
//! process environment so ambient variables cannot leak into tests.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated config directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder with STRATA_* variables removed.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("strata").expect("Failed to find strata binary");
        cmd.env_remove("STRATA_ENV");
        cmd.env_remove("STRATA_OVERRIDES");
        cmd.env_remove("STRATA_LOG_MODE");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a configuration file into the test environment.
    pub fn write_config(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test config");
        path
    }
}
