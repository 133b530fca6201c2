//! Common test utilities for CLI integration tests.
//!
//! Provides an isolated temporary directory for input files and rendered
//! output, plus a command builder for the `jobconf` binary.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A proxy-plugin input whose range comes from the `cf_network` link.
#[allow(dead_code)]
pub const PROXY_INPUT: &str = "\
properties: {}
links:
  - name: cf_network
    properties:
      cf_networking:
        network: 10.255.0.0/16
    instances:
      - address: link.instance.address.com
";

/// Test environment with an isolated temporary directory.
pub struct TestEnv {
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

    /// A command builder for the jobconf binary with no environment leaking in.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("jobconf").expect("Failed to find jobconf binary");
        cmd.env_remove("JOBCONF_LOG_MODE")
            .env_remove("JOBCONF_ERROR_FORMAT");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write an input file and return its path.
    pub fn write_input(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write input file");
        path
    }
}
