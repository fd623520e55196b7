//! Isolated environment for running the `wealthgrabber` binary.

use anyhow::Result;
use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// A temporary data directory the binary is pointed at with `--data-dir`.
///
/// # Example
/// ```no_run
/// use wealthgrabber_testing::TestWorld;
///
/// let world = TestWorld::new();
/// let result = world.run(&["list", "--format", "xml"]).unwrap();
/// assert!(!result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `config.toml` into the data directory.
    pub fn with_config(self, contents: &str) -> Self {
        std::fs::write(self.data_dir().join("config.toml"), contents)
            .expect("Failed to write config");
        self
    }

    /// Run the binary with `--data-dir` set to this world.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("wealthgrabber")
            .map_err(|e| anyhow::anyhow!("Failed to find wealthgrabber binary: {}", e))?;
        cmd.arg("--data-dir").arg(self.data_dir());
        cmd.args(args);
        cmd.env_remove("RUST_LOG");

        let output = cmd.output()?;
        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
