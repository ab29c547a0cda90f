//! Common test utilities for CLI integration tests.
//!
//! Every test gets its own data directory under a temporary directory, and
//! helpers drive the common room and booking commands.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the innkeep data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; innkeep creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("innkeep-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// A command with only the innkeep binary and no flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("innkeep").expect("Failed to find innkeep binary");
        cmd.env_remove("INNKEEP_DATA_DIR")
            .env_remove("INNKEEP_BUSY_TIMEOUT")
            .env_remove("INNKEEP_DISABLE_AUTOINIT")
            .env_remove("INNKEEP_LOG_MODE");
        cmd
    }

    /// A command with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("innkeep.db")
    }

    /// Writes `contents` to `<data_dir>/config.yaml`.
    pub fn write_config(&self, contents: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), contents)
            .expect("Failed to write config");
    }

    /// Runs a command and returns its trimmed stdout, failing the test on a
    /// non-zero exit.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run innkeep");

        assert!(
            output.status.success(),
            "innkeep {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }

    /// Adds a Premium Moremi room (400.00 a night) and returns its id.
    pub fn add_room(&self, number: &str) -> i64 {
        self.add_room_of(number, "premium", "Moremi")
    }

    /// Adds a room of the given category and type and returns its id.
    pub fn add_room_of(&self, number: &str, category: &str, room_type: &str) -> i64 {
        self.run(&[
            "add-room",
            "--number",
            number,
            "--category",
            category,
            "--type",
            room_type,
        ])
        .parse()
        .expect("add-room did not print a room id")
    }

    /// Books `room` for `guest` between two dates and returns the
    /// reservation id.
    pub fn book(&self, guest: &str, room: &str, check_in: &str, check_out: &str) -> i64 {
        self.run(&[
            "book",
            "--guest",
            guest,
            "--room",
            room,
            "--check-in",
            check_in,
            "--check-out",
            check_out,
        ])
        .parse()
        .expect("book did not print a reservation id")
    }

    /// Runs a listing command with `--format json` and parses the output.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let mut full: Vec<&str> = args.to_vec();
        full.extend(["--format", "json"]);
        serde_json::from_str(&self.run(&full)).expect("Output is not valid JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
