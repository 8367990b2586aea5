//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several suites
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `notekeep` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct NotekeepCommand {
    args: Vec<String>,
    config_home: Option<PathBuf>,
}

impl NotekeepCommand {
    /// Creates a new command for the `notekeep` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            config_home: None,
        }
    }

    /// Sets the `--db` option to specify the database file.
    pub fn db(mut self, path: &Path) -> Self {
        self.args.push("--db".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Points the config lookup at `dir` so the user's own config is ignored.
    pub fn config_home(mut self, dir: &Path) -> Self {
        self.config_home = Some(dir.to_path_buf());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("notekeep").expect("Failed to find notekeep binary");
        if let Some(dir) = &self.config_home {
            cmd.env("XDG_CONFIG_HOME", dir).env("HOME", dir);
        }
        cmd.env_remove("RUST_LOG");
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for `user add` with a password.
    pub fn user_add(self, username: &str, password: &str) -> Self {
        self.args(["user", "add", username, "--password", password])
    }

    /// Configures for the `ls` command for one user.
    pub fn ls(self, username: &str) -> Self {
        self.args(["ls", "--user", username])
    }

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for NotekeepCommand {
    fn default() -> Self {
        Self::new()
    }
}
