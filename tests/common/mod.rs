//! Common test utilities for builder CLI tests.
//!
//! `TestEnv` runs the compiled binary inside an isolated temp directory with
//! its own HOME, so `./build.json` never touches the developer's tree.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Result of running the builder binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

pub struct TestEnv {
    pub root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_builder")),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn write_config(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create config dir");
        }
        std::fs::write(path, content).expect("write config");
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).expect("read file")
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.root.path())
            .args(args)
            .env("HOME", self.root.path())
            .env("NO_COLOR", "1")
            .env_remove("BUILDER_CONFIG")
            .env_remove("RUST_LOG");
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        to_result(cmd.output().expect("run builder"))
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Binary-mode config whose hosts are never contacted by the tests using it
pub const BINARY_CONFIG: &str = r#"{
  "buildSystem": {
    "ssh": {
      "host": "192.0.2.10",
      "key": "./ssh_access_key",
      "user": "root",
      "remoteDir": "/srv/build"
    },
    "name": "go-builder",
    "rpm": false,
    "rpmarch": "",
    "filename": ""
  },
  "installTargets": [
    {
      "ssh": {
        "host": "192.0.2.11",
        "key": "./ssh_access_key",
        "user": "root",
        "remoteDir": "/usr/local/bin"
      },
      "name": "node1",
      "rpm": false,
      "rpmarch": "",
      "filename": ""
    }
  ],
  "buildCLI": "",
  "publishCLI": "",
  "packageName": "testharness",
  "owner": "platform-team"
}
"#;
