//! SSH Remote Executor
//!
//! Implements the RemoteExecutor port with the system `ssh` and `scp`
//! binaries. Authentication is key-based and non-interactive.

use std::process::{Command, Output, Stdio};

use tracing::debug;

use crate::domain::entities::SshEndpoint;
use crate::domain::ports::{ExecOutput, RemoteError, RemoteExecutor};
use crate::domain::services::shell;

/// Options passed to every ssh/scp invocation
const COMMON_OPTIONS: &[&str] = &[
    "-o",
    "BatchMode=yes",
    "-o",
    "StrictHostKeyChecking=accept-new",
];

/// Remote executor backed by OpenSSH
#[derive(Debug, Clone, Default)]
pub struct SshExecutor {
    /// Extra `-o` options, e.g. `ConnectTimeout=10`
    options: Vec<String>,
}

impl SshExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    /// Arguments for `ssh` running `command` on `host`
    fn ssh_args(&self, host: &SshEndpoint, command: &str) -> Vec<String> {
        let mut args = vec!["-i".to_string(), host.identity_file()];
        args.extend(self.common_options());
        args.push(host.destination());
        args.push(command.to_string());
        args
    }

    /// Arguments for a host-to-host `scp` relayed through this machine
    fn scp_args(
        &self,
        source: &SshEndpoint,
        source_path: &str,
        dest: &SshEndpoint,
        dest_path: &str,
    ) -> Vec<String> {
        let mut args = vec!["-3".to_string(), "-q".to_string()];
        let source_key = source.identity_file();
        let dest_key = dest.identity_file();
        args.extend(["-i".to_string(), source_key.clone()]);
        if dest_key != source_key {
            args.extend(["-i".to_string(), dest_key]);
        }
        args.extend(self.common_options());
        args.push(scp_location(source, source_path));
        args.push(scp_location(dest, dest_path));
        args
    }

    fn common_options(&self) -> Vec<String> {
        let mut out: Vec<String> = COMMON_OPTIONS.iter().map(|s| s.to_string()).collect();
        for option in &self.options {
            out.push("-o".to_string());
            out.push(option.clone());
        }
        out
    }

    fn run(program: &'static str, args: &[String]) -> Result<Output, RemoteError> {
        debug!("{} {}", program, args.join(" "));
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| RemoteError::Spawn { program, source })
    }
}

/// `user@host:path`, with the path quoted for the remote shell
fn scp_location(host: &SshEndpoint, path: &str) -> String {
    format!("{}:{}", host.destination(), shell::quote_remote_path(path))
}

fn exec_output(output: Output) -> ExecOutput {
    ExecOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

impl RemoteExecutor for SshExecutor {
    fn execute(&self, host: &SshEndpoint, command: &str) -> Result<ExecOutput, RemoteError> {
        let output = Self::run("ssh", &self.ssh_args(host, command))?;
        Ok(exec_output(output))
    }

    fn copy_between(
        &self,
        source: &SshEndpoint,
        source_path: &str,
        dest: &SshEndpoint,
        dest_path: &str,
    ) -> Result<(), RemoteError> {
        let output = Self::run("scp", &self.scp_args(source, source_path, dest, dest_path))?;
        let result = exec_output(output);
        if !result.success() {
            return Err(RemoteError::TransferFailed {
                from: scp_location(source, source_path),
                to: scp_location(dest, dest_path),
                exit_code: result.exit_code,
                stderr: result.stderr,
            });
        }
        Ok(())
    }

    fn read_file(&self, host: &SshEndpoint, path: &str) -> Result<String, RemoteError> {
        let command = format!("cat {}", shell::quote_remote_path(path));
        let result = self.execute(host, &command)?;
        if !result.success() {
            return Err(RemoteError::CommandFailed {
                destination: host.destination(),
                command,
                exit_code: result.exit_code,
                stderr: result.stderr,
            });
        }
        Ok(result.stdout)
    }
}
