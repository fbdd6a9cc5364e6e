//! RemoteExecutor port - abstraction over running commands on other machines
//!
//! Use cases talk to hosts only through this trait, so they can be driven by
//! the SSH adapter in production and a scripted fake in tests.

use thiserror::Error;

use crate::domain::entities::SshEndpoint;

/// Captured result of one remote command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Exit status; -1 when the process was killed by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Transport-level failure
#[derive(Error, Debug)]
pub enum RemoteError {
    /// ssh/scp could not be started at all
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A command that must succeed (e.g. reading a file) returned non-zero
    #[error("`{command}` on {destination} exited with status {exit_code}")]
    CommandFailed {
        destination: String,
        command: String,
        exit_code: i32,
        stderr: String,
    },

    /// Host-to-host copy returned non-zero
    #[error("copy {from} -> {to} failed with status {exit_code}")]
    TransferFailed {
        from: String,
        to: String,
        exit_code: i32,
        stderr: String,
    },
}

impl RemoteError {
    /// Exit status of the failed remote operation, if it ran
    pub fn exit_code(&self) -> i32 {
        match self {
            RemoteError::Spawn { .. } => -1,
            RemoteError::CommandFailed { exit_code, .. }
            | RemoteError::TransferFailed { exit_code, .. } => *exit_code,
        }
    }

    pub fn stderr(&self) -> Option<&str> {
        match self {
            RemoteError::Spawn { .. } => None,
            RemoteError::CommandFailed { stderr, .. }
            | RemoteError::TransferFailed { stderr, .. } => Some(stderr),
        }
    }
}

/// Runs commands and moves files on remote hosts
///
/// Every call blocks until the remote side finishes. Implementations own
/// any connection-level concerns (auth, timeouts); callers never retry.
pub trait RemoteExecutor {
    /// Run `command` on `host`.
    ///
    /// Returns the captured output whatever the exit status; errors only
    /// when the command could not be run.
    fn execute(&self, host: &SshEndpoint, command: &str) -> Result<ExecOutput, RemoteError>;

    /// Copy `source_path` on `source` to `dest_path` on `dest`
    fn copy_between(
        &self,
        source: &SshEndpoint,
        source_path: &str,
        dest: &SshEndpoint,
        dest_path: &str,
    ) -> Result<(), RemoteError>;

    /// Read a text file from `host`
    fn read_file(&self, host: &SshEndpoint, path: &str) -> Result<String, RemoteError>;
}

impl<T: RemoteExecutor + ?Sized> RemoteExecutor for &T {
    fn execute(&self, host: &SshEndpoint, command: &str) -> Result<ExecOutput, RemoteError> {
        (**self).execute(host, command)
    }

    fn copy_between(
        &self,
        source: &SshEndpoint,
        source_path: &str,
        dest: &SshEndpoint,
        dest_path: &str,
    ) -> Result<(), RemoteError> {
        (**self).copy_between(source, source_path, dest, dest_path)
    }

    fn read_file(&self, host: &SshEndpoint, path: &str) -> Result<String, RemoteError> {
        (**self).read_file(host, path)
    }
}
