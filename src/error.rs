//! Error types for the builder
//!
//! Every fatal path returns one of these; only `main` decides the exit status.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::RemoteError;

/// Result type alias for builder operations
pub type BuilderResult<T> = Result<T, BuilderError>;

/// Exit status for a build that was requested without a resolvable build command
pub const EXIT_CONFIGURATION: i32 = 1;

/// Exit status for every other fatal error
pub const EXIT_FATAL: i32 = 2;

/// Main error type for builder operations
#[derive(Error, Debug)]
pub enum BuilderError {
    /// Something required is missing from `build.json`
    #[error("configuration error: {0}")]
    Configuration(String),

    /// `build.json` exists but is not valid JSON for the descriptor
    #[error("unable to parse configuration file {path}: {source} (use jq to check format)")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Local IO error (config persistence)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The transport could not run a command or move a file
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The build command ran and returned non-zero
    #[error("build on {host} failed with exit code {exit_code}")]
    BuildFailed {
        host: String,
        exit_code: i32,
        stderr: String,
    },

    /// No `Wrote:` line in the rpmbuild output
    #[error("build output has no '{marker}' line; cannot locate the RPM")]
    ArtifactNotFound { marker: &'static str },

    /// Installed version/release does not line up with the artifact name
    #[error("version resolution failed: {0}")]
    VersionResolution(String),

    /// A target failed during upload, install or verification
    #[error(transparent)]
    Install(#[from] InstallError),

    /// Continue-on-error install finished with failures
    #[error("{failed} of {total} install targets failed")]
    PartialInstall { failed: usize, total: usize },

    /// A host did not answer the connectivity probe
    #[error("self-check failed on {role} {host}: {reason}")]
    SelfCheck {
        role: &'static str,
        host: String,
        reason: String,
    },

    /// The publish command ran and returned non-zero
    #[error("publish failed with exit code {exit_code}")]
    PublishFailed { exit_code: i32, stderr: String },
}

impl BuilderError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BuilderError::Configuration(_) => EXIT_CONFIGURATION,
            _ => EXIT_FATAL,
        }
    }

    /// Captured remote stderr, when the failure carries one
    pub fn remote_stderr(&self) -> Option<&str> {
        match self {
            BuilderError::BuildFailed { stderr, .. }
            | BuilderError::PublishFailed { stderr, .. } => Some(stderr),
            BuilderError::Install(err) => Some(&err.stderr),
            BuilderError::Remote(err) => err.stderr(),
            _ => None,
        }
    }
}

/// Step of the per-target install sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStep {
    Upload,
    PreRemoval,
    Install,
    Verify,
}

impl fmt::Display for InstallStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstallStep::Upload => "upload",
            InstallStep::PreRemoval => "pre-removal",
            InstallStep::Install => "install",
            InstallStep::Verify => "version check",
        };
        f.write_str(name)
    }
}

/// Fatal failure on one install target
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{step} failed on target '{target}' ({host}) with exit code {exit_code}")]
pub struct InstallError {
    /// Position of the target in `installTargets`
    pub index: usize,
    pub target: String,
    pub host: String,
    pub step: InstallStep,
    pub exit_code: i32,
    pub stderr: String,
}
