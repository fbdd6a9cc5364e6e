//! Host descriptors
//!
//! A `HostDescriptor` is one machine from `build.json`: the build system or an
//! install target. The `ssh` block carries the connection details.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Login used when `ssh.user` is empty
pub const DEFAULT_SSH_USER: &str = "root";

/// Working directory used when `ssh.remoteDir` is empty
pub const DEFAULT_REMOTE_DIR: &str = "~";

/// Key used when `ssh.key` is empty, relative to the local home directory
pub const DEFAULT_SSH_KEY: &str = ".ssh/id_rsa";

/// SSH connection details for one host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshEndpoint {
    pub host: String,
    pub key: String,
    pub user: String,
    #[serde(rename = "remoteDir")]
    pub remote_dir: String,
    /// Keys this tool does not know about, kept for the next save
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SshEndpoint {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_remote_dir(mut self, dir: impl Into<String>) -> Self {
        self.remote_dir = dir.into();
        self
    }

    /// Login user, defaulting to root
    pub fn login_user(&self) -> &str {
        if self.user.is_empty() {
            DEFAULT_SSH_USER
        } else {
            &self.user
        }
    }

    /// `user@host` as passed to ssh/scp
    pub fn destination(&self) -> String {
        format!("{}@{}", self.login_user(), self.host)
    }

    /// Private key path, defaulting to `~/.ssh/id_rsa` on the local machine
    pub fn identity_file(&self) -> String {
        if !self.key.is_empty() {
            return self.key.clone();
        }
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_SSH_KEY))
            .unwrap_or_else(|| PathBuf::from("~").join(DEFAULT_SSH_KEY))
            .to_string_lossy()
            .into_owned()
    }

    /// Remote working directory, always ending with exactly one `/`
    pub fn remote_dir(&self) -> String {
        let dir = if self.remote_dir.is_empty() {
            DEFAULT_REMOTE_DIR
        } else {
            self.remote_dir.as_str()
        };
        format!("{}/", dir.trim_end_matches('/'))
    }

    /// Path of `filename` inside the remote working directory
    pub fn remote_path(&self, filename: &str) -> String {
        format!("{}{}", self.remote_dir(), filename.trim_start_matches('/'))
    }

    /// The equivalent interactive ssh command line, for diagnostics
    pub fn ssh_cli(&self) -> String {
        format!("ssh -i {} {}", self.identity_file(), self.destination())
    }
}

/// One machine in the deployment: build system or install target
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostDescriptor {
    pub ssh: SshEndpoint,
    pub name: String,
    /// Artifact is an RPM (otherwise a plain binary)
    pub rpm: bool,
    #[serde(rename = "rpmarch")]
    pub rpm_arch: String,
    /// Resolved artifact path on this host, filled in by a build
    pub filename: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HostDescriptor {
    pub fn new(name: impl Into<String>, ssh: SshEndpoint) -> Self {
        Self {
            ssh,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_rpm(mut self, arch: impl Into<String>) -> Self {
        self.rpm = true;
        self.rpm_arch = arch.into();
        self
    }

    pub fn with_artifact(mut self, path: impl Into<String>) -> Self {
        self.filename = path.into();
        self
    }

    /// Name for messages: the configured name, or the address when unnamed
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.ssh.host
        } else {
            &self.name
        }
    }

    pub fn address(&self) -> &str {
        &self.ssh.host
    }

    pub fn is_rpm(&self) -> bool {
        self.rpm
    }

    pub fn arch(&self) -> &str {
        &self.rpm_arch
    }

    /// Artifact path recorded by the last build, if any
    pub fn artifact_path(&self) -> Option<&str> {
        if self.filename.is_empty() {
            None
        } else {
            Some(&self.filename)
        }
    }

    pub fn set_artifact_path(&mut self, path: impl Into<String>) {
        self.filename = path.into();
    }

    /// Final path component of the recorded artifact
    pub fn artifact_base_name(&self) -> Option<&str> {
        self.artifact_path().map(base_name)
    }
}

/// Final component of a `/`-separated remote path
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
