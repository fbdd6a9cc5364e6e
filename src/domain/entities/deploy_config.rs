//! Deployment descriptor
//!
//! The in-memory form of `build.json`. Persistence lives in
//! `infrastructure::config`; this type only knows its own shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::host::HostDescriptor;

/// Build host, install targets and the commands that tie them together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    #[serde(rename = "buildSystem")]
    pub build_system: HostDescriptor,
    #[serde(rename = "installTargets")]
    pub install_targets: Vec<HostDescriptor>,
    #[serde(rename = "buildCLI")]
    pub build_cli: String,
    #[serde(rename = "publishCLI")]
    pub publish_cli: String,
    #[serde(rename = "packageName")]
    pub package_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeployConfig {
    pub fn new(build_system: HostDescriptor) -> Self {
        Self {
            build_system,
            ..Self::default()
        }
    }

    pub fn with_target(mut self, target: HostDescriptor) -> Self {
        self.install_targets.push(target);
        self
    }

    pub fn with_build_cli(mut self, cli: impl Into<String>) -> Self {
        self.build_cli = cli.into();
        self
    }

    pub fn with_publish_cli(mut self, cli: impl Into<String>) -> Self {
        self.publish_cli = cli.into();
        self
    }

    pub fn with_package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = name.into();
        self
    }

    /// Whether the build system produces an RPM
    pub fn is_rpm(&self) -> bool {
        self.build_system.is_rpm()
    }

    /// Dotted paths of keys that were kept verbatim because they are unknown
    pub fn unknown_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.extra.keys().cloned().collect();
        collect_host_keys("buildSystem", &self.build_system, &mut keys);
        for (i, target) in self.install_targets.iter().enumerate() {
            collect_host_keys(&format!("installTargets[{}]", i), target, &mut keys);
        }
        keys
    }
}

fn collect_host_keys(prefix: &str, host: &HostDescriptor, out: &mut Vec<String>) {
    out.extend(host.extra.keys().map(|k| format!("{}.{}", prefix, k)));
    out.extend(host.ssh.extra.keys().map(|k| format!("{}.ssh.{}", prefix, k)));
}
