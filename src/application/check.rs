//! Self-check
//!
//! Confirms every host answers over ssh before anything is built or shipped.
//! Stops at the first host that does not respond; nothing is mutated.

use tracing::{debug, info};

use crate::domain::entities::{DeployConfig, HostDescriptor};
use crate::domain::ports::{EventSink, PipelineEvent, RemoteExecutor};
use crate::error::{BuilderError, BuilderResult};

/// Probe run on the build host
pub const BUILD_HOST_PROBE: &str = "ls -lah";

/// Probe run on each install target
pub const TARGET_PROBE: &str = "hostname -s";

/// Role reported for the build host
pub const BUILD_SYSTEM_ROLE: &str = "build system";

/// Role reported for each install target
pub const TARGET_ROLE: &str = "install target";

/// One host that answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCheck {
    pub role: &'static str,
    pub host: String,
    pub output: String,
}

/// Self-check use case
pub struct SelfCheckUseCase<'a, E: RemoteExecutor> {
    executor: E,
    events: &'a dyn EventSink,
}

impl<'a, E: RemoteExecutor> SelfCheckUseCase<'a, E> {
    pub fn new(executor: E, events: &'a dyn EventSink) -> Self {
        Self { executor, events }
    }

    /// Probe the build host, then each install target in order
    pub fn execute(&self, config: &DeployConfig) -> BuilderResult<Vec<HostCheck>> {
        info!(
            targets = config.install_targets.len(),
            "checking connectivity"
        );
        let mut checks = Vec::with_capacity(config.install_targets.len() + 1);
        checks.push(self.probe(BUILD_SYSTEM_ROLE, &config.build_system, BUILD_HOST_PROBE)?);
        for target in &config.install_targets {
            checks.push(self.probe(TARGET_ROLE, target, TARGET_PROBE)?);
        }
        Ok(checks)
    }

    fn probe(
        &self,
        role: &'static str,
        host: &HostDescriptor,
        command: &str,
    ) -> BuilderResult<HostCheck> {
        debug!("{} {:?}", host.ssh.ssh_cli(), command);
        let fail = |reason: String| BuilderError::SelfCheck {
            role,
            host: host.address().to_string(),
            reason,
        };

        let output = self
            .executor
            .execute(&host.ssh, command)
            .map_err(|e| fail(e.to_string()))?;
        if !output.success() {
            let stderr = output.stderr.trim();
            return Err(fail(format!("exit code {}: {}", output.exit_code, stderr)));
        }

        let check = HostCheck {
            role,
            host: host.address().to_string(),
            output: output.stdout,
        };
        self.events.on_event(PipelineEvent::HostReachable {
            role,
            host: check.host.clone(),
            output: check.output.clone(),
        });
        Ok(check)
    }
}
