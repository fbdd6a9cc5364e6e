//! Build Use Case
//!
//! Runs the build command on the build host and records where the artifact
//! landed:
//! 1. Resolve the command (`buildCLI` for RPMs, synthesized for binaries)
//! 2. Run it in the build host's working directory
//! 3. Locate the artifact (rpmbuild output, or `<remoteDir>/<package>`)
//! 4. Store the path in `buildSystem.filename`

use tracing::{debug, info};

use crate::domain::entities::DeployConfig;
use crate::domain::ports::{EventSink, ExecOutput, PipelineEvent, RemoteExecutor};
use crate::domain::services::{artifact, binary_build_command, shell};
use crate::error::{BuilderError, BuilderResult};

/// What a successful build produced
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// Command line sent to the build host
    pub command: String,
    /// Artifact path now stored on the build system
    pub artifact: String,
    pub output: ExecOutput,
}

/// Pick the build command for `config`.
///
/// RPM builds run the configured `buildCLI`. Binary builds always run a
/// `go build` named after the package; `buildCLI` is ignored for them.
pub fn resolve_build_command(config: &DeployConfig) -> BuilderResult<String> {
    if !config.is_rpm() {
        return binary_build_command(&config.package_name).ok_or_else(|| {
            BuilderError::Configuration(
                "missing build cli: binary builds need packageName".to_string(),
            )
        });
    }
    let configured = config.build_cli.trim();
    if configured.is_empty() {
        return Err(BuilderError::Configuration(
            "missing build cli: set buildCLI".to_string(),
        ));
    }
    Ok(configured.to_string())
}

/// Build use case
pub struct BuildUseCase<'a, E: RemoteExecutor> {
    executor: E,
    events: &'a dyn EventSink,
}

impl<'a, E: RemoteExecutor> BuildUseCase<'a, E> {
    pub fn new(executor: E, events: &'a dyn EventSink) -> Self {
        Self { executor, events }
    }

    /// Build on the build host and record the artifact path in `config`
    pub fn execute(&self, config: &mut DeployConfig) -> BuilderResult<BuildOutcome> {
        let build_cli = resolve_build_command(config)?;
        let build_host = &config.build_system;
        let command = shell::in_dir(&build_host.ssh.remote_dir(), &build_cli);

        info!(host = %build_host.address(), package = %config.package_name, "building");
        debug!("{} {:?}", build_host.ssh.ssh_cli(), command);
        self.events.on_event(PipelineEvent::BuildStarted {
            package: config.package_name.clone(),
            command: command.clone(),
        });

        let output = self.executor.execute(&build_host.ssh, &command)?;
        if !output.success() {
            return Err(BuilderError::BuildFailed {
                host: build_host.address().to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        let artifact = if build_host.is_rpm() {
            artifact::discover_rpm_artifact(&output.stdout).ok_or(
                BuilderError::ArtifactNotFound {
                    marker: artifact::WROTE_MARKER,
                },
            )?
        } else {
            build_host.ssh.remote_path(&config.package_name)
        };
        debug!(artifact = %artifact, "build output:\n{}", output.stdout);

        config.build_system.set_artifact_path(artifact.clone());
        self.events.on_event(PipelineEvent::BuildCompleted {
            artifact: artifact.clone(),
            output: output.stdout.clone(),
        });

        Ok(BuildOutcome {
            command,
            artifact,
            output,
        })
    }
}
