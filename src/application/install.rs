//! Install Use Case
//!
//! Pushes the built artifact to every install target, strictly in the order
//! they are listed. Per target:
//! 1. Upload from the build host into the target's working directory
//! 2. RPM: `rpm -e <package> || /bin/true` (failure tolerated)
//! 3. RPM: `rpm -iUvh <file>`; binary: `<file> -ver`
//!
//! By default the first fatal failure stops the run and later targets are
//! never touched. Targets that already succeeded stay installed.

use tracing::{info, warn};

use crate::domain::entities::{DeployConfig, HostDescriptor};
use crate::domain::ports::{EventSink, ExecOutput, PipelineEvent, RemoteExecutor};
use crate::domain::services::shell;
use crate::error::{BuilderError, BuilderResult, InstallError, InstallStep};

use super::version::resolve_package;

/// Options for the install use case
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Attempt every target and fail at the end instead of at the first error
    pub continue_on_error: bool,
}

/// How one target ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOutcome {
    pub index: usize,
    pub target: String,
    pub host: String,
    pub result: Result<(), InstallError>,
}

/// Result of an install run
#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    pub outcomes: Vec<TargetOutcome>,
}

impl InstallReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// What gets installed, worked out once before touching any target
#[derive(Debug, Clone)]
enum InstallMode {
    /// `rpm -e` this package, then install the file
    Rpm { package: String },
    /// Run the uploaded binary with `-ver`
    Binary,
}

#[derive(Debug, Clone)]
struct InstallPlan {
    artifact: String,
    base_name: String,
    mode: InstallMode,
}

/// Install use case
pub struct InstallUseCase<'a, E: RemoteExecutor> {
    executor: E,
    events: &'a dyn EventSink,
    options: InstallOptions,
}

impl<'a, E: RemoteExecutor> InstallUseCase<'a, E> {
    pub fn new(executor: E, events: &'a dyn EventSink) -> Self {
        Self {
            executor,
            events,
            options: InstallOptions::default(),
        }
    }

    pub fn with_options(mut self, options: InstallOptions) -> Self {
        self.options = options;
        self
    }

    /// Deploy the build system's artifact to every install target
    pub fn execute(&self, config: &DeployConfig) -> BuilderResult<InstallReport> {
        let plan = self.plan(config)?;
        let targets = &config.install_targets;

        info!(targets = targets.len(), artifact = %plan.artifact, "installing");
        self.events.on_event(PipelineEvent::InstallStarted {
            target_count: targets.len(),
        });

        let mut report = InstallReport::default();
        for (index, target) in targets.iter().enumerate() {
            let result = self.install_target(config, index, target, &plan);
            let failure = result.as_ref().err().cloned();
            report.outcomes.push(TargetOutcome {
                index,
                target: target.label().to_string(),
                host: target.address().to_string(),
                result,
            });

            if let Some(err) = failure {
                if !self.options.continue_on_error {
                    self.completed(&report);
                    return Err(err.into());
                }
                warn!(target = %target.label(), "continuing after failure: {}", err);
            }
        }

        self.completed(&report);
        if report.is_success() {
            Ok(report)
        } else {
            Err(BuilderError::PartialInstall {
                failed: report.failed(),
                total: report.outcomes.len(),
            })
        }
    }

    fn completed(&self, report: &InstallReport) {
        self.events.on_event(PipelineEvent::InstallCompleted {
            succeeded: report.succeeded(),
            failed: report.failed(),
        });
    }

    fn plan(&self, config: &DeployConfig) -> BuilderResult<InstallPlan> {
        let build_system = &config.build_system;
        let (artifact, base_name) = match (
            build_system.artifact_path(),
            build_system.artifact_base_name(),
        ) {
            (Some(path), Some(base)) if !base.is_empty() => (path.to_string(), base.to_string()),
            _ => {
                return Err(BuilderError::Configuration(
                    "no artifact recorded for the build system; run a build first".to_string(),
                ))
            }
        };

        let mode = if build_system.is_rpm() {
            let resolved = resolve_package(&self.executor, build_system)?;
            self.events.on_event(PipelineEvent::VersionResolved {
                version: resolved.version.version.clone(),
                release: resolved.version.release,
                prefix: resolved.prefix.clone(),
            });
            InstallMode::Rpm {
                package: resolved.prefix,
            }
        } else {
            InstallMode::Binary
        };

        Ok(InstallPlan {
            artifact,
            base_name,
            mode,
        })
    }

    fn install_target(
        &self,
        config: &DeployConfig,
        index: usize,
        target: &HostDescriptor,
        plan: &InstallPlan,
    ) -> Result<(), InstallError> {
        let dest = target.ssh.remote_path(&plan.base_name);

        self.started(target, InstallStep::Upload, format!("{} -> {}", plan.base_name, dest));
        if let Err(e) = self.executor.copy_between(
            &config.build_system.ssh,
            &plan.artifact,
            &target.ssh,
            &dest,
        ) {
            let stderr = e.stderr().map(str::to_string).unwrap_or_else(|| e.to_string());
            return Err(self.failed(index, target, InstallStep::Upload, e.exit_code(), stderr));
        }
        self.succeeded(target, InstallStep::Upload, String::new());

        let quoted = shell::quote_remote_path(&dest);
        match &plan.mode {
            InstallMode::Rpm { package } => {
                let remove = format!("rpm -e {} || /bin/true", shell::quote(package));
                self.started(target, InstallStep::PreRemoval, remove.clone());
                let output = self.run(index, target, InstallStep::PreRemoval, &remove)?;
                if output.success() {
                    self.succeeded(target, InstallStep::PreRemoval, output.stdout);
                } else {
                    warn!(
                        target = %target.label(),
                        exit_code = output.exit_code,
                        "prior package removal failed"
                    );
                    self.events.on_event(PipelineEvent::StepTolerated {
                        target: target.label().to_string(),
                        step: InstallStep::PreRemoval,
                        exit_code: output.exit_code,
                    });
                }

                let install = format!("rpm -iUvh {}", quoted);
                self.run_checked(index, target, InstallStep::Install, install)
            }
            InstallMode::Binary => {
                self.run_checked(index, target, InstallStep::Verify, format!("{} -ver", quoted))
            }
        }
    }

    /// Run a step whose non-zero exit is fatal
    fn run_checked(
        &self,
        index: usize,
        target: &HostDescriptor,
        step: InstallStep,
        command: String,
    ) -> Result<(), InstallError> {
        self.started(target, step, command.clone());
        let output = self.run(index, target, step, &command)?;
        if !output.success() {
            return Err(self.failed(index, target, step, output.exit_code, output.stderr));
        }
        self.succeeded(target, step, output.stdout);
        Ok(())
    }

    /// Execute on `target`, turning transport errors into a failed step
    fn run(
        &self,
        index: usize,
        target: &HostDescriptor,
        step: InstallStep,
        command: &str,
    ) -> Result<ExecOutput, InstallError> {
        tracing::debug!("{} {:?}", target.ssh.ssh_cli(), command);
        self.executor.execute(&target.ssh, command).map_err(|e| {
            let stderr = e.stderr().map(str::to_string).unwrap_or_else(|| e.to_string());
            self.failed(index, target, step, e.exit_code(), stderr)
        })
    }

    fn started(&self, target: &HostDescriptor, step: InstallStep, detail: String) {
        self.events.on_event(PipelineEvent::StepStarted {
            target: target.label().to_string(),
            host: target.address().to_string(),
            step,
            detail,
        });
    }

    fn succeeded(&self, target: &HostDescriptor, step: InstallStep, stdout: String) {
        self.events.on_event(PipelineEvent::StepSucceeded {
            target: target.label().to_string(),
            step,
            stdout,
        });
    }

    fn failed(
        &self,
        index: usize,
        target: &HostDescriptor,
        step: InstallStep,
        exit_code: i32,
        stderr: String,
    ) -> InstallError {
        self.events.on_event(PipelineEvent::StepFailed {
            target: target.label().to_string(),
            step,
            exit_code,
            stderr: stderr.clone(),
        });
        InstallError {
            index,
            target: target.label().to_string(),
            host: target.address().to_string(),
            step,
            exit_code,
            stderr,
        }
    }
}
