//! Run pipeline
//!
//! Sequences the optional phases of one invocation against a single
//! in-memory config: self-check, build, install, publish. The first fatal
//! error ends the run; whatever the config picked up before that (a new
//! artifact path) stays in memory for the caller to persist.

use tracing::info;

use crate::domain::entities::DeployConfig;
use crate::domain::ports::{EventSink, RemoteExecutor};
use crate::error::BuilderResult;

use super::build::BuildUseCase;
use super::check::SelfCheckUseCase;
use super::install::{InstallOptions, InstallUseCase};
use super::publish::PublishUseCase;

/// Which phases to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunPlan {
    pub self_check: bool,
    pub build: bool,
    pub install: bool,
    pub skip_build: bool,
    pub publish: bool,
    pub install_options: InstallOptions,
}

impl RunPlan {
    /// Install implies a fresh build unless told to reuse the last artifact
    pub fn runs_build(&self) -> bool {
        self.build || (self.install && !self.skip_build)
    }
}

/// Phases that completed, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub checked_hosts: usize,
    pub built_artifact: Option<String>,
    pub installed_targets: usize,
    pub published: bool,
}

/// Run the phases selected by `plan` against `config`
pub fn run<E: RemoteExecutor>(
    executor: &E,
    events: &dyn EventSink,
    config: &mut DeployConfig,
    plan: &RunPlan,
) -> BuilderResult<RunSummary> {
    let mut summary = RunSummary::default();

    if plan.self_check {
        let checks = SelfCheckUseCase::new(executor, events).execute(config)?;
        summary.checked_hosts = checks.len();
    }

    if plan.runs_build() {
        let outcome = BuildUseCase::new(executor, events).execute(config)?;
        info!(artifact = %outcome.artifact, "build complete");
        summary.built_artifact = Some(outcome.artifact);
    }

    if plan.install {
        let report = InstallUseCase::new(executor, events)
            .with_options(plan.install_options)
            .execute(config)?;
        summary.installed_targets = report.succeeded();
    }

    if plan.publish {
        PublishUseCase::new(executor, events).execute(config)?;
        summary.published = true;
    }

    Ok(summary)
}
