//! Remote Builder - build on a remote host, install on remote targets
//!
//! Runs a configured build command on a build system over SSH, locates the
//! produced artifact (an RPM or a plain binary), then copies it to each
//! install target, installs it and checks the installed version. The whole
//! deployment is described by a `build.json` file that is read at start and
//! written back at the end of every run.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use application::{run, RunPlan, RunSummary};
pub use domain::entities::{DeployConfig, HostDescriptor, SshEndpoint};
pub use domain::ports::{EventSink, PipelineEvent, RemoteExecutor};
pub use error::{BuilderError, BuilderResult, InstallError, InstallStep};
pub use infrastructure::{JsonConfigRepository, SshExecutor};
