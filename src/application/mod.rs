//! Application Layer
//!
//! Use cases that drive remote hosts through the `RemoteExecutor` port.
//!
//! ## Use Cases
//!
//! - `BuildUseCase` - run the build on the build host, record the artifact
//! - `InstallUseCase` - upload and install on each target, in order
//! - `SelfCheckUseCase` - probe every host for reachability
//! - `PublishUseCase` - run the publish command on the build host
//! - `pipeline::run` - sequence the phases selected for one invocation

pub mod build;
pub mod check;
pub mod install;
pub mod pipeline;
pub mod publish;
pub mod version;

pub use build::{resolve_build_command, BuildOutcome, BuildUseCase};
pub use check::{HostCheck, SelfCheckUseCase};
pub use install::{InstallOptions, InstallReport, InstallUseCase, TargetOutcome};
pub use pipeline::{run, RunPlan, RunSummary};
pub use publish::PublishUseCase;
pub use version::{resolve_package, resolve_version, InstalledVersion, ResolvedPackage};
