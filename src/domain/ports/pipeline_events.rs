//! Pipeline Event Port
//!
//! Use cases report progress here instead of printing, so the same run can
//! feed a console transcript, an NDJSON stream, or nothing at all.

use crate::error::InstallStep;

/// Event emitted while building, checking, installing or publishing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// A host answered the self-check probe
    HostReachable {
        role: &'static str,
        host: String,
        output: String,
    },

    /// Build command is about to run
    BuildStarted { package: String, command: String },

    /// Build finished and the artifact was located
    BuildCompleted { artifact: String, output: String },

    /// Installed version/release read from the build host
    VersionResolved {
        version: String,
        release: u32,
        prefix: String,
    },

    /// Install run is starting
    InstallStarted { target_count: usize },

    /// A step is about to run on a target
    StepStarted {
        target: String,
        host: String,
        step: InstallStep,
        detail: String,
    },

    /// A step on a target succeeded
    StepSucceeded {
        target: String,
        step: InstallStep,
        stdout: String,
    },

    /// Pre-removal failed but the install carries on
    StepTolerated {
        target: String,
        step: InstallStep,
        exit_code: i32,
    },

    /// A step on a target failed fatally
    StepFailed {
        target: String,
        step: InstallStep,
        exit_code: i32,
        stderr: String,
    },

    /// Install run finished
    InstallCompleted { succeeded: usize, failed: usize },

    /// Publish command finished
    Published { output: String },
}

/// Trait for receiving pipeline events
pub trait EventSink {
    fn on_event(&self, event: PipelineEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn on_event(&self, _event: PipelineEvent) {}
}
