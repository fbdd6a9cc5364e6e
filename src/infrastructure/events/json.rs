//! JSON Event Sink
//!
//! Outputs pipeline events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{EventSink, PipelineEvent};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON form of one event
pub fn event_json(event: &PipelineEvent) -> serde_json::Value {
    match event {
        PipelineEvent::HostReachable { role, host, output } => serde_json::json!({
            "event": "host_reachable",
            "role": role,
            "host": host,
            "output": output,
        }),
        PipelineEvent::BuildStarted { package, command } => serde_json::json!({
            "event": "build_start",
            "package": package,
            "command": command,
        }),
        PipelineEvent::BuildCompleted { artifact, .. } => serde_json::json!({
            "event": "build_complete",
            "artifact": artifact,
        }),
        PipelineEvent::VersionResolved {
            version,
            release,
            prefix,
        } => serde_json::json!({
            "event": "version",
            "version": version,
            "release": release,
            "package": prefix,
        }),
        PipelineEvent::InstallStarted { target_count } => serde_json::json!({
            "event": "install_start",
            "targets": target_count,
        }),
        PipelineEvent::StepStarted {
            target,
            host,
            step,
            detail,
        } => serde_json::json!({
            "event": "step_start",
            "target": target,
            "host": host,
            "step": step.to_string(),
            "detail": detail,
        }),
        PipelineEvent::StepSucceeded { target, step, .. } => serde_json::json!({
            "event": "step_ok",
            "target": target,
            "step": step.to_string(),
        }),
        PipelineEvent::StepTolerated {
            target,
            step,
            exit_code,
        } => serde_json::json!({
            "event": "step_tolerated",
            "target": target,
            "step": step.to_string(),
            "exit_code": exit_code,
        }),
        PipelineEvent::StepFailed {
            target,
            step,
            exit_code,
            stderr,
        } => serde_json::json!({
            "event": "step_failed",
            "target": target,
            "step": step.to_string(),
            "exit_code": exit_code,
            "stderr": stderr,
        }),
        PipelineEvent::InstallCompleted { succeeded, failed } => serde_json::json!({
            "event": "install_complete",
            "succeeded": succeeded,
            "failed": failed,
        }),
        PipelineEvent::Published { .. } => serde_json::json!({
            "event": "published",
        }),
    }
}

impl EventSink for JsonEventSink {
    fn on_event(&self, event: PipelineEvent) {
        self.write_event(event_json(&event));
    }
}
