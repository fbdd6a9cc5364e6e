//! Adapter Factory
//!
//! Wires the concrete infrastructure behind the ports the use cases need.

use crate::domain::ports::EventSink;
use crate::infrastructure::{JsonEventSink, SshExecutor};

use super::console::ConsoleEventSink;

/// Executor every run uses against real hosts
pub fn create_executor() -> SshExecutor {
    SshExecutor::new()
}

/// NDJSON on stdout for `-json`, the console transcript otherwise
pub fn create_event_sink(json: bool) -> Box<dyn EventSink> {
    if json {
        Box::new(JsonEventSink::stdout())
    } else {
        Box::new(ConsoleEventSink::stdout())
    }
}
