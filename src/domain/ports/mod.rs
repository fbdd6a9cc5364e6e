//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod pipeline_events;
pub mod remote_executor;

pub use pipeline_events::{EventSink, NoopEventSink, PipelineEvent};
pub use remote_executor::{ExecOutput, RemoteError, RemoteExecutor};
