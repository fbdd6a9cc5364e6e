//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `remote/` - `SshExecutor`, the OpenSSH-backed `RemoteExecutor`
//! - `config/` - `build.json` persistence
//! - `events/` - machine-readable event output

pub mod config;
pub mod events;
pub mod remote;

// Re-export for convenience
pub use config::{resolve_config_path, JsonConfigRepository};
pub use events::JsonEventSink;
pub use remote::SshExecutor;
