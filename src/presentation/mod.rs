//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Wiring use cases to the SSH executor and an event sink
//! - Console and `-show` output, logging setup, build identity
//!
//! ## Structure
//!
//! - `cli` - flags and their mapping to a `RunPlan`
//! - `app` - the load/run/show/save sequence and error reporting
//! - `factory` - concrete adapters behind the ports
//! - `console` / `terminal` - the human transcript

pub mod app;
pub mod cli;
pub mod console;
pub mod factory;
pub mod logging;
pub mod show;
pub mod terminal;
pub mod version;

pub use cli::Cli;
pub use console::ConsoleEventSink;
pub use version::BuildInfo;
