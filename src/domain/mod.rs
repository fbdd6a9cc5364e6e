//! Domain Layer
//!
//! Pure data and rules for building and deploying an artifact. No I/O here.
//!
//! ## Structure
//!
//! - `entities/` - `DeployConfig` and `HostDescriptor`
//! - `services/` - artifact discovery and package naming
//! - `ports/` - the remote execution and event interfaces infrastructure provides

pub mod entities;
pub mod ports;
pub mod services;
