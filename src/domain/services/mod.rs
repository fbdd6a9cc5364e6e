//! Domain Services
//!
//! Stateless rules shared by the use cases.

pub mod artifact;
pub mod package;
pub mod shell;

pub use artifact::{discover_rpm_artifact, remap_build_home, scan_wrote_line, ArtifactScan};
pub use package::{binary_build_command, package_prefix, rpm_suffix};
