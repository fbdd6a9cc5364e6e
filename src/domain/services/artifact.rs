//! Artifact discovery
//!
//! rpmbuild reports each package it writes as `Wrote: <path>`. The first such
//! line names the artifact to deploy. rpmbuild runs as root on the build host,
//! so its `/root/...` paths are remapped to the publicly readable `/opt/...`
//! tree the packages are served from.

/// Marker that starts an rpmbuild "package written" line
pub const WROTE_MARKER: &str = "Wrote";

/// Characters to drop from a marker line to reach the path (`"Wrote: "`)
pub const WROTE_PREFIX_LEN: usize = 7;

/// Build-user home prefix as printed by rpmbuild
pub const BUILD_HOME_PREFIX: &str = "/root";

/// Where the build host exposes the same tree
pub const PUBLIC_PREFIX: &str = "/opt";

/// Outcome of scanning build output for the artifact line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactScan {
    /// Path exactly as printed after the marker
    Found(String),
    NotFound,
}

impl ArtifactScan {
    pub fn into_path(self) -> Option<String> {
        match self {
            ArtifactScan::Found(path) => Some(path),
            ArtifactScan::NotFound => None,
        }
    }
}

/// Find the first `Wrote: <path>` line in `output`.
///
/// A marker line too short to hold a path is skipped.
pub fn scan_wrote_line(output: &str) -> ArtifactScan {
    output
        .lines()
        .filter(|line| line.starts_with(WROTE_MARKER))
        .filter_map(|line| line.get(WROTE_PREFIX_LEN..))
        .map(str::trim_end)
        .find(|path| !path.is_empty())
        .map(|path| ArtifactScan::Found(path.to_string()))
        .unwrap_or(ArtifactScan::NotFound)
}

/// Swap the first `/root` in `path` for `/opt`
pub fn remap_build_home(path: &str) -> String {
    path.replacen(BUILD_HOME_PREFIX, PUBLIC_PREFIX, 1)
}

/// Scan rpmbuild output and return the remapped artifact path
pub fn discover_rpm_artifact(output: &str) -> Option<String> {
    scan_wrote_line(output)
        .into_path()
        .map(|path| remap_build_home(&path))
}
