//! Version resolution
//!
//! The build host keeps `VERSION` and `RELEASE` files in its working
//! directory. Together with the architecture they pin the RPM file name, which
//! is how the package name for `rpm -e` is recovered.

use tracing::debug;

use crate::domain::entities::HostDescriptor;
use crate::domain::ports::RemoteExecutor;
use crate::domain::services::package_prefix;
use crate::error::{BuilderError, BuilderResult};

/// Version marker file in the build host's working directory
pub const VERSION_FILE: &str = "VERSION";

/// Release marker file in the build host's working directory
pub const RELEASE_FILE: &str = "RELEASE";

/// Version and release read from the build host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledVersion {
    pub version: String,
    pub release: u32,
}

/// Version/release plus the package name derived from them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    pub version: InstalledVersion,
    pub prefix: String,
}

fn read_marker<E: RemoteExecutor>(
    executor: &E,
    host: &HostDescriptor,
    file: &str,
) -> BuilderResult<String> {
    let path = host.ssh.remote_path(file);
    let content = executor.read_file(&host.ssh, &path).map_err(|e| {
        BuilderError::VersionResolution(format!(
            "cannot read {} on {}: {}",
            path,
            host.address(),
            e
        ))
    })?;
    let value = content.lines().next().unwrap_or("").trim().to_string();
    if value.is_empty() {
        return Err(BuilderError::VersionResolution(format!(
            "{} on {} is empty",
            path,
            host.address()
        )));
    }
    Ok(value)
}

/// Read VERSION and RELEASE from `host`
pub fn resolve_version<E: RemoteExecutor>(
    executor: &E,
    host: &HostDescriptor,
) -> BuilderResult<InstalledVersion> {
    let version = read_marker(executor, host, VERSION_FILE)?;
    let release_text = read_marker(executor, host, RELEASE_FILE)?;
    let release = release_text.parse::<u32>().map_err(|_| {
        BuilderError::VersionResolution(format!(
            "release '{}' on {} is not a number",
            release_text,
            host.address()
        ))
    })?;
    debug!(version = %version, release, "resolved installed version");
    Ok(InstalledVersion { version, release })
}

/// Resolve the version and the `rpm -e` package name for the built artifact
pub fn resolve_package<E: RemoteExecutor>(
    executor: &E,
    build_system: &HostDescriptor,
) -> BuilderResult<ResolvedPackage> {
    let base_name = build_system.artifact_base_name().ok_or_else(|| {
        BuilderError::Configuration("no artifact recorded for the build system".to_string())
    })?;
    let version = resolve_version(executor, build_system)?;
    let prefix = package_prefix(
        base_name,
        &version.version,
        version.release,
        build_system.arch(),
    )?;
    Ok(ResolvedPackage { version, prefix })
}
