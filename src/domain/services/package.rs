//! Package naming rules
//!
//! RPM file names follow `<name>-<version>-<release>.<arch>.rpm`. `rpm -e`
//! needs `<name>`, which is recovered by cutting the known suffix off the
//! artifact's file name. A suffix that does not match means the build host's
//! VERSION/RELEASE disagree with the artifact, and guessing would remove the
//! wrong package on a target.

use crate::error::{BuilderError, BuilderResult};

/// `-<version>-<release>.<arch>.rpm`
pub fn rpm_suffix(version: &str, release: u32, arch: &str) -> String {
    format!("-{}-{}.{}.rpm", version, release, arch)
}

/// Package name for `rpm -e`, from the artifact's base file name
pub fn package_prefix(
    base_name: &str,
    version: &str,
    release: u32,
    arch: &str,
) -> BuilderResult<String> {
    let suffix = rpm_suffix(version, release, arch);
    match base_name.strip_suffix(&suffix) {
        Some(prefix) if !prefix.is_empty() => Ok(prefix.to_string()),
        _ => Err(BuilderError::VersionResolution(format!(
            "artifact '{}' does not end with '{}'",
            base_name, suffix
        ))),
    }
}

/// Build command for a plain binary: a Go build named after the package
pub fn binary_build_command(package_name: &str) -> Option<String> {
    let name = package_name.trim();
    if name.is_empty() {
        None
    } else {
        Some(format!("go build -o {}", name))
    }
}
