//! Build identity for `-ver`

/// Identity of this binary, captured at compile time by `build.rs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: String,
    pub branch: String,
    pub revision: String,
    pub timestamp: String,
}

impl BuildInfo {
    /// The identity baked into this build
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            branch: env!("BUILDER_GIT_BRANCH").to_string(),
            revision: env!("BUILDER_GIT_REVISION").to_string(),
            timestamp: env!("BUILDER_BUILD_TIME").to_string(),
        }
    }

    /// `<version>[-<branch>]`; release branches carry no suffix
    pub fn build_version(&self) -> String {
        match self.branch.as_str() {
            "" | "main" | "HEAD" | "unknown" => self.version.clone(),
            branch => format!("{}-{}", self.version, branch),
        }
    }

    /// Line printed by `-ver`
    pub fn banner(&self) -> String {
        format!("Builder - {} ({})", self.build_version(), self.timestamp)
    }
}
