//! JSON config repository
//!
//! Loads and saves `build.json`. A missing file is an empty config; a file
//! that exists but does not parse is an error and is never overwritten.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::domain::entities::DeployConfig;
use crate::error::{BuilderError, BuilderResult};

/// Config file used when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "./build.json";

/// Environment variable overriding the config path
pub const CONFIG_PATH_ENV: &str = "BUILDER_CONFIG";

/// Pick the config path: explicit flag, then `BUILDER_CONFIG`, then `./build.json`
pub fn resolve_config_path(flag: Option<&Path>) -> PathBuf {
    resolve_config_path_with(flag, |key| std::env::var(key).ok())
}

fn resolve_config_path_with(
    flag: Option<&Path>,
    get_env: impl Fn(&str) -> Option<String>,
) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    get_env(CONFIG_PATH_ENV)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Reads and writes the deployment descriptor at one path
#[derive(Debug, Clone)]
pub struct JsonConfigRepository {
    path: PathBuf,
}

impl JsonConfigRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the config, or an empty one when the file does not exist
    pub fn load(&self) -> BuilderResult<DeployConfig> {
        if !self.exists() {
            debug!(path = %self.path.display(), "no config to load");
            return Ok(DeployConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config = parse_config(&content).map_err(|source| BuilderError::ConfigParse {
            path: self.path.clone(),
            source,
        })?;

        let unknown = config.unknown_keys();
        if !unknown.is_empty() {
            warn!(
                path = %self.path.display(),
                keys = %unknown.join(", "),
                "config has unrecognized keys; they are kept as-is"
            );
        }
        Ok(config)
    }

    /// Write the config atomically (temp file in the same directory, then rename)
    pub fn save(&self, config: &DeployConfig) -> BuilderResult<()> {
        debug!(path = %self.path.display(), "saving config");
        let content = render_config(config)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Parse `build.json` content; blank content counts as `{}`
pub fn parse_config(content: &str) -> Result<DeployConfig, serde_json::Error> {
    if content.trim().is_empty() {
        return serde_json::from_str("{}");
    }
    serde_json::from_str(content)
}

/// Pretty JSON with a trailing newline
pub fn render_config(config: &DeployConfig) -> BuilderResult<String> {
    let mut content = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;
    content.push('\n');
    Ok(content)
}
