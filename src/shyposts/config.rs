use crate::error::{Result, ShyError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_CACHE_TTL_DAYS: i64 = 365;

/// How the homepage filter expresses the exclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionMode {
    /// Exclusion as a live metadata predicate evaluated by the host query
    /// engine. Always consistent, costs a join per listing query.
    Predicate,
    /// Exclusion as an ID list taken from the cached shy-ID set. Cheaper,
    /// but stale if metadata is mutated behind the cache updater's back.
    CachedIds,
}

impl Default for ExclusionMode {
    fn default() -> Self {
        ExclusionMode::Predicate
    }
}

/// Configuration for shyposts, stored in config.json next to the data files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShyConfig {
    /// Strategy for the homepage filter.
    #[serde(default)]
    pub exclusion_mode: ExclusionMode,

    /// Lifetime of the cached shy-ID set. Effectively "cache forever until
    /// explicit update"; the default is one year.
    #[serde(default = "default_cache_ttl_days")]
    pub cache_ttl_days: i64,
}

fn default_cache_ttl_days() -> i64 {
    DEFAULT_CACHE_TTL_DAYS
}

impl Default for ShyConfig {
    fn default() -> Self {
        Self {
            exclusion_mode: ExclusionMode::default(),
            cache_ttl_days: DEFAULT_CACHE_TTL_DAYS,
        }
    }
}

impl ShyConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ShyError::Io)?;
        let config: ShyConfig = serde_json::from_str(&content).map_err(ShyError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ShyError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ShyError::Serialization)?;
        fs::write(config_path, content).map_err(ShyError::Io)?;
        Ok(())
    }

    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.cache_ttl_days)
    }
}
