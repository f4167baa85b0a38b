//! Configuration management and validation.
//!
//! Provides the application configuration used by the registry source and
//! the CLI: feed location, cache placement, network timeout, and the
//! default result count for ranked queries.

use crate::constants::{
    CACHE_DIR_NAME, DEFAULT_RESULT_COUNT, DEFAULT_TIMEOUT_SECS, REGISTRY_CACHE_FILENAME,
    REGISTRY_URL,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// URL of the station history feed
    pub registry_url: String,

    /// Cache directory override; platform cache dir when absent
    pub cache_dir: Option<PathBuf>,

    /// HTTP timeout for the feed download in seconds
    pub timeout_secs: u64,

    /// Default number of results for ranked queries
    pub default_count: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            registry_url: REGISTRY_URL.to_string(),
            cache_dir: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_count: DEFAULT_RESULT_COUNT,
        }
    }
}

impl AppConfig {
    /// Override the feed URL
    pub fn with_registry_url(mut self, url: impl Into<String>) -> Self {
        self.registry_url = url.into();
        self
    }

    /// Override the cache directory
    pub fn with_cache_dir(mut self, dir: PathBuf) -> Self {
        self.cache_dir = Some(dir);
        self
    }

    /// Override the download timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Resolve the cache directory, creating it if necessary
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let dir = match &self.cache_dir {
            Some(dir) => dir.clone(),
            None => dirs::cache_dir()
                .ok_or_else(|| {
                    Error::configuration("could not determine a platform cache directory")
                })?
                .join(CACHE_DIR_NAME),
        };

        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| {
                Error::configuration(format!(
                    "could not create cache directory '{}': {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        Ok(dir)
    }

    /// Path of the parquet registry cache
    pub fn registry_cache_path(&self) -> Result<PathBuf> {
        Ok(self.cache_dir()?.join(REGISTRY_CACHE_FILENAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.registry_url, REGISTRY_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.default_count, DEFAULT_RESULT_COUNT);
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn test_builder_methods() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::default()
            .with_registry_url("http://localhost/isd-history.csv")
            .with_cache_dir(temp_dir.path().to_path_buf())
            .with_timeout_secs(5);

        assert_eq!(config.registry_url, "http://localhost/isd-history.csv");
        assert_eq!(config.cache_dir, Some(temp_dir.path().to_path_buf()));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_cache_path_uses_override() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::default().with_cache_dir(temp_dir.path().join("nested"));

        let path = config.registry_cache_path().unwrap();
        assert!(path.starts_with(temp_dir.path().join("nested")));
        assert!(path.ends_with(REGISTRY_CACHE_FILENAME));

        // Resolution creates the directory
        assert!(temp_dir.path().join("nested").is_dir());
    }
}
