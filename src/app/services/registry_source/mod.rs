//! Registry acquisition and caching
//!
//! This module owns every way a station table enters the process: a local
//! file supplied by the caller, the on-disk parquet cache, or a fresh
//! download from the NOAA ISD history endpoint. Resolution order and the
//! stale-cache fallback are documented on [`RegistrySource::load`].

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use polars::prelude::*;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::{Error, Result};

pub mod parser;

#[cfg(test)]
pub mod tests;

// Re-export key functions for convenience
pub use parser::{parse_registry, parse_registry_file};

/// Provides the station table from the network, the cache, or a local file.
///
/// The table itself is immutable once loaded; this type only decides where
/// it comes from and keeps the parquet cache current.
#[derive(Debug, Clone, Default)]
pub struct RegistrySource {
    /// Feed URL, cache location and request timeout
    config: AppConfig,
}

impl RegistrySource {
    /// Create a registry source with the given configuration
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Resolve a station table.
    ///
    /// Resolution order:
    /// 1. `local_file`, when given. Errors from an explicit file are final.
    /// 2. The parquet cache, unless `refresh` is set.
    /// 3. The network feed. A successful download refreshes the cache; a
    ///    failed download falls back to a stale cache when one exists.
    pub async fn load(&self, local_file: Option<&Path>, refresh: bool) -> Result<DataFrame> {
        if let Some(path) = local_file {
            debug!(path = %path.display(), "loading registry from local file");
            return parse_registry_file(path);
        }

        let cache_path = self.cache_path()?;
        if !refresh && cache_path.exists() {
            debug!(path = %cache_path.display(), "loading registry from cache");
            return read_cache(&cache_path);
        }

        match self.fetch().await {
            Ok(table) => {
                // A broken cache write must not discard a good download.
                if let Err(error) = write_cache(&cache_path, table.clone()) {
                    warn!(%error, "failed to write registry cache");
                }
                Ok(table)
            }
            Err(error) if cache_path.exists() => {
                warn!(%error, "registry download failed, using cached copy");
                read_cache(&cache_path)
            }
            Err(error) => Err(error),
        }
    }

    /// Download and parse the registry feed.
    pub async fn fetch(&self) -> Result<DataFrame> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()
            .map_err(|e| {
                Error::source_unavailable(format!("failed to build HTTP client: {}", e))
            })?;

        info!(url = %self.config.registry_url, "downloading station registry");

        let response = client
            .get(&self.config.registry_url)
            .send()
            .await
            .map_err(|e| Error::source_unavailable(format!("registry request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::source_unavailable(format!(
                "registry feed returned HTTP {}",
                response.status()
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            Error::source_unavailable(format!("failed to read registry response: {}", e))
        })?;

        let table = parse_registry(body.as_ref())?;
        info!(stations = table.height(), "parsed station registry");

        Ok(table)
    }

    /// Location of the parquet cache file for the registry
    pub fn cache_path(&self) -> Result<PathBuf> {
        self.config.registry_cache_path()
    }
}

/// Write the station table to the parquet cache.
pub fn write_cache(path: &Path, mut table: DataFrame) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| Error::io(format!("failed to create {}", path.display()), e))?;

    ParquetWriter::new(file).finish(&mut table)?;
    debug!(path = %path.display(), rows = table.height(), "wrote registry cache");

    Ok(())
}

/// Read the station table back from the parquet cache.
pub fn read_cache(path: &Path) -> Result<DataFrame> {
    let table = LazyFrame::scan_parquet(path, Default::default())?.collect()?;

    Ok(table)
}
