//! Tests for registry acquisition, caching and fallback behavior

use std::fs;

use tempfile::TempDir;

use super::{sample_feed, sample_table};
use crate::Error;
use crate::app::services::registry_source::{RegistrySource, read_cache, write_cache};
use crate::config::AppConfig;

/// Configuration pointing the cache at a scratch directory and the feed at
/// an unroutable endpoint
fn offline_config(temp_dir: &TempDir) -> AppConfig {
    AppConfig::default()
        .with_registry_url("http://127.0.0.1:1/isd-history.csv")
        .with_cache_dir(temp_dir.path().to_path_buf())
}

#[test]
fn test_cache_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let cache_path = temp_dir.path().join("isd-history.parquet");

    let table = sample_table();
    write_cache(&cache_path, table.clone()).unwrap();
    let reloaded = read_cache(&cache_path).unwrap();

    assert_eq!(reloaded.height(), table.height());
    assert_eq!(reloaded.get_column_names(), table.get_column_names());
}

#[tokio::test]
async fn test_load_prefers_local_file() {
    let temp_dir = TempDir::new().unwrap();
    let feed_path = temp_dir.path().join("isd-history.csv");
    fs::write(&feed_path, sample_feed()).unwrap();

    let source = RegistrySource::new(offline_config(&temp_dir));
    let table = source.load(Some(&feed_path), false).await.unwrap();

    assert_eq!(table.height(), 3);
}

#[tokio::test]
async fn test_load_missing_local_file() {
    let temp_dir = TempDir::new().unwrap();
    let source = RegistrySource::new(offline_config(&temp_dir));

    let result = source
        .load(Some(&temp_dir.path().join("absent.csv")), false)
        .await;

    assert!(matches!(result, Err(Error::FileNotFound { .. })));
}

#[tokio::test]
async fn test_load_uses_cache_when_present() {
    let temp_dir = TempDir::new().unwrap();
    let source = RegistrySource::new(offline_config(&temp_dir));

    write_cache(&source.cache_path().unwrap(), sample_table()).unwrap();
    let table = source.load(None, false).await.unwrap();

    assert_eq!(table.height(), 3);
}

#[tokio::test]
async fn test_load_falls_back_to_cache_when_download_fails() {
    let temp_dir = TempDir::new().unwrap();
    let source = RegistrySource::new(offline_config(&temp_dir));

    write_cache(&source.cache_path().unwrap(), sample_table()).unwrap();
    // refresh forces a download attempt against the dead endpoint
    let table = source.load(None, true).await.unwrap();

    assert_eq!(table.height(), 3);
}

#[tokio::test]
async fn test_load_without_cache_or_network_fails() {
    let temp_dir = TempDir::new().unwrap();
    let source = RegistrySource::new(offline_config(&temp_dir));

    let result = source.load(None, false).await;

    assert!(matches!(result, Err(Error::SourceUnavailable { .. })));
}

#[tokio::test]
async fn test_fetch_dead_endpoint() {
    let temp_dir = TempDir::new().unwrap();
    let source = RegistrySource::new(offline_config(&temp_dir));

    match source.fetch().await {
        Err(Error::SourceUnavailable { message }) => {
            assert!(message.contains("registry request failed"));
        }
        other => panic!("expected SourceUnavailable, got {:?}", other),
    }
}
