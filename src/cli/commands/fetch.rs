//! Fetch command implementation for the ISD locator CLI
//!
//! This module downloads the registry feed, parses it, and refreshes the
//! local Parquet cache unconditionally.

use super::shared::{CommandStats, create_spinner, setup_logging};
use crate::Result;
use crate::app::services::registry_source::{self, RegistrySource};
use crate::cli::args::FetchArgs;
use colored::Colorize;
use std::time::Instant;
use tracing::{debug, info};

/// Fetch command runner for the ISD locator
///
/// Downloads and parses the registry feed, then rewrites the local cache.
pub async fn run_fetch(args: FetchArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    // Set up logging
    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Starting registry fetch");
    debug!("Fetch arguments: {:?}", args);

    // Validate arguments
    args.validate()?;

    let source = RegistrySource::new(args.to_config());
    let cache_path = source.cache_path()?;

    let spinner = if args.show_progress() {
        Some(create_spinner("Downloading station registry..."))
    } else {
        None
    };

    let fetch_result = source.fetch().await;

    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }

    let table = fetch_result?;

    // This command exists to refresh the cache, so a write failure is a hard
    // error here rather than the best-effort warning used on the search path
    registry_source::write_cache(&cache_path, table.clone())?;

    let stats = CommandStats {
        stations_loaded: table.height(),
        stations_reported: table.height(),
        processing_time: start_time.elapsed(),
    };

    if !args.quiet {
        println!("{}", "Registry fetch complete".bright_green().bold());
        println!(
            "  {} {}",
            "Stations:".bright_cyan(),
            stats.stations_loaded.to_string().bright_white().bold()
        );
        println!("  {} {}", "Cache:".bright_cyan(), cache_path.display());
        println!(
            "  {} {:.2}s",
            "Time elapsed:".bright_cyan(),
            stats.processing_time.as_secs_f64()
        );
    }

    info!(
        "Registry fetch completed in {:.2}s",
        stats.processing_time.as_secs_f64()
    );

    Ok(stats)
}
