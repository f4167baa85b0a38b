//! Search command implementation for the ISD locator CLI
//!
//! This module loads the station registry, runs the filter-and-rank
//! pipeline, and renders the matches in human, JSON or CSV form.

use super::shared::{CommandStats, create_spinner, setup_logging};
use crate::app::models::{StationQuery, StationRecord};
use crate::app::services::registry_source::RegistrySource;
use crate::app::services::search_engine;
use crate::cli::args::{OutputFormat, SearchArgs};
use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

/// Search command runner for the ISD locator
///
/// This function resolves the registry (local file, cache or download),
/// applies the query and writes the report.
pub async fn run_search(args: SearchArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    // Set up logging
    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Starting station registry search");
    debug!("Search arguments: {:?}", args);

    // Validate arguments
    args.validate()?;

    let query = args.to_query();
    let source = RegistrySource::new(args.to_config());

    // A spinner is only worth showing on the cache/download path; parsing a
    // local file is fast
    let spinner = if args.show_progress() && args.registry.is_none() {
        Some(create_spinner("Loading station registry..."))
    } else {
        None
    };

    let load_result = source.load(args.registry.as_deref(), args.fresh).await;

    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }

    let table = load_result?;

    info!(
        "Registry loaded: {} stations in {:.2}s",
        table.height(),
        start_time.elapsed().as_secs_f64()
    );

    // Run the filter-and-rank pipeline
    let matches = search_engine::search(&table, &query)?;
    let records = StationRecord::from_frame(&matches)?;

    debug!("Query matched {} stations", records.len());

    // Generate report
    generate_search_report(&args, &query, &records, table.height())?;

    let stats = CommandStats {
        stations_loaded: table.height(),
        stations_reported: records.len(),
        processing_time: start_time.elapsed(),
    };

    info!(
        "Search completed in {:.2}s",
        stats.processing_time.as_secs_f64()
    );

    Ok(stats)
}

/// Generate the search report based on output format
fn generate_search_report(
    args: &SearchArgs,
    query: &StationQuery,
    records: &[StationRecord],
    registry_size: usize,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => generate_human_report(args, query, records, registry_size),
        OutputFormat::Json => generate_json_report(args, query, records, registry_size),
        OutputFormat::Csv => generate_csv_report(args, records),
    }
}

/// Generate human-readable search report
fn generate_human_report(
    args: &SearchArgs,
    query: &StationQuery,
    records: &[StationRecord],
    registry_size: usize,
) -> Result<()> {
    let ranked = query.reference.is_some();

    let mut output = format!(
        "📡 ISD Station Search\n\
         =====================\n\
         🔎 Filters: {}\n",
        describe_filters(query)
    );

    if let Some(reference) = &query.reference {
        output.push_str(&format!(
            "🌍 Reference: {} (nearest {})\n",
            reference, query.count
        ));
    }

    output.push_str(&format!(
        "🏭 Stations: {} in registry, {} matched\n\n",
        registry_size,
        records.len()
    ));

    if records.is_empty() {
        output.push_str(
            "No stations matched the query. Try --end-year all or a broader name filter.\n",
        );
    } else {
        output.push_str(
            "Code         | Station Name             | CTRY | ST | Call | Lat      | Lon       | Elev(m) | Period",
        );
        if ranked {
            output.push_str("                 | Dist(km)");
        }
        output.push('\n');
        output.push_str(
            "-------------|--------------------------|------|----|------|----------|-----------|---------|-----------------------",
        );
        if ranked {
            output.push_str("|---------");
        }
        output.push('\n');

        for record in records {
            output.push_str(&format!(
                "{:12} | {:24} | {:4} | {:2} | {:4} | {:>8} | {:>9} | {:>7} | {} to {}",
                record.station_code,
                truncate_name(&record.name, 24),
                record.country_code.as_deref().unwrap_or(""),
                record.state_code.as_deref().unwrap_or(""),
                record.call_sign.as_deref().unwrap_or(""),
                record
                    .latitude
                    .map_or_else(String::new, |v| format!("{:.3}", v)),
                record
                    .longitude
                    .map_or_else(String::new, |v| format!("{:.3}", v)),
                record
                    .elevation_m
                    .map_or_else(String::new, |v| format!("{:.1}", v)),
                record
                    .period_start
                    .map_or_else(|| "?".to_string(), |d| d.format("%Y-%m-%d").to_string()),
                record
                    .period_end
                    .map_or_else(|| "?".to_string(), |d| d.format("%Y-%m-%d").to_string()),
            ));
            if let Some(distance) = record.distance_km {
                output.push_str(&format!(" | {:>8}", format!("{:.1}", distance)));
            }
            output.push('\n');
        }
    }

    emit_report(&args.output_file, &output, "station report")
}

/// Generate JSON search report
fn generate_json_report(
    args: &SearchArgs,
    query: &StationQuery,
    records: &[StationRecord],
    registry_size: usize,
) -> Result<()> {
    use serde_json::json;

    let json_report = json!({
        "metadata": {
            "stations_in_registry": registry_size,
            "stations_in_report": records.len(),
            "generated_at": chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
        },
        "query": query,
        "stations": records
    });

    let json_string = serde_json::to_string_pretty(&json_report)
        .map_err(|e| Error::configuration(format!("Failed to serialize search report: {}", e)))?;

    emit_report(&args.output_file, &json_string, "JSON station report")
}

/// Generate CSV search report
fn generate_csv_report(args: &SearchArgs, records: &[StationRecord]) -> Result<()> {
    let mut csv = String::new();
    csv.push_str(
        "usaf_id,wban_id,station_code,name,country_code,state_code,call_sign,latitude,longitude,elevation_m,period_start,period_end,distance_km\n",
    );

    for record in records {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
            record.usaf_id,
            record.wban_id,
            record.station_code,
            csv_escape(&record.name),
            record.country_code.as_deref().unwrap_or(""),
            record.state_code.as_deref().unwrap_or(""),
            record.call_sign.as_deref().unwrap_or(""),
            record
                .latitude
                .map_or_else(String::new, |v| v.to_string()),
            record
                .longitude
                .map_or_else(String::new, |v| v.to_string()),
            record
                .elevation_m
                .map_or_else(String::new, |v| v.to_string()),
            record
                .period_start
                .map_or_else(String::new, |d| d.format("%Y-%m-%d").to_string()),
            record
                .period_end
                .map_or_else(String::new, |d| d.format("%Y-%m-%d").to_string()),
            record
                .distance_km
                .map_or_else(String::new, |v| v.to_string()),
        ));
    }

    emit_report(&args.output_file, &csv, "CSV station report")
}

/// Write the rendered report to the output file, or stdout if none was given
fn emit_report(output_file: &Option<PathBuf>, content: &str, label: &str) -> Result<()> {
    match output_file {
        Some(path) => {
            std::fs::write(path, content).map_err(|e| {
                Error::configuration(format!(
                    "Failed to write {} to {}: {}",
                    label,
                    path.display(),
                    e
                ))
            })?;
            info!("{} written to: {}", label, path.display());
        }
        None => {
            println!("{}", content);
        }
    }

    Ok(())
}

/// Describe the active filters for the report header
fn describe_filters(query: &StationQuery) -> String {
    let mut parts = Vec::new();

    if let Some(name) = &query.name {
        parts.push(format!("name~\"{}\"", name));
    }
    if let Some(country) = &query.country {
        parts.push(format!("country={}", country.to_ascii_uppercase()));
    }
    if let Some(state) = &query.state {
        parts.push(format!("state={}", state.to_ascii_uppercase()));
    }
    parts.push(format!("end-year={}", query.end_year));

    parts.join(", ")
}

/// Truncate a station name to fit the report column
fn truncate_name(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        let kept: String = value.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        value.to_string()
    }
}

/// Escape CSV field values
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
