//! Command-line argument definitions for the ISD station locator
//!
//! This module defines the complete CLI interface using the clap derive API.
//! Each subcommand owns its argument struct together with the validation
//! rules that cannot be expressed through clap attributes alone.

use crate::app::models::{EndYearSelector, RefPoint, StationQuery};
use crate::config::AppConfig;
use crate::constants::{DEFAULT_RESULT_COUNT, DEFAULT_TIMEOUT_SECS};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the ISD station locator
///
/// Searches the NOAA Integrated Surface Database station history file:
/// roughly 30,000 weather stations worldwide with identifiers, coordinates
/// and operational periods.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "isd-locator",
    version,
    about = "Search the NOAA ISD weather station registry",
    long_about = "Searches the NOAA Integrated Surface Database station history file: roughly \
                  30,000 weather stations worldwide with identifiers, coordinates and \
                  operational periods. Filters combine by AND; adding a reference point ranks \
                  the survivors by great-circle distance. The parsed registry is cached \
                  locally as Parquet for fast repeat queries."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the locator
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Filter and rank stations from the registry (default command)
    Search(SearchArgs),
    /// Download the registry feed and refresh the local cache
    Fetch(FetchArgs),
}

/// Arguments for the search command (registry queries)
#[derive(Debug, Clone, Parser)]
pub struct SearchArgs {
    /// Case-insensitive substring of the station name
    ///
    /// Matches anywhere in the registry name field, so partial names like
    /// "heathrow" or "kennedy" work.
    #[arg(
        short = 'n',
        long = "name",
        value_name = "SUBSTRING",
        help = "Filter by station name substring (case-insensitive)"
    )]
    pub name: Option<String>,

    /// Two-letter FIPS country code
    ///
    /// Compared case-insensitively against the registry CTRY field.
    #[arg(
        short = 'c',
        long = "country",
        value_name = "CODE",
        help = "Filter by FIPS country code (e.g. UK, US)"
    )]
    pub country: Option<String>,

    /// Two-letter US state code
    #[arg(
        short = 's',
        long = "state",
        value_name = "CODE",
        help = "Filter by US state code (e.g. NY, CA)"
    )]
    pub state: Option<String>,

    /// Reference latitude in decimal degrees
    ///
    /// Must be paired with --longitude. Supplying a reference point ranks
    /// the matching stations by great-circle distance and truncates the
    /// result to --count rows.
    #[arg(
        long = "latitude",
        value_name = "DEGREES",
        allow_negative_numbers = true,
        help = "Reference latitude for distance ranking (-90 to 90)"
    )]
    pub latitude: Option<f64>,

    /// Reference longitude in decimal degrees
    #[arg(
        long = "longitude",
        value_name = "DEGREES",
        allow_negative_numbers = true,
        help = "Reference longitude for distance ranking (-180 to 180)"
    )]
    pub longitude: Option<f64>,

    /// Number of ranked results to return
    ///
    /// Only applies together with a reference point; without one the search
    /// returns every match.
    #[arg(
        long = "count",
        value_name = "N",
        default_value_t = DEFAULT_RESULT_COUNT,
        help = "Number of nearest stations to return"
    )]
    pub count: usize,

    /// End-year selector for the operational period filter
    ///
    /// Accepts "current" (stations still reporting in the registry's most
    /// recent year), "all" (any year), a single year, a range like
    /// 1990:2000, or a comma-separated list of years and ranges.
    #[arg(
        short = 'y',
        long = "end-year",
        value_name = "SELECTOR",
        default_value = "current",
        help = "End-year selector: current, all, a year, or a range"
    )]
    pub end_year: EndYearSelector,

    /// Read the registry from a local CSV file instead of the network
    ///
    /// The file must carry the standard ISD history header. Cache and
    /// download logic are skipped entirely.
    #[arg(
        long = "registry",
        value_name = "FILE",
        help = "Read the registry from a local ISD history CSV file"
    )]
    pub registry: Option<PathBuf>,

    /// Force a fresh download, bypassing the local cache
    #[arg(
        long = "fresh",
        help = "Bypass the cache and download a fresh registry"
    )]
    pub fresh: bool,

    /// Cache directory for the parsed registry
    ///
    /// Defaults to the platform cache directory (~/.cache/isd-locator on
    /// Linux) if not specified.
    #[arg(
        long = "cache-path",
        value_name = "PATH",
        help = "Cache directory for the parsed registry"
    )]
    pub cache_path: Option<PathBuf>,

    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Output file for results
    ///
    /// If not specified, outputs to stdout
    #[arg(
        short = 'o',
        long = "output-file",
        value_name = "FILE",
        help = "Write results to a file instead of stdout"
    )]
    pub output_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and critical messages. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the fetch command (cache refresh)
#[derive(Debug, Clone, Parser)]
pub struct FetchArgs {
    /// Override the registry feed URL
    ///
    /// Defaults to the NOAA ISD history endpoint.
    #[arg(
        long = "url",
        value_name = "URL",
        help = "Override the registry feed URL"
    )]
    pub url: Option<String>,

    /// Cache directory for the parsed registry
    ///
    /// Defaults to the platform cache directory (~/.cache/isd-locator on
    /// Linux) if not specified.
    #[arg(
        long = "cache-path",
        value_name = "PATH",
        help = "Cache directory for the parsed registry"
    )]
    pub cache_path: Option<PathBuf>,

    /// HTTP timeout for the download
    #[arg(
        long = "timeout",
        value_name = "SECONDS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        help = "HTTP timeout in seconds for the download"
    )]
    pub timeout_secs: u64,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl SearchArgs {
    /// Validate the search command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        match (self.latitude, self.longitude) {
            (Some(_), None) | (None, Some(_)) => {
                return Err(Error::invalid_argument(
                    "latitude and longitude must be provided together",
                ));
            }
            _ => {}
        }

        if let Some(latitude) = self.latitude {
            if !(-90.0..=90.0).contains(&latitude) {
                return Err(Error::invalid_argument(format!(
                    "latitude {} is outside the valid range -90 to 90",
                    latitude
                )));
            }
        }

        if let Some(longitude) = self.longitude {
            if !(-180.0..=180.0).contains(&longitude) {
                return Err(Error::invalid_argument(format!(
                    "longitude {} is outside the valid range -180 to 180",
                    longitude
                )));
            }
        }

        if self.count == 0 {
            return Err(Error::invalid_argument("count must be at least 1"));
        }

        // Validate registry file exists if specified
        if let Some(registry) = &self.registry {
            if !registry.exists() {
                return Err(Error::file_not_found(registry.display().to_string()));
            }
            if !registry.is_file() {
                return Err(Error::invalid_argument(format!(
                    "registry path is not a file: {}",
                    registry.display()
                )));
            }
        }

        // Validate cache path is a directory if it already exists
        if let Some(cache_path) = &self.cache_path {
            if cache_path.exists() && !cache_path.is_dir() {
                return Err(Error::configuration(format!(
                    "cache path is not a directory: {}",
                    cache_path.display()
                )));
            }
        }

        // Validate output file directory exists if specified
        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "output file directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Get the reference point assembled from the coordinate arguments
    pub fn reference(&self) -> Option<RefPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(RefPoint::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Build the registry query described by these arguments
    pub fn to_query(&self) -> StationQuery {
        StationQuery {
            name: self.name.clone(),
            country: self.country.clone(),
            state: self.state.clone(),
            reference: self.reference(),
            count: self.count,
            end_year: self.end_year.clone(),
        }
    }

    /// Build the application configuration described by these arguments
    pub fn to_config(&self) -> AppConfig {
        match &self.cache_path {
            Some(dir) => AppConfig::default().with_cache_dir(dir.clone()),
            None => AppConfig::default(),
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress spinners (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl FetchArgs {
    /// Validate the fetch command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::configuration("timeout must be at least 1 second"));
        }

        if let Some(cache_path) = &self.cache_path {
            if cache_path.exists() && !cache_path.is_dir() {
                return Err(Error::configuration(format!(
                    "cache path is not a directory: {}",
                    cache_path.display()
                )));
            }
        }

        Ok(())
    }

    /// Build the application configuration described by these arguments
    pub fn to_config(&self) -> AppConfig {
        let mut config = AppConfig::default().with_timeout_secs(self.timeout_secs);
        if let Some(url) = &self.url {
            config = config.with_registry_url(url.clone());
        }
        if let Some(dir) = &self.cache_path {
            config = config.with_cache_dir(dir.clone());
        }
        config
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress spinners (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl Default for SearchArgs {
    fn default() -> Self {
        Self {
            name: None,
            country: None,
            state: None,
            latitude: None,
            longitude: None,
            count: DEFAULT_RESULT_COUNT,
            end_year: EndYearSelector::Current,
            registry: None,
            fresh: false,
            cache_path: None,
            output_format: OutputFormat::Human,
            output_file: None,
            verbose: 0,
            quiet: false,
        }
    }
}

impl Default for FetchArgs {
    fn default() -> Self {
        Self {
            url: None,
            cache_path: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            verbose: 0,
            quiet: false,
        }
    }
}
