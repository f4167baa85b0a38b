//! ISD Locator Library
//!
//! A Rust library for searching the NOAA Integrated Surface Database (ISD)
//! station registry: roughly 30,000 weather stations worldwide, each with
//! identifiers, coordinates, and an operational period.
//!
//! This library provides tools for:
//! - Fetching and parsing the ISD station history feed into a typed table
//! - Filtering stations by name substring, country, and state
//! - Ranking stations by great-circle distance to a reference point
//! - Resolving "current"/"all"/literal end-year selectors against the table
//! - Caching the parsed registry as Parquet for fast reloads
//! - Comprehensive error handling with a small, stable error taxonomy

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod registry_source;
        pub mod search_engine;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{EndYearSelector, RefPoint, StationQuery, StationRecord};
pub use app::services::registry_source::RegistrySource;
pub use app::services::search_engine::search;
pub use config::AppConfig;

/// Result type alias for the ISD locator
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for registry acquisition and station search operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Query parameter is malformed (bad end-year selector, empty year set,
    /// half-specified reference point)
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The registry feed did not yield a well-formed station table
    #[error("Registry source unavailable: {message}")]
    SourceUnavailable { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error: {message}")]
    CsvParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// DataFrame operation failed
    #[error("DataFrame error: {0}")]
    DataFrame(#[from] polars::error::PolarsError),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a source unavailable error
    pub fn source_unavailable(message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}
