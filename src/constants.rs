//! Application constants for the ISD locator
//!
//! This module contains the registry feed description, default values,
//! and column name mappings used throughout the application.

// =============================================================================
// Registry Feed
// =============================================================================

/// Public station history feed for the Integrated Surface Database
pub const REGISTRY_URL: &str = "https://www.ncei.noaa.gov/pub/data/noaa/isd-history.csv";

/// Field names of the raw feed header
pub mod raw {
    pub const USAF: &str = "USAF";
    pub const WBAN: &str = "WBAN";
    pub const STATION_NAME: &str = "STATION NAME";
    pub const CTRY: &str = "CTRY";
    pub const ST: &str = "ST";
    pub const CALL: &str = "CALL";
    pub const LAT: &str = "LAT";
    pub const LON: &str = "LON";
    pub const ELEV_M: &str = "ELEV(M)";
    pub const BEGIN: &str = "BEGIN";
    pub const END: &str = "END";
}

/// Header row of the raw feed, in order. A response with any other shape is
/// treated as a degraded source, not as data.
pub const RAW_HEADER: &[&str] = &[
    raw::USAF,
    raw::WBAN,
    raw::STATION_NAME,
    raw::CTRY,
    raw::ST,
    raw::CALL,
    raw::LAT,
    raw::LON,
    raw::ELEV_M,
    raw::BEGIN,
    raw::END,
];

/// Column count the feed must present before any row is parsed
pub const EXPECTED_COLUMN_COUNT: usize = RAW_HEADER.len();

/// Date format of the BEGIN/END fields in the raw feed
pub const RAW_DATE_FORMAT: &str = "%Y%m%d";

// =============================================================================
// Station Identifiers
// =============================================================================

/// Fixed width of a USAF identifier after zero-padding
pub const USAF_ID_WIDTH: usize = 6;

/// Fixed width of a WBAN identifier after zero-padding
pub const WBAN_ID_WIDTH: usize = 5;

/// Separator between the padded identifiers in a station code
pub const STATION_CODE_SEPARATOR: &str = "-";

// =============================================================================
// Search Defaults
// =============================================================================

/// Mean Earth radius used by the great-circle distance formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Number of ranked results returned when the query does not say otherwise
pub const DEFAULT_RESULT_COUNT: usize = 10;

/// Inclusive year window selected by the "all" end-year selector
pub const ALL_YEARS_START: i32 = 1900;
pub const ALL_YEARS_END: i32 = 2100;

// =============================================================================
// Cache and Network
// =============================================================================

/// Directory name under the platform cache dir
pub const CACHE_DIR_NAME: &str = "isd-locator";

/// Filename of the parsed registry cache
pub const REGISTRY_CACHE_FILENAME: &str = "isd-history.parquet";

/// Default HTTP timeout for the feed download
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// Column Name Constants
// =============================================================================

/// Column names of the typed station table
pub mod columns {
    // Identifier columns
    pub const USAF_ID: &str = "usaf_id";
    pub const WBAN_ID: &str = "wban_id";
    pub const STATION_CODE: &str = "station_code";

    // Descriptive columns
    pub const NAME: &str = "name";
    pub const COUNTRY_CODE: &str = "country_code";
    pub const STATE_CODE: &str = "state_code";
    pub const CALL_SIGN: &str = "call_sign";

    // Coordinate columns as carried inside the table (feed abbreviations)
    pub const LAT: &str = "lat";
    pub const LON: &str = "lon";

    // Coordinate columns as presented to consumers
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";

    pub const ELEVATION_M: &str = "elevation_m";

    // Operational period columns
    pub const PERIOD_START: &str = "period_start";
    pub const PERIOD_END: &str = "period_end";

    // Derived per-query column
    pub const DISTANCE_KM: &str = "distance_km";
}

/// Typed table columns in schema order
pub const TABLE_COLUMNS: &[&str] = &[
    columns::USAF_ID,
    columns::WBAN_ID,
    columns::STATION_CODE,
    columns::NAME,
    columns::COUNTRY_CODE,
    columns::STATE_CODE,
    columns::CALL_SIGN,
    columns::LAT,
    columns::LON,
    columns::ELEVATION_M,
    columns::PERIOD_START,
    columns::PERIOD_END,
];

// =============================================================================
// Helper Functions
// =============================================================================

/// Compose the unique station code from already-padded identifiers
pub fn station_code(usaf_id: &str, wban_id: &str) -> String {
    format!("{}{}{}", usaf_id, STATION_CODE_SEPARATOR, wban_id)
}

/// Zero-pad a USAF identifier to its fixed width
pub fn pad_usaf_id(raw: &str) -> String {
    format!("{:0>width$}", raw, width = USAF_ID_WIDTH)
}

/// Zero-pad a WBAN identifier to its fixed width
pub fn pad_wban_id(raw: &str) -> String {
    format!("{:0>width$}", raw, width = WBAN_ID_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_column_count_matches_header() {
        assert_eq!(EXPECTED_COLUMN_COUNT, 11);
        assert_eq!(RAW_HEADER.len(), EXPECTED_COLUMN_COUNT);
    }

    #[test]
    fn test_identifier_padding() {
        assert_eq!(pad_usaf_id("3606"), "003606");
        assert_eq!(pad_usaf_id("723060"), "723060");
        assert_eq!(pad_wban_id("137"), "00137");
        assert_eq!(pad_wban_id("13737"), "13737");

        // Some modern USAF identifiers carry a leading letter; width is preserved
        assert_eq!(pad_usaf_id("A07355"), "A07355");
    }

    #[test]
    fn test_station_code_composition() {
        assert_eq!(station_code("723060", "13737"), "723060-13737");
        assert_eq!(
            station_code(&pad_usaf_id("3606"), &pad_wban_id("99999")),
            "003606-99999"
        );
    }

    #[test]
    fn test_table_columns_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for column in TABLE_COLUMNS {
            assert!(seen.insert(column), "duplicate column name: {}", column);
        }
    }

    #[test]
    fn test_all_years_window_is_ordered() {
        assert!(ALL_YEARS_START < ALL_YEARS_END);
    }
}
