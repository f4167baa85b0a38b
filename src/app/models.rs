//! Domain models for ISD station search
//!
//! Defines the typed view of a registry row, the query criteria accepted by
//! the search engine, and the end-year selector with its string grammar.

use crate::constants::{DEFAULT_RESULT_COUNT, columns};
use crate::{Error, Result};
use chrono::NaiveDate;
use polars::prelude::{DataFrame, Float64Chunked};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Reference Point
// =============================================================================

/// Geographic reference point for proximity ranking.
///
/// Latitude must lie in [-90, 90] and longitude in [-180, 180], in decimal
/// degrees. The bounds are an interface precondition for callers and are not
/// re-checked inside the search pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RefPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl RefPoint {
    /// Create a new reference point
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for RefPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

// =============================================================================
// End-Year Selector
// =============================================================================

/// End-year selector controlling the temporal filter.
///
/// `Current` selects the most recent `period_end` year present anywhere in
/// the registry, `All` the full supported year window, and `Years` an
/// explicit set supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndYearSelector {
    Current,
    All,
    Years(Vec<i32>),
}

impl Default for EndYearSelector {
    fn default() -> Self {
        Self::Current
    }
}

impl EndYearSelector {
    /// Build a selector from an explicit year set.
    ///
    /// The set is sorted and deduplicated; an empty set is rejected because
    /// it cannot describe a temporal window.
    pub fn from_years(years: impl IntoIterator<Item = i32>) -> Result<Self> {
        let mut years: Vec<i32> = years.into_iter().collect();
        years.sort_unstable();
        years.dedup();

        if years.is_empty() {
            return Err(Error::invalid_argument(
                "end-year set must contain at least one year",
            ));
        }

        Ok(Self::Years(years))
    }
}

impl FromStr for EndYearSelector {
    type Err = Error;

    /// Parse the selector grammar: `current`, `all`, a single year
    /// (`2020`), a range (`1990:2000` or `1990-2000`), or a comma list of
    /// years and ranges. Anything else is an `InvalidArgument`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();

        match trimmed.to_ascii_lowercase().as_str() {
            "" => {
                return Err(Error::invalid_argument(
                    "end-year must be 'current', 'all', a year, or a year range",
                ));
            }
            "current" => return Ok(Self::Current),
            "all" => return Ok(Self::All),
            _ => {}
        }

        let mut years = Vec::new();
        for token in trimmed.split(',') {
            let token = token.trim();
            parse_year_token(token, &mut years)
                .ok_or_else(|| Error::invalid_argument(format!("invalid end-year '{}'", token)))?;
        }

        Self::from_years(years)
    }
}

/// Parse one token of the selector grammar into `years`.
///
/// Returns `None` on any malformed token so the caller can report the
/// offending fragment.
fn parse_year_token(token: &str, years: &mut Vec<i32>) -> Option<()> {
    if let Some((start, end)) = token.split_once(':').or_else(|| token.split_once('-')) {
        let start: i32 = start.trim().parse().ok()?;
        let end: i32 = end.trim().parse().ok()?;
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        years.extend(lo..=hi);
    } else {
        years.push(token.parse().ok()?);
    }
    Some(())
}

impl fmt::Display for EndYearSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::All => write!(f, "all"),
            Self::Years(years) => {
                let rendered: Vec<String> = years.iter().map(|y| y.to_string()).collect();
                write!(f, "{}", rendered.join(","))
            }
        }
    }
}

// =============================================================================
// Query Criteria
// =============================================================================

/// Search criteria accepted by the engine.
///
/// All predicates are optional; an empty query matches every record that
/// survives the unconditional coordinate-completeness and temporal stages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationQuery {
    /// Case-insensitive substring of the station name
    pub name: Option<String>,

    /// Two-letter country code, matched case-insensitively
    pub country: Option<String>,

    /// Two-letter state code, matched case-insensitively
    pub state: Option<String>,

    /// Reference point for distance ranking
    pub reference: Option<RefPoint>,

    /// Maximum number of ranked results; ignored without a reference point
    pub count: usize,

    /// Temporal window selector for `period_end`
    pub end_year: EndYearSelector,
}

impl Default for StationQuery {
    fn default() -> Self {
        Self {
            name: None,
            country: None,
            state: None,
            reference: None,
            count: DEFAULT_RESULT_COUNT,
            end_year: EndYearSelector::Current,
        }
    }
}

impl StationQuery {
    /// Create an empty query with default count and end-year
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by name substring
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Filter by country code
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Filter by state code
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Rank by distance from a reference point
    pub fn with_reference(mut self, latitude: f64, longitude: f64) -> Self {
        self.reference = Some(RefPoint::new(latitude, longitude));
        self
    }

    /// Limit the number of ranked results
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Select the temporal window
    pub fn with_end_year(mut self, end_year: EndYearSelector) -> Self {
        self.end_year = end_year;
        self
    }
}

// =============================================================================
// Station Record
// =============================================================================

/// One station row in its typed form.
///
/// `distance_km` is populated only when the row came from a ranked result
/// table; it is a per-query derivation, never part of the registry itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    pub usaf_id: String,
    pub wban_id: String,
    pub station_code: String,
    pub name: String,
    pub country_code: Option<String>,
    pub state_code: Option<String>,
    pub call_sign: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation_m: Option<f64>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl StationRecord {
    /// Extract typed records from a station table.
    ///
    /// Accepts both the internal coordinate names (`lat`/`lon`) and the
    /// semantic names the engine emits (`latitude`/`longitude`), so it works
    /// on raw registries and on result tables alike.
    pub fn from_frame(df: &DataFrame) -> Result<Vec<StationRecord>> {
        let usaf = df.column(columns::USAF_ID)?.as_materialized_series().str()?;
        let wban = df.column(columns::WBAN_ID)?.as_materialized_series().str()?;
        let code = df
            .column(columns::STATION_CODE)?
            .as_materialized_series()
            .str()?;
        let name = df.column(columns::NAME)?.as_materialized_series().str()?;
        let country = df
            .column(columns::COUNTRY_CODE)?
            .as_materialized_series()
            .str()?;
        let state = df
            .column(columns::STATE_CODE)?
            .as_materialized_series()
            .str()?;
        let call = df
            .column(columns::CALL_SIGN)?
            .as_materialized_series()
            .str()?;
        let lat = coordinate_column(df, columns::LATITUDE, columns::LAT)?;
        let lon = coordinate_column(df, columns::LONGITUDE, columns::LON)?;
        let elevation = df
            .column(columns::ELEVATION_M)?
            .as_materialized_series()
            .f64()?;

        let period_start: Vec<Option<NaiveDate>> = df
            .column(columns::PERIOD_START)?
            .as_materialized_series()
            .date()?
            .as_date_iter()
            .collect();
        let period_end: Vec<Option<NaiveDate>> = df
            .column(columns::PERIOD_END)?
            .as_materialized_series()
            .date()?
            .as_date_iter()
            .collect();

        let distance = match df.column(columns::DISTANCE_KM) {
            Ok(column) => Some(column.as_materialized_series().f64()?.clone()),
            Err(_) => None,
        };

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            records.push(StationRecord {
                usaf_id: usaf.get(i).unwrap_or_default().to_string(),
                wban_id: wban.get(i).unwrap_or_default().to_string(),
                station_code: code.get(i).unwrap_or_default().to_string(),
                name: name.get(i).unwrap_or_default().to_string(),
                country_code: country.get(i).map(str::to_string),
                state_code: state.get(i).map(str::to_string),
                call_sign: call.get(i).map(str::to_string),
                latitude: lat.get(i),
                longitude: lon.get(i),
                elevation_m: elevation.get(i),
                period_start: period_start[i],
                period_end: period_end[i],
                distance_km: distance.as_ref().and_then(|d| d.get(i)),
            });
        }

        Ok(records)
    }
}

/// Look up a float column under its semantic name, falling back to the
/// internal abbreviation.
fn coordinate_column<'a>(
    df: &'a DataFrame,
    semantic: &str,
    internal: &str,
) -> Result<&'a Float64Chunked> {
    let column = df
        .column(semantic)
        .or_else(|_| df.column(internal))?
        .as_materialized_series()
        .f64()?;
    Ok(column)
}
