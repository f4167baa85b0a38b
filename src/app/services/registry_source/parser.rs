//! Registry feed parsing
//!
//! Turns the raw ISD history document into the canonical station table.
//! Identifiers are zero-padded and joined into the station code, and blank
//! or unparsable fields become nulls. The service period columns arrive as
//! `yyyymmdd` text and are cast to typed dates.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use polars::df;
use polars::prelude::*;
use tracing::debug;

use crate::constants::{self, columns, raw};
use crate::{Error, Result};

/// Parse the registry feed from a reader into the canonical station table.
///
/// The header is validated before any row is read: a column count other than
/// the published layout means the endpoint served something other than the
/// registry (an outage page, a redirect notice) and fails the whole parse.
/// Rows that do not carry both station identifiers are skipped.
pub fn parse_registry(reader: impl Read) -> Result<DataFrame> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| Error::csv_parsing("failed to read registry header", Some(e)))?
        .clone();
    let header_map = validate_header(&headers)?;

    let mut usaf_ids: Vec<String> = Vec::new();
    let mut wban_ids: Vec<String> = Vec::new();
    let mut station_codes: Vec<String> = Vec::new();
    let mut names: Vec<Option<String>> = Vec::new();
    let mut countries: Vec<Option<String>> = Vec::new();
    let mut states: Vec<Option<String>> = Vec::new();
    let mut call_signs: Vec<Option<String>> = Vec::new();
    let mut latitudes: Vec<Option<f64>> = Vec::new();
    let mut longitudes: Vec<Option<f64>> = Vec::new();
    let mut elevations: Vec<Option<f64>> = Vec::new();
    let mut period_starts: Vec<Option<String>> = Vec::new();
    let mut period_ends: Vec<Option<String>> = Vec::new();

    let mut skipped = 0usize;
    for record in csv_reader.records() {
        let record =
            record.map_err(|e| Error::csv_parsing("failed to read registry row", Some(e)))?;

        // Station identifiers are the row key. Rows without both, or with a
        // truncated field list, carry nothing the table can use.
        if record.len() != constants::EXPECTED_COLUMN_COUNT {
            skipped += 1;
            continue;
        }

        let usaf_raw = field(&record, &header_map, raw::USAF);
        let wban_raw = field(&record, &header_map, raw::WBAN);
        if usaf_raw.is_empty() || wban_raw.is_empty() {
            skipped += 1;
            continue;
        }

        let usaf_id = constants::pad_usaf_id(usaf_raw);
        let wban_id = constants::pad_wban_id(wban_raw);
        station_codes.push(constants::station_code(&usaf_id, &wban_id));
        usaf_ids.push(usaf_id);
        wban_ids.push(wban_id);

        names.push(optional_field(field(
            &record,
            &header_map,
            raw::STATION_NAME,
        )));
        countries.push(optional_field(field(&record, &header_map, raw::CTRY)));
        states.push(optional_field(field(&record, &header_map, raw::ST)));
        call_signs.push(optional_field(field(&record, &header_map, raw::CALL)));
        latitudes.push(numeric_field(field(&record, &header_map, raw::LAT)));
        longitudes.push(numeric_field(field(&record, &header_map, raw::LON)));
        elevations.push(numeric_field(field(&record, &header_map, raw::ELEV_M)));
        period_starts.push(optional_field(field(&record, &header_map, raw::BEGIN)));
        period_ends.push(optional_field(field(&record, &header_map, raw::END)));
    }

    if skipped > 0 {
        debug!(skipped, "dropped registry rows missing station identifiers");
    }

    let frame = df!(
        columns::USAF_ID => usaf_ids,
        columns::WBAN_ID => wban_ids,
        columns::STATION_CODE => station_codes,
        columns::NAME => names,
        columns::COUNTRY_CODE => countries,
        columns::STATE_CODE => states,
        columns::CALL_SIGN => call_signs,
        columns::LAT => latitudes,
        columns::LON => longitudes,
        columns::ELEVATION_M => elevations,
        columns::PERIOD_START => period_starts,
        columns::PERIOD_END => period_ends,
    )?;

    typed_periods(frame)
}

/// Parse a registry document already on disk.
pub fn parse_registry_file(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let file =
        File::open(path).map_err(|e| Error::io(format!("failed to open {}", path.display()), e))?;

    parse_registry(BufReader::new(file))
}

/// Check the feed header against the published registry layout.
///
/// Returns the header-name to column-index map used for field access.
fn validate_header(headers: &csv::StringRecord) -> Result<HashMap<String, usize>> {
    if headers.len() != constants::EXPECTED_COLUMN_COUNT {
        return Err(Error::source_unavailable(format!(
            "registry feed returned {} columns, expected {}",
            headers.len(),
            constants::EXPECTED_COLUMN_COUNT
        )));
    }

    let mut header_map = HashMap::new();
    for (index, name) in headers.iter().enumerate() {
        header_map.insert(name.trim().to_string(), index);
    }

    for name in constants::RAW_HEADER {
        if !header_map.contains_key(*name) {
            return Err(Error::source_unavailable(format!(
                "registry feed is missing the '{}' column",
                name
            )));
        }
    }

    Ok(header_map)
}

/// Look up a field by header name, trimmed, defaulting to the empty string.
fn field<'r>(
    record: &'r csv::StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> &'r str {
    header_map
        .get(name)
        .and_then(|&index| record.get(index))
        .map(str::trim)
        .unwrap_or("")
}

/// Owned value for a text field, mapping the empty string to null.
fn optional_field(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Numeric value for a field, mapping blanks and unparsable text to null.
fn numeric_field(value: &str) -> Option<f64> {
    value.parse().ok()
}

/// Cast the raw `yyyymmdd` period columns to typed dates.
///
/// Parsing is lenient: a period value that does not match the format becomes
/// null rather than failing the table.
fn typed_periods(frame: DataFrame) -> Result<DataFrame> {
    let format_options = StrptimeOptions {
        format: Some(constants::RAW_DATE_FORMAT.into()),
        strict: false,
        ..Default::default()
    };

    let typed = frame
        .lazy()
        .with_columns([
            col(columns::PERIOD_START)
                .str()
                .to_date(format_options.clone()),
            col(columns::PERIOD_END).str().to_date(format_options),
        ])
        .collect()?;

    Ok(typed)
}
