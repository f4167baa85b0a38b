//! Pure filter stages over the station table
//!
//! Each stage takes an immutable table and returns a new one, so the
//! pipeline can be exercised stage by stage. All matching uses explicit
//! case normalization on both sides; missing values never match a
//! predicate and never raise an error.

use crate::Result;
use crate::constants::columns;
use polars::prelude::*;

use super::year::YearFilter;

/// Retain rows whose `name` contains the pattern case-insensitively
pub fn filter_by_name(table: &DataFrame, pattern: &str) -> Result<DataFrame> {
    let needle = pattern.to_lowercase();
    let names = table.column(columns::NAME)?.as_materialized_series().str()?;

    let mask: BooleanChunked = names
        .into_iter()
        .map(|name| Some(name.is_some_and(|n| n.to_lowercase().contains(&needle))))
        .collect();

    Ok(table.filter(&mask)?)
}

/// Retain rows whose `country_code` equals the code, uppercased on both sides
pub fn filter_by_country(table: &DataFrame, code: &str) -> Result<DataFrame> {
    filter_by_code(table, columns::COUNTRY_CODE, code)
}

/// Retain rows whose `state_code` equals the code, uppercased on both sides
pub fn filter_by_state(table: &DataFrame, code: &str) -> Result<DataFrame> {
    filter_by_code(table, columns::STATE_CODE, code)
}

fn filter_by_code(table: &DataFrame, column: &str, code: &str) -> Result<DataFrame> {
    let wanted = code.to_ascii_uppercase();
    let codes = table.column(column)?.as_materialized_series().str()?;

    let mask: BooleanChunked = codes
        .into_iter()
        .map(|code| Some(code.is_some_and(|c| c.to_ascii_uppercase() == wanted)))
        .collect();

    Ok(table.filter(&mask)?)
}

/// Drop rows missing either coordinate.
///
/// Applied on every search, with or without a reference point: records
/// without coordinates are unusable for both ranking and mapping.
pub fn drop_missing_coordinates(table: &DataFrame) -> Result<DataFrame> {
    let lat = table
        .column(columns::LAT)?
        .as_materialized_series()
        .is_not_null();
    let lon = table
        .column(columns::LON)?
        .as_materialized_series()
        .is_not_null();

    Ok(table.filter(&(lat & lon))?)
}

/// Retain rows whose `period_end` year falls inside the resolved window.
///
/// Rows without a `period_end` date carry no year and never match.
pub fn filter_by_period(table: &DataFrame, window: &YearFilter) -> Result<DataFrame> {
    let years = table
        .column(columns::PERIOD_END)?
        .as_materialized_series()
        .year()?;

    let mask: BooleanChunked = years
        .into_iter()
        .map(|year| Some(year.is_some_and(|y| window.contains(y))))
        .collect();

    Ok(table.filter(&mask)?)
}

/// Rename the coordinate columns to their semantic names for consumers
pub fn rename_coordinate_columns(table: &DataFrame) -> Result<DataFrame> {
    let mut renamed = table.clone();
    renamed.rename(columns::LAT, columns::LATITUDE.into())?;
    renamed.rename(columns::LON, columns::LONGITUDE.into())?;
    Ok(renamed)
}
