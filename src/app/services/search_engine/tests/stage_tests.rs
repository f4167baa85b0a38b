//! Tests for the individual filter stages

use crate::app::services::search_engine::stages;
use crate::app::services::search_engine::year::YearFilter;
use crate::constants::columns;

use super::{registry_fixture, station_names};

#[test]
fn test_filter_by_name_matches_substring() {
    let table = registry_fixture();
    let result = stages::filter_by_name(&table, "GATW").unwrap();

    assert_eq!(station_names(&result), vec!["GATWICK"]);
}

#[test]
fn test_filter_by_name_normalizes_case() {
    let table = registry_fixture();

    let lower = stages::filter_by_name(&table, "manchester").unwrap();
    let mixed = stages::filter_by_name(&table, "MaNcHeStEr").unwrap();

    assert_eq!(station_names(&lower), vec!["MANCHESTER"]);
    assert_eq!(station_names(&mixed), vec!["MANCHESTER"]);
}

#[test]
fn test_filter_by_name_without_match_is_empty() {
    let table = registry_fixture();
    let result = stages::filter_by_name(&table, "no such station").unwrap();

    assert_eq!(result.height(), 0);
}

#[test]
fn test_filter_by_country_normalizes_case() {
    let table = registry_fixture();

    let result = stages::filter_by_country(&table, "us").unwrap();

    assert_eq!(result.height(), 2);
}

#[test]
fn test_filter_by_country_skips_null_codes() {
    let table = registry_fixture();

    // WXPOD 7018 has no country code and must not match any filter
    let result = stages::filter_by_country(&table, "af").unwrap();

    assert_eq!(station_names(&result), vec!["WXPOD 8278"]);
}

#[test]
fn test_filter_by_state() {
    let table = registry_fixture();
    let result = stages::filter_by_state(&table, "ny").unwrap();

    assert_eq!(
        station_names(&result),
        vec![
            "JOHN F KENNEDY INTERNATIONAL AIRPORT",
            "NY CITY CENTRAL PARK"
        ]
    );
}

#[test]
fn test_drop_missing_coordinates() {
    let table = registry_fixture();
    let result = stages::drop_missing_coordinates(&table).unwrap();

    assert_eq!(result.height(), 8);
    assert!(!station_names(&result).contains(&"WXPOD 8278".to_string()));
}

#[test]
fn test_filter_by_period_window() {
    let table = registry_fixture();
    let result = stages::filter_by_period(&table, &YearFilter::Between(1900, 2100)).unwrap();

    // Only the row with no end date on record drops out
    assert_eq!(result.height(), 8);
    assert!(!station_names(&result).contains(&"SALSBURGH".to_string()));
}

#[test]
fn test_filter_by_period_explicit_year() {
    let table = registry_fixture();
    let result = stages::filter_by_period(&table, &YearFilter::AnyOf(vec![2013])).unwrap();

    assert_eq!(station_names(&result), vec!["WXPOD 7018"]);
}

#[test]
fn test_filter_by_period_empty_set_matches_nothing() {
    let table = registry_fixture();
    let result = stages::filter_by_period(&table, &YearFilter::AnyOf(Vec::new())).unwrap();

    assert_eq!(result.height(), 0);
}

#[test]
fn test_rename_coordinate_columns() {
    let table = registry_fixture();
    let result = stages::rename_coordinate_columns(&table).unwrap();

    assert!(result.column(columns::LATITUDE).is_ok());
    assert!(result.column(columns::LONGITUDE).is_ok());
    assert!(result.column(columns::LAT).is_err());
}
