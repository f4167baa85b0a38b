//! Tests for end-year resolution against a station table

use crate::app::models::EndYearSelector;
use crate::app::services::search_engine::year::{YearFilter, resolve_end_years};
use crate::constants::{ALL_YEARS_END, ALL_YEARS_START};

use super::registry_fixture;

#[test]
fn test_resolve_all_is_fixed_window() {
    let table = registry_fixture();
    let window = resolve_end_years(&table, &EndYearSelector::All).unwrap();

    assert_eq!(window, YearFilter::Between(ALL_YEARS_START, ALL_YEARS_END));
}

#[test]
fn test_resolve_current_takes_registry_maximum() {
    let table = registry_fixture();
    let window = resolve_end_years(&table, &EndYearSelector::Current).unwrap();

    assert_eq!(window, YearFilter::AnyOf(vec![2024]));
}

#[test]
fn test_resolve_years_passes_set_through() {
    let table = registry_fixture();
    let selector = EndYearSelector::from_years([2013, 1999]).unwrap();
    let window = resolve_end_years(&table, &selector).unwrap();

    assert_eq!(window, YearFilter::AnyOf(vec![1999, 2013]));
}

#[test]
fn test_resolve_current_on_empty_table_matches_nothing() {
    let table = registry_fixture();
    let empty = table.head(Some(0));
    let window = resolve_end_years(&empty, &EndYearSelector::Current).unwrap();

    assert_eq!(window, YearFilter::AnyOf(Vec::new()));
}
