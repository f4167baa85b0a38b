//! End-year resolution against the registry

use crate::Result;
use crate::app::models::EndYearSelector;
use crate::constants::{ALL_YEARS_END, ALL_YEARS_START, columns};
use polars::prelude::*;

/// Temporal window produced by resolving an [`EndYearSelector`]
#[derive(Debug, Clone, PartialEq)]
pub enum YearFilter {
    /// Inclusive year range
    Between(i32, i32),
    /// Explicit set of years
    AnyOf(Vec<i32>),
}

impl YearFilter {
    /// Whether a `period_end` year falls inside the window
    pub fn contains(&self, year: i32) -> bool {
        match self {
            Self::Between(lo, hi) => (*lo..=*hi).contains(&year),
            Self::AnyOf(years) => years.contains(&year),
        }
    }
}

/// Resolve a selector into a concrete year window.
///
/// "current" is the maximum `period_end` year across the complete table.
/// The resolution deliberately runs before any predicate stage, so a name or
/// country filter can never change which records count as current. A table
/// with no usable `period_end` values resolves "current" to an empty set,
/// which matches nothing downstream.
pub fn resolve_end_years(table: &DataFrame, selector: &EndYearSelector) -> Result<YearFilter> {
    match selector {
        EndYearSelector::All => Ok(YearFilter::Between(ALL_YEARS_START, ALL_YEARS_END)),
        EndYearSelector::Years(years) => Ok(YearFilter::AnyOf(years.clone())),
        EndYearSelector::Current => {
            let years = table
                .column(columns::PERIOD_END)?
                .as_materialized_series()
                .year()?;
            let latest = years.max();
            Ok(YearFilter::AnyOf(latest.into_iter().collect()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_filter_between() {
        let window = YearFilter::Between(1900, 2100);

        assert!(window.contains(1900));
        assert!(window.contains(2024));
        assert!(window.contains(2100));
        assert!(!window.contains(1899));
        assert!(!window.contains(2101));
    }

    #[test]
    fn test_year_filter_any_of() {
        let window = YearFilter::AnyOf(vec![1999, 2024]);

        assert!(window.contains(1999));
        assert!(window.contains(2024));
        assert!(!window.contains(2000));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let window = YearFilter::AnyOf(Vec::new());

        assert!(!window.contains(2024));
    }
}
