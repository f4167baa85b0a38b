//! Station filter engine
//!
//! The core of the locator: a pure, single-pass pipeline that narrows a
//! typed station table through a fixed stage order and optionally ranks the
//! survivors by great-circle distance. The engine performs no I/O, holds no
//! state, and never mutates its input; concurrent callers may share a table
//! freely.
//!
//! Stage order:
//! 1. End-year resolution against the complete, unfiltered table
//! 2. Name substring filter (case-insensitive)
//! 3. Country code filter (uppercased equality)
//! 4. State code filter (uppercased equality)
//! 5. Coordinate completeness filter (unconditional)
//! 6. Temporal filter on the `period_end` year
//! 7. Distance ranking and truncation (only with a reference point)
//!
//! The result table carries the coordinate columns under their semantic
//! names (`latitude`/`longitude`) and, when ranked, a `distance_km` column.

pub mod distance;
pub mod stages;
pub mod year;

#[cfg(test)]
pub mod tests;

pub use distance::distance_km;
pub use year::YearFilter;

use crate::Result;
use crate::app::models::StationQuery;
use polars::prelude::DataFrame;

/// Run the filter pipeline over a station table.
///
/// An empty result is an ordinary outcome, not an error: a stage that
/// eliminates every record hands an empty working set to the next stage and
/// the pipeline runs to completion.
///
/// # Arguments
///
/// * `table` - Typed station table (see the registry source for its schema)
/// * `query` - Filter criteria and optional reference point
///
/// # Errors
///
/// Returns `InvalidArgument` via the selector parser upstream of this call;
/// here only table-shape problems (missing columns, wrong dtypes) surface,
/// as `DataFrame` errors.
pub fn search(table: &DataFrame, query: &StationQuery) -> Result<DataFrame> {
    // Resolved before any predicate runs; see year::resolve_end_years.
    let window = year::resolve_end_years(table, &query.end_year)?;

    let mut working = table.clone();

    if let Some(pattern) = &query.name {
        working = stages::filter_by_name(&working, pattern)?;
    }
    if let Some(code) = &query.country {
        working = stages::filter_by_country(&working, code)?;
    }
    if let Some(code) = &query.state {
        working = stages::filter_by_state(&working, code)?;
    }

    working = stages::drop_missing_coordinates(&working)?;
    working = stages::filter_by_period(&working, &window)?;

    if let Some(reference) = query.reference {
        working = distance::rank_by_distance(&working, reference, query.count)?;
    }

    stages::rename_coordinate_columns(&working)
}
