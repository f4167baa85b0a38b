//! Great-circle distance computation and proximity ranking

use crate::Result;
use crate::app::models::RefPoint;
use crate::constants::{EARTH_RADIUS_KM, columns};
use polars::prelude::*;

/// Great-circle distance in kilometers between a reference point and a
/// station coordinate, using the spherical law of cosines on a sphere of
/// radius 6371 km.
pub fn distance_km(reference: RefPoint, latitude: f64, longitude: f64) -> f64 {
    let lat_q = reference.latitude.to_radians();
    let lat_r = latitude.to_radians();
    let delta_lon = (longitude - reference.longitude).to_radians();

    let central = lat_q.sin() * lat_r.sin() + lat_q.cos() * lat_r.cos() * delta_lon.cos();

    // Rounding can push the cosine fractionally outside [-1, 1], which would
    // turn acos into NaN for identical or antipodal points
    central.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_KM
}

/// Rank a table by distance from the reference point.
///
/// Adds a `distance_km` column, sorts ascending with a stable sort so that
/// equidistant rows keep their original table order, and truncates to the
/// first `count` rows. Rows reaching this stage always carry coordinates;
/// the completeness stage runs unconditionally before ranking.
pub fn rank_by_distance(
    table: &DataFrame,
    reference: RefPoint,
    count: usize,
) -> Result<DataFrame> {
    let lat = table.column(columns::LAT)?.as_materialized_series().f64()?;
    let lon = table.column(columns::LON)?.as_materialized_series().f64()?;

    let distances: Vec<Option<f64>> = lat
        .into_iter()
        .zip(lon)
        .map(|(lat, lon)| match (lat, lon) {
            (Some(lat), Some(lon)) => Some(distance_km(reference, lat, lon)),
            _ => None,
        })
        .collect();

    let mut ranked = table.clone();
    ranked.with_column(Series::new(columns::DISTANCE_KM.into(), distances))?;

    let ranked = ranked.sort(
        [columns::DISTANCE_KM],
        SortMultipleOptions::default().with_maintain_order(true),
    )?;

    Ok(ranked.head(Some(count)))
}
