//! Shared fixtures for registry source tests

use polars::prelude::DataFrame;

use super::parse_registry;

pub mod source_tests;

/// Registry feed header as published by NOAA
pub const FEED_HEADER: &str = "\"USAF\",\"WBAN\",\"STATION NAME\",\"CTRY\",\"ST\",\"CALL\",\"LAT\",\"LON\",\"ELEV(M)\",\"BEGIN\",\"END\"";

/// Build a registry feed document from raw CSV rows
pub fn feed_text(rows: &[&str]) -> String {
    let mut text = String::from(FEED_HEADER);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

/// A small but representative feed: two airports plus a station without
/// coordinates
pub fn sample_feed() -> String {
    feed_text(&[
        "\"037720\",\"99999\",\"HEATHROW\",\"UK\",\"\",\"EGLL\",\"+51.478\",\"-000.461\",\"+0025.3\",\"19480101\",\"20240817\"",
        "\"744860\",\"94789\",\"JOHN F KENNEDY INTERNATIONAL AIRPORT\",\"US\",\"NY\",\"KJFK\",\"+40.639\",\"-073.762\",\"+0003.4\",\"19480101\",\"20240817\"",
        "\"008268\",\"99999\",\"WXPOD 8278\",\"AF\",\"\",\"\",\"\",\"\",\"+2927.0\",\"20100519\",\"20120323\"",
    ])
}

/// Parsed form of [`sample_feed`]
pub fn sample_table() -> DataFrame {
    parse_registry(sample_feed().as_bytes()).unwrap()
}
