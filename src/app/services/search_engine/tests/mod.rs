//! Shared fixtures for search engine tests

use polars::prelude::*;

use crate::app::models::RefPoint;
use crate::app::services::registry_source::parse_registry;
use crate::constants::columns;

pub mod stage_tests;
pub mod year_tests;

/// Central London, a short hop east of Heathrow
pub fn london() -> RefPoint {
    RefPoint::new(51.5, -0.1)
}

/// Station table with a fixed roster covering every pipeline stage:
///
/// - Three UK airports ending in the registry's latest year (2024)
/// - Two New York stations for the country and state filters
/// - ABERPORTH, closed in 1999
/// - SALSBURGH, with no end date on record
/// - WXPOD 8278, with no coordinates
/// - WXPOD 7018, with no country code
pub fn registry_fixture() -> DataFrame {
    let rows = [
        "\"037720\",\"99999\",\"HEATHROW\",\"UK\",\"\",\"EGLL\",\"+51.478\",\"-000.461\",\"+0025.3\",\"19480101\",\"20240817\"",
        "\"037760\",\"99999\",\"GATWICK\",\"UK\",\"\",\"EGKK\",\"+51.148\",\"-000.190\",\"+0062.2\",\"19730101\",\"20240817\"",
        "\"033340\",\"99999\",\"MANCHESTER\",\"UK\",\"\",\"EGCC\",\"+53.356\",\"-002.279\",\"+0069.2\",\"19730101\",\"20240817\"",
        "\"744860\",\"94789\",\"JOHN F KENNEDY INTERNATIONAL AIRPORT\",\"US\",\"NY\",\"KJFK\",\"+40.639\",\"-073.762\",\"+0003.4\",\"19480101\",\"20240817\"",
        "\"725053\",\"94728\",\"NY CITY CENTRAL PARK\",\"US\",\"NY\",\"KNYC\",\"+40.779\",\"-073.969\",\"+0042.7\",\"20080601\",\"20240817\"",
        "\"035020\",\"99999\",\"ABERPORTH\",\"UK\",\"\",\"EGFA\",\"+52.139\",\"-004.560\",\"+0133.0\",\"19410101\",\"19991231\"",
        "\"030750\",\"99999\",\"SALSBURGH\",\"UK\",\"\",\"\",\"+55.861\",\"-003.873\",\"+0277.0\",\"19730101\",\"\"",
        "\"008268\",\"99999\",\"WXPOD 8278\",\"AF\",\"\",\"\",\"\",\"\",\"+2927.0\",\"20100519\",\"20120323\"",
        "\"007018\",\"99999\",\"WXPOD 7018\",\"\",\"\",\"\",\"+00.000\",\"+000.000\",\"+7018.0\",\"20110309\",\"20130730\"",
    ];

    let mut text = String::from(
        "\"USAF\",\"WBAN\",\"STATION NAME\",\"CTRY\",\"ST\",\"CALL\",\"LAT\",\"LON\",\"ELEV(M)\",\"BEGIN\",\"END\"\n",
    );
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }

    parse_registry(text.as_bytes()).unwrap()
}

/// Station names in table order
pub fn station_names(frame: &DataFrame) -> Vec<String> {
    frame
        .column(columns::NAME)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .map(|name| name.unwrap_or_default().to_string())
        .collect()
}
