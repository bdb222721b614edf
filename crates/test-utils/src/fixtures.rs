//! Common test fixtures for WMS request tests.
//!
//! Parameter sets are plain `HashMap<String, String>` so this crate does not
//! depend on the crates it helps test.

use std::collections::HashMap;

/// Common BBOX parameter strings for testing.
pub mod bbox {
    /// Web Mercator extent over western Europe
    pub const MERCATOR_EUROPE: &str = "-1113194.9,4865942.3,2226389.8,7361866.1";

    /// CONUS in WMS 1.3.0 EPSG:4326 axis order (lat,lon)
    pub const CONUS_LAT_LON: &str = "20,-130,55,-60";

    /// Single point (degenerate bbox)
    pub const POINT: &str = "0,0,0,0";

    /// Max X below min X
    pub const INVERTED: &str = "10,0,5,5";
}

/// Target SRID used by the default GetMap fixture.
pub const WEB_MERCATOR_SRID: i32 = 3857;

/// A GetMap parameter set that passes validation against [`WEB_MERCATOR_SRID`].
pub fn getmap_params() -> HashMap<String, String> {
    [
        ("VERSION", "1.3.0"),
        ("LAYERS", "roads,buildings"),
        ("STYLES", ""),
        ("CRS", "EPSG:3857"),
        ("BBOX", bbox::MERCATOR_EUROPE),
        ("WIDTH", "256"),
        ("HEIGHT", "256"),
        ("FORMAT", "image/png"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// [`getmap_params`] with one parameter replaced.
pub fn getmap_params_with(key: &str, value: &str) -> HashMap<String, String> {
    let mut params = getmap_params();
    params.insert(key.to_string(), value.to_string());
    params
}

/// [`getmap_params`] with one parameter removed.
pub fn getmap_params_without(key: &str) -> HashMap<String, String> {
    let mut params = getmap_params();
    params.remove(key);
    params
}

/// Filter strings exercising each comparator of the CQL subset.
pub mod cql {
    pub const NUMERIC_GT: &str = "score > 3";
    pub const AND_CHAIN: &str = "score > 3 AND name == B";
    pub const IN_LIST: &str = "name IN ('A', 'B', 'C')";
    pub const BETWEEN: &str = "score BETWEEN 1 AND 10";
    pub const LIKE: &str = "name LIKE %anything%";
}
