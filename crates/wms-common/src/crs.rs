//! Coordinate Reference System identifiers.
//!
//! The validation layer never transforms coordinates; it only needs to know the
//! SRID the active layer is served in, how that SRID is spelled on the wire, and
//! whether WMS 1.3.0 expects its BBOX in latitude-first order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// SRID of WGS84 geographic coordinates.
pub const WGS84_SRID: i32 = 4326;

/// An EPSG spatial reference identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrsCode(pub i32);

impl CrsCode {
    pub const WGS84: CrsCode = CrsCode(WGS84_SRID);

    pub fn srid(&self) -> i32 {
        self.0
    }

    /// The CRS parameter value a request must carry for this SRID, e.g. "EPSG:3857".
    pub fn epsg_string(&self) -> String {
        format!("EPSG:{}", self.0)
    }

    /// Check whether a request's CRS parameter names this SRID.
    ///
    /// The match is purely textual: "epsg:4326" or "EPSG:04326" do not match.
    pub fn matches_wms_string(&self, crs: &str) -> bool {
        crs == self.epsg_string()
    }

    /// Get the axis order for this CRS in WMS 1.3.0.
    ///
    /// Only WGS84 is treated as latitude-first.
    pub fn axis_order_wms_1_3(&self) -> AxisOrder {
        if self.0 == WGS84_SRID {
            AxisOrder::LatLon
        } else {
            AxisOrder::XY
        }
    }

    pub fn is_lat_lon_axis_order(&self) -> bool {
        self.axis_order_wms_1_3() == AxisOrder::LatLon
    }
}

impl From<i32> for CrsCode {
    fn from(srid: i32) -> Self {
        CrsCode(srid)
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

/// Axis order for coordinate interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    /// X (longitude/easting), Y (latitude/northing)
    XY,
    /// Y (latitude/northing), X (longitude/easting)
    LatLon,
}
