//! WMS BBOX parameter parsing.

use serde::{Deserialize, Serialize};

/// A geographic or projected bounding box.
///
/// For geographic CRS (EPSG:4326), coordinates are in degrees.
/// For projected CRS (EPSG:3857, etc.), coordinates are in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Parse a WMS BBOX parameter string: "minx,miny,maxx,maxy"
    ///
    /// When `flip_axes` is set the parsed fields are read in latitude-first
    /// order, so the X and Y roles of the result are swapped. Bounds are
    /// rejected when a max is strictly less than its min; equal bounds give a
    /// degenerate box.
    pub fn parse(s: &str, flip_axes: bool) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let mut coords = [0.0_f64; 4];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = parse_coordinate(part)?;
        }
        let [min_x, min_y, max_x, max_y] = coords;

        if max_x < min_x || max_y < min_y {
            return Err(BboxParseError::InvertedBounds(s.to_string()));
        }

        if flip_axes {
            Ok(Self::new(min_y, min_x, max_y, max_x))
        } else {
            Ok(Self::new(min_x, min_y, max_x, max_y))
        }
    }
}

// Surrounding whitespace is ignored. Rust's float grammar is locale-independent
// with '.' as the decimal separator, but it also accepts "inf" and "NaN", which
// are not coordinates.
fn parse_coordinate(part: &str) -> Result<f64, BboxParseError> {
    match part.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(BboxParseError::InvalidNumber(part.to_string())),
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BboxParseError {
    #[error("Invalid BBOX format: {0}. Expected 'minx,miny,maxx,maxy'")]
    InvalidFormat(String),

    #[error("Invalid number in BBOX: {0}")]
    InvalidNumber(String),

    #[error("Invalid BBOX bounds: {0}. Maximum must not be less than minimum")]
    InvertedBounds(String),
}
