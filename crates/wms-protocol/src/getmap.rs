//! WMS 1.3.0 GetMap request validation.
//!
//! Turns raw KVP parameters into a [`GetMapRequest`] or the first
//! [`WmsError`] the request trips over. Checks run in a fixed order, so a request
//! with several problems always reports the same one.

use serde::Serialize;
use wms_common::{BoundingBox, CrsCode, WmsError, WmsResult};

use crate::cql::CqlFilter;
use crate::params::{keys, ParamSource};

/// The only protocol version accepted.
pub const SUPPORTED_VERSION: &str = "1.3.0";

/// A validated GetMap request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetMapRequest {
    /// Comma-separated layer names, as sent
    pub layers: String,
    /// Comma-separated style names, as sent
    pub styles: String,
    /// CRS parameter, always "EPSG:<target srid>"
    pub crs: String,
    /// Requested extent, in x,y order regardless of the CRS axis order
    pub bbox: BoundingBox,
    /// Output width in pixels
    pub width: i16,
    /// Output height in pixels
    pub height: i16,
    /// Output MIME type, as sent
    pub format: String,
    /// Raw CQL_FILTER text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cql_filter: Option<String>,
}

impl GetMapRequest {
    /// Validate GetMap parameters against the SRID of the active layer.
    ///
    /// Order of checks:
    /// 1. VERSION is 1.3.0 (case-insensitive)
    /// 2. LAYERS, STYLES, CRS are present
    /// 3. CRS is exactly "EPSG:<target_srid>"
    /// 4. BBOX, WIDTH, HEIGHT are present
    /// 5. FORMAT is present
    /// 6. WIDTH and HEIGHT fit in an i16 (surrounding whitespace ignored)
    /// 7. BBOX parses, flipped to x,y order for EPSG:4326
    pub fn from_params<P>(params: &P, target_srid: i32) -> WmsResult<Self>
    where
        P: ParamSource + ?Sized,
    {
        let version_ok = params
            .param(keys::VERSION)
            .is_some_and(|v| v.eq_ignore_ascii_case(SUPPORTED_VERSION));
        if !version_ok {
            return Err(WmsError::InvalidVersion {
                expected: SUPPORTED_VERSION,
            });
        }

        let layers = required(params, keys::LAYERS)?;
        let styles = required(params, keys::STYLES)?;
        let crs = required(params, keys::CRS)?;

        let target = CrsCode(target_srid);
        if !target.matches_wms_string(crs) {
            return Err(WmsError::InvalidCrs {
                requested: crs.to_string(),
                expected: target.epsg_string(),
            });
        }

        let bbox = dimension(params, keys::BBOX)?;
        let width = dimension(params, keys::WIDTH)?;
        let height = dimension(params, keys::HEIGHT)?;
        let format = required(params, keys::FORMAT)?;
        let cql_filter = params.param(keys::CQL_FILTER);

        let (width, height) = match (parse_size(width), parse_size(height)) {
            (Some(w), Some(h)) => (w, h),
            _ => return Err(WmsError::InvalidSize),
        };

        let bbox = BoundingBox::parse(bbox, target.is_lat_lon_axis_order())?;

        Ok(Self {
            layers: layers.to_string(),
            styles: styles.to_string(),
            crs: crs.to_string(),
            bbox,
            width,
            height,
            format: format.to_string(),
            cql_filter: cql_filter.map(str::to_string),
        })
    }

    /// Individual layer names from the LAYERS list.
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        split_list(&self.layers)
    }

    /// Individual style names from the STYLES list. Empty entries mean "default".
    pub fn style_names(&self) -> impl Iterator<Item = &str> {
        self.styles.split(',').map(str::trim)
    }

    /// The CQL filter text, if one was sent and is not blank.
    pub fn filter(&self) -> Option<&str> {
        self.cql_filter
            .as_deref()
            .filter(|f| !f.trim().is_empty())
    }

    /// The row predicate for this request. Without a filter every row matches.
    pub fn feature_filter(&self) -> CqlFilter {
        CqlFilter::new(self.filter().unwrap_or_default())
    }

    /// Pixel aspect ratio requested by the client (width / height).
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

fn required<'a, P>(params: &'a P, key: &'static str) -> WmsResult<&'a str>
where
    P: ParamSource + ?Sized,
{
    params.param(key).ok_or(WmsError::MissingParameter(key))
}

fn dimension<'a, P>(params: &'a P, key: &'static str) -> WmsResult<&'a str>
where
    P: ParamSource + ?Sized,
{
    params.param(key).ok_or(WmsError::MissingDimension(key))
}

/// Pixel sizes ignore surrounding whitespace and must fit in an i16.
fn parse_size(value: &str) -> Option<i16> {
    value.trim().parse().ok()
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}
