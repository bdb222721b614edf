//! Common types shared by the WMS request layer.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod layer;

pub use bbox::{BboxParseError, BoundingBox};
pub use crs::{AxisOrder, CrsCode, WGS84_SRID};
pub use error::{ErrorClass, WmsError, WmsResult};
pub use layer::{Layer, LayerCatalog, LayerConfigError};
