//! OGC WMS 1.3.0 request handling.
//!
//! - [`getmap`]: GetMap parameter validation
//! - [`cql`]: CQL_FILTER evaluation over feature rows
//! - [`feature`]: the row capability the filter reads through
//! - [`params`]: raw KVP parameter lookup

pub mod cql;
pub mod feature;
pub mod getmap;
pub mod params;

pub use cql::CqlFilter;
pub use feature::{
    Column, ColumnType, FeatureRow, FeatureTable, FeatureTableError, FieldValue, TableRow, Value,
};
pub use getmap::{GetMapRequest, SUPPORTED_VERSION};
pub use params::ParamSource;
