//! Error types for WMS request validation.

use thiserror::Error;

use crate::bbox::BboxParseError;

/// Result type alias using WmsError.
pub type WmsResult<T> = Result<T, WmsError>;

/// Protocol-level classification of a rejected request.
///
/// The outward-facing layer picks its exception code and HTTP status from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    Generic,
    InvalidCrs,
    InvalidDimensionValue,
}

impl ErrorClass {
    /// Get the OGC WMS exception code for this classification.
    pub fn wms_exception_code(&self) -> &'static str {
        match self {
            ErrorClass::Generic => "NoApplicableCode",
            ErrorClass::InvalidCrs => "InvalidCRS",
            ErrorClass::InvalidDimensionValue => "InvalidDimensionValue",
        }
    }
}

/// A rejected WMS request.
///
/// Each variant maps to exactly one [`ErrorClass`]; validation reports the
/// first failing check only.
#[derive(Debug, Error, PartialEq)]
pub enum WmsError {
    #[error("Unsupported or missing VERSION, expected {expected}")]
    InvalidVersion { expected: &'static str },

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid CRS '{requested}', layer is served in {expected}")]
    InvalidCrs { requested: String, expected: String },

    #[error("Missing dimension parameter: {0}")]
    MissingDimension(&'static str),

    #[error("Invalid parameters for width/height")]
    InvalidSize,

    #[error("Invalid bbox: {0}")]
    InvalidBbox(#[from] BboxParseError),
}

impl WmsError {
    pub fn classification(&self) -> ErrorClass {
        match self {
            WmsError::InvalidCrs { .. } => ErrorClass::InvalidCrs,
            WmsError::MissingDimension(_) => ErrorClass::InvalidDimensionValue,
            WmsError::InvalidVersion { .. }
            | WmsError::MissingParameter(_)
            | WmsError::InvalidSize
            | WmsError::InvalidBbox(_) => ErrorClass::Generic,
        }
    }

    /// Get the OGC WMS exception code for this error.
    pub fn wms_exception_code(&self) -> &'static str {
        self.classification().wms_exception_code()
    }

    /// Get the HTTP status code for this error.
    ///
    /// Every validation failure is a client error.
    pub fn http_status_code(&self) -> u16 {
        400
    }
}
