//! Tests for GetMap parameter validation.

use std::collections::HashMap;

use test_utils::{
    bbox, getmap_params, getmap_params_with, getmap_params_without, WEB_MERCATOR_SRID,
};
use wms_common::{BoundingBox, ErrorClass, WmsError};
use wms_protocol::GetMapRequest;

fn validate(params: &HashMap<String, String>) -> Result<GetMapRequest, WmsError> {
    GetMapRequest::from_params(params, WEB_MERCATOR_SRID)
}

fn class_of(params: &HashMap<String, String>) -> ErrorClass {
    validate(params).unwrap_err().classification()
}

// ============================================================================
// Successful validation
// ============================================================================

#[test]
fn test_valid_request_populates_descriptor() {
    let request = validate(&getmap_params()).unwrap();
    assert_eq!(request.layers, "roads,buildings");
    assert_eq!(request.styles, "");
    assert_eq!(request.crs, "EPSG:3857");
    assert_eq!(request.width, 256);
    assert_eq!(request.height, 256);
    assert_eq!(request.format, "image/png");
    assert!(request.cql_filter.is_none());
    assert_eq!(
        request.bbox,
        BoundingBox::parse(bbox::MERCATOR_EUROPE, false).unwrap()
    );
}

#[test]
fn test_cql_filter_is_carried_raw() {
    let params = getmap_params_with("CQL_FILTER", "name IN ('A', 'B')");
    let request = validate(&params).unwrap();
    assert_eq!(request.cql_filter.as_deref(), Some("name IN ('A', 'B')"));
    assert_eq!(request.filter(), Some("name IN ('A', 'B')"));
}

#[test]
fn test_degenerate_bbox_accepted() {
    let request = validate(&getmap_params_with("BBOX", bbox::POINT)).unwrap();
    assert_eq!(request.bbox.min_x, request.bbox.max_x);
}

#[test]
fn test_geographic_bbox_is_flipped() {
    let mut params = getmap_params_with("CRS", "EPSG:4326");
    params.insert("BBOX".to_string(), bbox::CONUS_LAT_LON.to_string());
    let request = GetMapRequest::from_params(&params, 4326).unwrap();
    assert_eq!(request.bbox, BoundingBox::new(-130.0, 20.0, -60.0, 55.0));
}

#[test]
fn test_projected_bbox_is_not_flipped() {
    let params = getmap_params_with("BBOX", "1,2,3,4");
    let request = validate(&params).unwrap();
    assert_eq!(request.bbox, BoundingBox::new(1.0, 2.0, 3.0, 4.0));
}

#[test]
fn test_validation_is_repeatable() {
    let params = getmap_params();
    assert_eq!(validate(&params), validate(&params));
}

// ============================================================================
// Missing parameters
// ============================================================================

#[test]
fn test_missing_generic_parameters() {
    for key in ["VERSION", "LAYERS", "STYLES", "CRS", "FORMAT"] {
        let params = getmap_params_without(key);
        assert_eq!(class_of(&params), ErrorClass::Generic, "missing {key}");
    }
}

#[test]
fn test_missing_dimension_parameters() {
    for key in ["BBOX", "WIDTH", "HEIGHT"] {
        let params = getmap_params_without(key);
        assert_eq!(validate(&params).unwrap_err(), WmsError::MissingDimension(key));
        assert_eq!(class_of(&params), ErrorClass::InvalidDimensionValue);
    }
}

#[test]
fn test_empty_value_counts_as_present() {
    // STYLES= is the usual way of asking for default styles.
    let request = validate(&getmap_params_with("STYLES", "")).unwrap();
    assert!(request.style_names().all(str::is_empty));

    // An empty WIDTH is present but not a number.
    assert_eq!(
        validate(&getmap_params_with("WIDTH", "")).unwrap_err(),
        WmsError::InvalidSize
    );
}

#[test]
fn test_missing_cql_filter_is_fine() {
    assert!(validate(&getmap_params_without("CQL_FILTER")).is_ok());
}

#[test]
fn test_keys_are_case_sensitive() {
    let mut params = getmap_params_without("LAYERS");
    params.insert("layers".to_string(), "roads".to_string());
    assert_eq!(
        validate(&params).unwrap_err(),
        WmsError::MissingParameter("LAYERS")
    );
}

// ============================================================================
// Malformed values
// ============================================================================

#[test]
fn test_wrong_version() {
    for version in ["1.1.1", "1.3", "", "1.3.0 "] {
        let params = getmap_params_with("VERSION", version);
        assert!(
            matches!(validate(&params), Err(WmsError::InvalidVersion { .. })),
            "version {version:?}"
        );
    }
}

#[test]
fn test_crs_mismatch() {
    let params = getmap_params_with("CRS", "EPSG:4326");
    let err = validate(&params).unwrap_err();
    assert_eq!(err.classification(), ErrorClass::InvalidCrs);
    assert_eq!(err.wms_exception_code(), "InvalidCRS");
    assert_eq!(
        err,
        WmsError::InvalidCrs {
            requested: "EPSG:4326".to_string(),
            expected: "EPSG:3857".to_string(),
        }
    );
}

#[test]
fn test_crs_match_is_textual() {
    for crs in ["epsg:3857", "EPSG:03857", "EPSG: 3857", "3857"] {
        let params = getmap_params_with("CRS", crs);
        assert_eq!(class_of(&params), ErrorClass::InvalidCrs, "crs {crs:?}");
    }
}

#[test]
fn test_width_height_must_fit_i16() {
    for (key, value) in [
        ("WIDTH", "abc"),
        ("WIDTH", "32768"),
        ("HEIGHT", "256.0"),
        ("HEIGHT", "1e3"),
    ] {
        let params = getmap_params_with(key, value);
        let err = validate(&params).unwrap_err();
        assert_eq!(err, WmsError::InvalidSize, "{key}={value}");
        assert_eq!(err.classification(), ErrorClass::Generic);
        assert_eq!(err.to_string(), "Invalid parameters for width/height");
    }
}

#[test]
fn test_padded_values_accepted() {
    let mut params = getmap_params_with("WIDTH", " 256");
    params.insert("HEIGHT".to_string(), "128 ".to_string());
    params.insert("BBOX".to_string(), " 1, 2, 3, 4 ".to_string());
    let request = validate(&params).unwrap();
    assert_eq!((request.width, request.height), (256, 128));
    assert_eq!(request.bbox, BoundingBox::new(1.0, 2.0, 3.0, 4.0));

    // VERSION stays an exact match.
    assert!(validate(&getmap_params_with("VERSION", " 1.3.0")).is_err());
}

#[test]
fn test_width_at_i16_max() {
    let request = validate(&getmap_params_with("WIDTH", "32767")).unwrap();
    assert_eq!(request.width, i16::MAX);
}

#[test]
fn test_malformed_bbox_is_generic() {
    for value in ["1,2,3", "a,b,c,d", bbox::INVERTED, "1;2;3;4"] {
        let params = getmap_params_with("BBOX", value);
        let err = validate(&params).unwrap_err();
        assert!(matches!(err, WmsError::InvalidBbox(_)), "bbox {value:?}");
        assert_eq!(err.classification(), ErrorClass::Generic);
    }
}

// ============================================================================
// Check ordering
// ============================================================================

#[test]
fn test_crs_checked_before_dimensions() {
    let mut params = getmap_params_with("CRS", "EPSG:4326");
    params.remove("WIDTH");
    assert_eq!(class_of(&params), ErrorClass::InvalidCrs);
}

#[test]
fn test_version_checked_first() {
    let mut params = HashMap::new();
    params.insert("CRS".to_string(), "EPSG:1".to_string());
    assert!(matches!(
        validate(&params),
        Err(WmsError::InvalidVersion { .. })
    ));
}

#[test]
fn test_presence_checked_before_size() {
    let mut params = getmap_params_with("WIDTH", "abc");
    params.remove("FORMAT");
    assert_eq!(
        validate(&params).unwrap_err(),
        WmsError::MissingParameter("FORMAT")
    );
}

#[test]
fn test_size_checked_before_bbox() {
    let mut params = getmap_params_with("WIDTH", "abc");
    params.insert("BBOX".to_string(), "garbage".to_string());
    assert_eq!(validate(&params).unwrap_err(), WmsError::InvalidSize);
}

#[test]
fn test_missing_format_after_dimensions() {
    let mut params = getmap_params_without("FORMAT");
    params.remove("HEIGHT");
    assert_eq!(
        validate(&params).unwrap_err(),
        WmsError::MissingDimension("HEIGHT")
    );
}
