//! Validation and filtering for one set of GetMap parameters.

use serde::Serialize;
use tracing::{info, warn};

use wms_common::{LayerCatalog, LayerConfigError};
use wms_protocol::{FeatureTable, GetMapRequest, ParamSource};

/// Outcome of checking one request.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckReport {
    Valid {
        request: GetMapRequest,
        layers: Vec<String>,
        styles: Vec<String>,
        /// Requested layers the catalog does not serve
        #[serde(skip_serializing_if = "Vec::is_empty")]
        unknown_layers: Vec<String>,
        aspect_ratio: f64,
        /// Indices of the rows the CQL filter keeps; absent when no rows were given
        #[serde(skip_serializing_if = "Option::is_none")]
        matched_rows: Option<Vec<usize>>,
    },
    Rejected {
        exception_code: &'static str,
        http_status: u16,
        message: String,
    },
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        matches!(self, CheckReport::Valid { .. })
    }
}

/// Validate `params` against the catalog's target CRS and, if valid, run the
/// request's filter over `rows`.
///
/// Fails only when the catalog cannot supply a target CRS; a rejected request
/// is a [`CheckReport::Rejected`].
pub fn check_request<P>(
    params: &P,
    catalog: &LayerCatalog,
    rows: Option<&FeatureTable>,
) -> Result<CheckReport, LayerConfigError>
where
    P: ParamSource + ?Sized,
{
    let target_srid = catalog.target_srid()?;
    let request = match GetMapRequest::from_params(params, target_srid) {
        Ok(request) => request,
        Err(e) => {
            warn!(
                code = e.wms_exception_code(),
                error = %e,
                "GetMap request rejected"
            );
            return Ok(CheckReport::Rejected {
                exception_code: e.wms_exception_code(),
                http_status: e.http_status_code(),
                message: e.to_string(),
            });
        }
    };

    info!(
        layers = %request.layers,
        crs = %request.crs,
        width = request.width,
        height = request.height,
        bbox = ?request.bbox,
        filter = ?request.filter(),
        "GetMap request valid"
    );

    let layers: Vec<String> = request.layer_names().map(str::to_string).collect();
    let unknown_layers: Vec<String> = layers
        .iter()
        .filter(|name| catalog.get(name).is_none())
        .cloned()
        .collect();
    if !unknown_layers.is_empty() {
        warn!(?unknown_layers, "Request names layers the catalog does not serve");
    }

    let matched_rows = rows.map(|table| {
        let filter = request.feature_filter();
        table
            .iter()
            .enumerate()
            .filter(|(_, row)| filter.matches(row))
            .map(|(i, _)| i)
            .collect::<Vec<_>>()
    });

    if let Some(matched) = &matched_rows {
        info!(matched = matched.len(), "Evaluated CQL filter");
    }

    Ok(CheckReport::Valid {
        styles: request.style_names().map(str::to_string).collect(),
        aspect_ratio: request.aspect_ratio(),
        layers,
        unknown_layers,
        request,
        matched_rows,
    })
}
