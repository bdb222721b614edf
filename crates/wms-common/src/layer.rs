//! Layer configuration for the active map.
//!
//! Loads the layer list from a YAML file. Request validation only needs one fact
//! from it: the SRID of the first configured layer, which every GetMap request
//! must name in its CRS parameter.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::CrsCode;

/// Errors raised while loading or querying the layer configuration.
///
/// These are deployment problems, not per-request protocol failures.
#[derive(Debug, Error)]
pub enum LayerConfigError {
    #[error("Failed to read layer config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse layer config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("No layers configured, cannot determine target CRS")]
    NoLayers,
}

/// A configured map layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Layer name as used in the LAYERS parameter
    pub name: String,

    /// Human-readable title
    #[serde(default)]
    pub title: Option<String>,

    /// EPSG code the layer's features are stored in
    pub srid: i32,
}

impl Layer {
    pub fn crs(&self) -> CrsCode {
        CrsCode(self.srid)
    }
}

/// The ordered set of layers the map serves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerCatalog {
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl LayerCatalog {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    /// Load a catalog from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LayerConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LayerConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_yaml(&content)?;
        info!(
            path = %path.display(),
            layers = catalog.layers.len(),
            "Loaded layer configuration"
        );
        Ok(catalog)
    }

    /// Parse a catalog from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, LayerConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// The CRS requests must use: that of the first configured layer.
    pub fn target_crs(&self) -> Result<CrsCode, LayerConfigError> {
        let layer = self.layers.first().ok_or(LayerConfigError::NoLayers)?;
        debug!(layer = %layer.name, srid = layer.srid, "Resolved target CRS");
        Ok(layer.crs())
    }

    pub fn target_srid(&self) -> Result<i32, LayerConfigError> {
        self.target_crs().map(|crs| crs.srid())
    }
}
