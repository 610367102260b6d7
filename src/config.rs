use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::present::choropleth::RegionJoin;

/// French administrative regions published by france-geojson.
pub const DEFAULT_BOUNDARY_SOURCE: &str =
    "https://raw.githubusercontent.com/gregoiredavid/france-geojson/master/regions.geojson";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub boundaries: BoundaryConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 1280.0,
            height: 860.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BoundaryConfig {
    /// URL or local path of a GeoJSON FeatureCollection.
    pub source: String,
    /// Feature property holding the display name.
    pub name_property: String,
    /// Feature property holding the region code.
    pub code_property: String,
    pub join: RegionJoin,
    /// Douglas–Peucker tolerance in degrees; 0 keeps every vertex.
    pub simplify_tolerance: f64,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        BoundaryConfig {
            source: DEFAULT_BOUNDARY_SOURCE.to_string(),
            name_property: "nom".to_string(),
            code_property: "code".to_string(),
            join: RegionJoin::Exact,
            simplify_tolerance: 0.01,
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;
        Ok(config)
    }
}
