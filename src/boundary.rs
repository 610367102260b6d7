//! Administrative region boundaries for the choropleth map.
//!
//! Boundaries come from a GeoJSON FeatureCollection, either downloaded over
//! HTTP(S) or read from disk. Each source is loaded at most once per session
//! and kept in a [`BoundaryCache`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use geo::{Centroid, MultiPolygon, Point, Simplify, TriangulateEarcut};
use geojson::GeoJson;
use reqwest::Client;

use crate::config::BoundaryConfig;

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// HTTP fetch error type
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Other error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Http(e.to_string())
    }
}

/// Fetch a document from an HTTP(S) URL
pub async fn fetch_http(url: &str) -> Result<Vec<u8>, FetchError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|e| FetchError::Other(format!("Failed to create HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Http(format!("Failed to fetch URL {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(FetchError::Http(format!(
            "HTTP request failed with status: {}",
            response.status()
        )));
    }

    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}

/// Synchronous version using a throw-away tokio runtime
pub fn fetch_http_sync(url: &str) -> Result<Vec<u8>, FetchError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| FetchError::Other(format!("Failed to create runtime: {e}")))?
        .block_on(fetch_http(url))
}

/// Check if a string is an HTTP(S) URL
pub fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

// ---------------------------------------------------------------------------
// Boundary geometry
// ---------------------------------------------------------------------------

/// One administrative region.
#[derive(Debug, Clone)]
pub struct Boundary {
    pub code: String,
    pub name: String,
    pub geometry: MultiPolygon<f64>,
    /// Earcut triangulation of `geometry` (lon/lat), for filled rendering.
    pub triangles: Vec<[[f64; 2]; 3]>,
    pub label_point: Option<Point<f64>>,
}

impl Boundary {
    fn new(code: String, name: String, geometry: MultiPolygon<f64>) -> Self {
        let triangles = geometry
            .iter()
            .flat_map(|polygon| polygon.earcut_triangles())
            .map(|t| t.to_array().map(|c| [c.x, c.y]))
            .collect();
        let label_point = geometry.centroid();
        Boundary {
            code,
            name,
            geometry,
            triangles,
            label_point,
        }
    }

    /// Outer and inner rings as lon/lat point lists.
    pub fn rings(&self) -> Vec<Vec<[f64; 2]>> {
        let mut rings = Vec::new();
        for polygon in &self.geometry {
            rings.push(polygon.exterior().coords().map(|c| [c.x, c.y]).collect());
            for interior in polygon.interiors() {
                rings.push(interior.coords().map(|c| [c.x, c.y]).collect());
            }
        }
        rings
    }
}

/// Every boundary read from one source.
#[derive(Debug, Clone)]
pub struct BoundarySet {
    pub source: String,
    pub boundaries: Vec<Boundary>,
}

/// Load boundaries from the configured source (URL or file path).
pub fn load_boundaries(config: &BoundaryConfig) -> Result<BoundarySet> {
    let bytes = if is_http_url(&config.source) {
        log::info!("Downloading region boundaries from {}", config.source);
        fetch_http_sync(&config.source)?
    } else {
        log::info!("Reading region boundaries from {}", config.source);
        std::fs::read(Path::new(&config.source))
            .with_context(|| format!("Failed to open boundary file: {}", config.source))?
    };

    let boundaries = parse_boundaries(&bytes, config)?;
    log::info!("Loaded {} region boundaries", boundaries.len());
    Ok(BoundarySet {
        source: config.source.clone(),
        boundaries,
    })
}

/// Parse a GeoJSON FeatureCollection of (multi)polygons.
///
/// Features without a name or without polygonal geometry are skipped.
pub fn parse_boundaries(bytes: &[u8], config: &BoundaryConfig) -> Result<Vec<Boundary>> {
    let geojson = GeoJson::from_reader(bytes).context("Failed to parse boundary GeoJSON")?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => bail!("Boundary GeoJSON must be a FeatureCollection"),
    };

    let mut boundaries = Vec::new();

    for feature in collection.features {
        let property = |key: &str| -> Option<String> {
            match feature.properties.as_ref()?.get(key)? {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            }
        };

        let Some(name) = property(&config.name_property) else {
            continue;
        };
        let code = property(&config.code_property).unwrap_or_default();

        let geometry = match feature.geometry {
            Some(geom) => {
                let valid_geo: geo::Geometry<f64> = geom
                    .value
                    .try_into()
                    .map_err(|e| anyhow!("Failed to convert geometry of {name}: {e:?}"))?;

                match valid_geo {
                    geo::Geometry::MultiPolygon(mp) => mp,
                    geo::Geometry::Polygon(p) => MultiPolygon::new(vec![p]),
                    _ => continue,
                }
            }
            None => continue,
        };

        let geometry = if config.simplify_tolerance > 0.0 {
            geometry.simplify(&config.simplify_tolerance)
        } else {
            geometry
        };

        boundaries.push(Boundary::new(code, name, geometry));
    }

    Ok(boundaries)
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Loaded boundary sets keyed by source string.
///
/// Failures are cached too, so a broken source is not retried on every
/// frame; [`BoundaryCache::evict`] forces a new attempt.
#[derive(Default)]
pub struct BoundaryCache {
    entries: HashMap<String, Result<Arc<BoundarySet>, String>>,
}

impl BoundaryCache {
    pub fn get(&self, key: &str) -> Option<&Result<Arc<BoundarySet>, String>> {
        self.entries.get(key)
    }

    /// Return the cached entry for `key`, running `load` only on a miss.
    pub fn get_or_load_with<F>(&mut self, key: &str, load: F) -> &Result<Arc<BoundarySet>, String>
    where
        F: FnOnce() -> Result<BoundarySet>,
    {
        self.entries.entry(key.to_string()).or_insert_with(|| {
            load().map(Arc::new).map_err(|e| {
                log::error!("Failed to load region boundaries from {key}: {e:#}");
                format!("{e:#}")
            })
        })
    }

    pub fn get_or_load(&mut self, config: &BoundaryConfig) -> &Result<Arc<BoundarySet>, String> {
        self.get_or_load_with(&config.source, || load_boundaries(config))
    }

    pub fn evict(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Write;

    const REGIONS: &str = r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "type": "Feature",
          "properties": { "code": "44", "nom": "Grand Est" },
          "geometry": { "type": "Polygon", "coordinates": [[[4,48],[8,48],[8,50],[4,50],[4,48]]] }
        },
        {
          "type": "Feature",
          "properties": { "code": 27, "nom": "Bourgogne-Franche-Comté" },
          "geometry": { "type": "MultiPolygon", "coordinates": [
            [[[3,46],[7,46],[7,47],[4,47],[4,48],[3,48],[3,46]]]
          ] }
        },
        {
          "type": "Feature",
          "properties": { "code": "00" },
          "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]] }
        },
        {
          "type": "Feature",
          "properties": { "code": "01", "nom": "Somewhere" },
          "geometry": { "type": "Point", "coordinates": [1, 1] }
        }
      ]
    }"#;

    fn config() -> BoundaryConfig {
        BoundaryConfig {
            simplify_tolerance: 0.0,
            ..BoundaryConfig::default()
        }
    }

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("https://example.com/regions.geojson"));
        assert!(is_http_url("http://example.com/regions.geojson"));
        assert!(!is_http_url("/data/regions.geojson"));
        assert!(!is_http_url("ftp://example.com/regions.geojson"));
    }

    #[test]
    fn test_parse_skips_unnamed_and_non_polygons() {
        let boundaries = parse_boundaries(REGIONS.as_bytes(), &config()).unwrap();
        let names: Vec<&str> = boundaries.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Grand Est", "Bourgogne-Franche-Comté"]);
        assert_eq!(boundaries[0].code, "44");
        assert_eq!(boundaries[1].code, "27");
    }

    #[test]
    fn test_triangulation_covers_polygon() {
        let boundaries = parse_boundaries(REGIONS.as_bytes(), &config()).unwrap();
        // Rectangle → 2 triangles, concave hexagon → 4 triangles.
        assert_eq!(boundaries[0].triangles.len(), 2);
        assert_eq!(boundaries[1].triangles.len(), 4);

        let label = boundaries[0].label_point.unwrap();
        assert!((label.x() - 6.0).abs() < 1e-9);
        assert!((label.y() - 49.0).abs() < 1e-9);
        assert_eq!(boundaries[1].rings().len(), 1);
    }

    #[test]
    fn test_parse_rejects_non_collection() {
        let text = r#"{ "type": "Point", "coordinates": [1, 2] }"#;
        let err = parse_boundaries(text.as_bytes(), &config()).unwrap_err();
        assert!(err.to_string().contains("FeatureCollection"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".geojson").tempfile().unwrap();
        file.write_all(REGIONS.as_bytes()).unwrap();
        let config = BoundaryConfig {
            source: file.path().display().to_string(),
            ..config()
        };
        let set = load_boundaries(&config).unwrap();
        assert_eq!(set.source, config.source);
        assert_eq!(set.boundaries.len(), 2);
    }

    #[test]
    fn test_cache_loads_each_key_once() {
        let calls = Cell::new(0);
        let mut cache = BoundaryCache::default();
        let load = || -> Result<BoundarySet> {
            calls.set(calls.get() + 1);
            Ok(BoundarySet {
                source: "mem".to_string(),
                boundaries: parse_boundaries(REGIONS.as_bytes(), &config())?,
            })
        };

        assert!(cache.get("mem").is_none());
        assert!(cache.get_or_load_with("mem", load).is_ok());
        assert!(cache.get_or_load_with("mem", load).is_ok());
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.get("mem").unwrap().as_ref().unwrap().boundaries.len(), 2);
    }

    #[test]
    fn test_cache_keeps_failures_until_evicted() {
        let calls = Cell::new(0);
        let mut cache = BoundaryCache::default();
        let failing = || -> Result<BoundarySet> {
            calls.set(calls.get() + 1);
            Err(anyhow!("offline"))
        };

        assert_eq!(cache.get_or_load_with("url", failing).as_ref().unwrap_err(), "offline");
        assert!(cache.get_or_load_with("url", failing).is_err());
        assert_eq!(calls.get(), 1);

        cache.evict("url");
        assert!(cache.get_or_load_with("url", failing).is_err());
        assert_eq!(calls.get(), 2);
    }
}
