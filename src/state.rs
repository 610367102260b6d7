use std::path::Path;
use std::sync::Arc;

use crate::boundary::{BoundaryCache, BoundarySet};
use crate::color::ColorMap;
use crate::config::AppConfig;
use crate::data::facets::FacetSet;
use crate::data::filter::{FilterSelection, filtered_indices};
use crate::data::loader;
use crate::data::model::{Dataset, DatasetSource, Dimension, WineRecord};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which output fills the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Charts,
    MarkerMap,
    Choropleth,
    Table,
}

impl View {
    pub const ALL: [View; 4] = [View::Charts, View::MarkerMap, View::Choropleth, View::Table];

    pub fn label(self) -> &'static str {
        match self {
            View::Charts => "Charts",
            View::MarkerMap => "Map",
            View::Choropleth => "Choropleth",
            View::Table => "Table",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Loaded wine list (the built-in sample until a file is opened).
    pub dataset: Dataset,

    /// Selectable values, always from the full dataset.
    pub facets: FacetSet,

    /// Per-dimension filter selections.
    pub selection: FilterSelection,

    /// Indices of wines passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    pub type_colors: ColorMap,
    pub region_colors: ColorMap,

    pub boundaries: BoundaryCache,
    /// Set once the choropleth has asked for boundaries this session.
    pub boundaries_requested: bool,

    pub view: View,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig, dataset: Dataset) -> Self {
        let mut state = AppState {
            config,
            dataset: Dataset::new(Vec::new(), DatasetSource::Builtin),
            facets: FacetSet::default(),
            selection: FilterSelection::default(),
            visible_indices: Vec::new(),
            type_colors: ColorMap::default(),
            region_colors: ColorMap::default(),
            boundaries: BoundaryCache::default(),
            boundaries_requested: false,
            view: View::Charts,
            status_message: None,
        };
        state.set_dataset(dataset);
        state
    }

    /// Ingest a newly loaded dataset: recompute facets and colours, carry
    /// the selection over and refilter.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        let facets = FacetSet::from_dataset(&dataset);
        log::debug!(
            "{} types, {} regions, {} varieties",
            facets.types.len(),
            facets.regions.len(),
            facets.varieties.len()
        );
        self.selection = self.selection.reconcile(&self.facets, &facets);
        self.type_colors = ColorMap::new(&facets.types);
        self.region_colors = ColorMap::new(&facets.regions);
        self.facets = facets;
        self.dataset = dataset;
        self.status_message = None;
        self.refilter();
    }

    /// Load a file, keeping the current dataset if it fails.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!("Loaded {} wines from {}", dataset.len(), path.display());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset, &self.selection);
    }

    /// The wines passing the current filters, in dataset order.
    pub fn visible_wines(&self) -> Vec<&WineRecord> {
        self.dataset.select(&self.visible_indices)
    }

    /// Toggle a single value in a dimension's filter.
    pub fn toggle_filter_value(&mut self, dimension: Dimension, value: &str) {
        self.selection.toggle(dimension, value);
        self.refilter();
    }

    /// Select all values in a dimension.
    pub fn select_all(&mut self, dimension: Dimension) {
        self.selection.select_all(dimension, &self.facets);
        self.refilter();
    }

    /// Deselect all values in a dimension.
    pub fn select_none(&mut self, dimension: Dimension) {
        self.selection.select_none(dimension);
        self.refilter();
    }

    /// Region boundaries for the configured source, loading them on first use.
    pub fn boundaries(&mut self) -> Result<Arc<BoundarySet>, String> {
        self.boundaries.get_or_load(&self.config.boundaries).clone()
    }

    /// Forget a failed boundary load so the next frame tries again.
    pub fn retry_boundaries(&mut self) {
        self.boundaries.evict(&self.config.boundaries.source);
    }
}
