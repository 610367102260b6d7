use std::collections::BTreeSet;

use super::model::{Dataset, Dimension};

// ---------------------------------------------------------------------------
// FacetSet – selectable values per dimension
// ---------------------------------------------------------------------------

/// Distinct values of every filterable dimension, taken from the full
/// (unfiltered) dataset. Sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSet {
    pub types: BTreeSet<String>,
    pub regions: BTreeSet<String>,
    pub varieties: BTreeSet<String>,
}

impl FacetSet {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut facets = FacetSet::default();
        for wine in &dataset.records {
            facets.types.insert(wine.wine_type.clone());
            facets.regions.insert(wine.region.clone());
            facets.varieties.extend(wine.varieties.iter().cloned());
        }
        facets
    }

    pub fn values(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Type => &self.types,
            Dimension::Region => &self.regions,
            Dimension::Variety => &self.varieties,
        }
    }
}
