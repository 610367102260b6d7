use std::collections::BTreeSet;

use super::facets::FacetSet;
use super::model::{Dataset, Dimension, WineRecord};

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per dimension
// ---------------------------------------------------------------------------

/// Selected values for each dimension.
///
/// An empty set selects nothing, so no wine passes that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub types: BTreeSet<String>,
    pub regions: BTreeSet<String>,
    pub varieties: BTreeSet<String>,
}

impl FilterSelection {
    /// Every facet value selected (i.e., show everything).
    pub fn all(facets: &FacetSet) -> Self {
        FilterSelection {
            types: facets.types.clone(),
            regions: facets.regions.clone(),
            varieties: facets.varieties.clone(),
        }
    }

    pub fn values(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Type => &self.types,
            Dimension::Region => &self.regions,
            Dimension::Variety => &self.varieties,
        }
    }

    fn values_mut(&mut self, dimension: Dimension) -> &mut BTreeSet<String> {
        match dimension {
            Dimension::Type => &mut self.types,
            Dimension::Region => &mut self.regions,
            Dimension::Variety => &mut self.varieties,
        }
    }

    pub fn is_selected(&self, dimension: Dimension, value: &str) -> bool {
        self.values(dimension).contains(value)
    }

    /// Toggle a single value of a dimension.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) {
        let selected = self.values_mut(dimension);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
    }

    /// Select every facet value of a dimension.
    pub fn select_all(&mut self, dimension: Dimension, facets: &FacetSet) {
        *self.values_mut(dimension) = facets.values(dimension).clone();
    }

    /// Deselect every value of a dimension.
    pub fn select_none(&mut self, dimension: Dimension) {
        self.values_mut(dimension).clear();
    }

    /// Carry this selection over to a reloaded dataset.
    ///
    /// Values missing from `new` are dropped. Values that were not in `old`
    /// start selected; values the user had deselected stay deselected.
    pub fn reconcile(&self, old: &FacetSet, new: &FacetSet) -> Self {
        let carry = |dimension: Dimension| -> BTreeSet<String> {
            let selected = self.values(dimension);
            let known = old.values(dimension);
            new.values(dimension)
                .iter()
                .filter(|v| selected.contains(*v) || !known.contains(*v))
                .cloned()
                .collect()
        };
        FilterSelection {
            types: carry(Dimension::Type),
            regions: carry(Dimension::Region),
            varieties: carry(Dimension::Variety),
        }
    }

    /// Whether a single wine passes all three dimensions.
    ///
    /// AND across dimensions; a wine with several varieties passes the
    /// variety dimension when any one of them is selected.
    pub fn matches(&self, wine: &WineRecord) -> bool {
        self.types.contains(&wine.wine_type)
            && self.regions.contains(&wine.region)
            && wine.varieties.iter().any(|v| self.varieties.contains(v))
    }
}

/// Return indices of wines that pass the selection, in dataset order.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, wine)| selection.matches(wine))
        .map(|(i, _)| i)
        .collect()
}

/// Return the wines that pass the selection, in dataset order.
pub fn filter<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> Vec<&'a WineRecord> {
    dataset
        .records
        .iter()
        .filter(|wine| selection.matches(wine))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::DatasetSource;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn names<'a>(wines: &[&'a WineRecord]) -> Vec<&'a str> {
        wines.iter().map(|w| w.name.as_str()).collect()
    }

    fn builtin_all() -> (Dataset, FacetSet, FilterSelection) {
        let ds = Dataset::builtin();
        let facets = FacetSet::from_dataset(&ds);
        let all = FilterSelection::all(&facets);
        (ds, facets, all)
    }

    #[test]
    fn test_full_selection_is_identity() {
        let (ds, _, all) = builtin_all();
        let out = filter(&ds, &all);
        assert_eq!(out.len(), ds.len());
        for (kept, original) in out.iter().zip(&ds.records) {
            assert!(std::ptr::eq(*kept, original));
        }
        assert_eq!(filtered_indices(&ds, &all), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_any_empty_dimension_gives_empty_result() {
        let (ds, _, all) = builtin_all();
        for dim in Dimension::ALL {
            let mut sel = all.clone();
            sel.select_none(dim);
            assert!(filter(&ds, &sel).is_empty(), "{dim} empty should hide all");
        }
    }

    #[test]
    fn test_red_wines_scenario() {
        let (ds, _, mut sel) = builtin_all();
        sel.types = set(&["Rosso"]);
        assert_eq!(names(&filter(&ds, &sel)), vec!["Château Margaux", "Côtes du Rhône"]);
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 3]);
    }

    #[test]
    fn test_variety_is_or_within_dimension() {
        let (ds, _, mut sel) = builtin_all();
        sel.varieties = set(&["Pinot Noir"]);
        assert_eq!(names(&filter(&ds, &sel)), vec!["Dom Pérignon"]);
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let (ds, _, mut sel) = builtin_all();
        sel.varieties = set(&["Chardonnay"]);
        assert_eq!(names(&filter(&ds, &sel)), vec!["Chablis", "Dom Pérignon"]);
        sel.regions = set(&["Champagne", "Loire"]);
        assert_eq!(names(&filter(&ds, &sel)), vec!["Dom Pérignon"]);
        sel.types = set(&["Bianco"]);
        assert!(filter(&ds, &sel).is_empty());
    }

    #[test]
    fn test_output_preserves_input_order() {
        let ds = Dataset::new(
            vec![
                WineRecord::new("Z", "Rosso", "Syrah", "Rhône"),
                WineRecord::new("A", "Bianco", "Viognier", "Rhône"),
                WineRecord::new("M", "Rosso", "Grenache, Syrah", "Rhône"),
            ],
            DatasetSource::Builtin,
        );
        let mut sel = FilterSelection::all(&FacetSet::from_dataset(&ds));
        sel.varieties = set(&["Syrah", "Viognier"]);
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 1, 2]);
        sel.types = set(&["Rosso"]);
        assert_eq!(names(&filter(&ds, &sel)), vec!["Z", "M"]);
    }

    #[test]
    fn test_empty_variety_cell_passes_full_selection() {
        let ds = Dataset::new(
            vec![WineRecord::new("Mystery", "Rosso", "", "Jura")],
            DatasetSource::Builtin,
        );
        let all = FilterSelection::all(&FacetSet::from_dataset(&ds));
        assert_eq!(filter(&ds, &all).len(), 1);
    }

    #[test]
    fn test_toggle_and_select_all() {
        let (ds, facets, mut sel) = builtin_all();
        sel.toggle(Dimension::Region, "Loire");
        assert!(!sel.is_selected(Dimension::Region, "Loire"));
        assert_eq!(filter(&ds, &sel).len(), 4);
        sel.toggle(Dimension::Region, "Loire");
        assert!(sel.is_selected(Dimension::Region, "Loire"));

        sel.select_none(Dimension::Type);
        assert!(sel.types.is_empty());
        sel.select_all(Dimension::Type, &facets);
        assert_eq!(sel.types, facets.types);
    }

    #[test]
    fn test_reconcile_drops_stale_and_selects_new() {
        let (_, old_facets, mut sel) = builtin_all();
        sel.toggle(Dimension::Type, "Bianco");

        let reloaded = Dataset::new(
            vec![
                WineRecord::new("Chablis", "Bianco", "Chardonnay", "Bourgogne"),
                WineRecord::new("Tavel", "Rosato", "Grenache", "Rhône"),
                WineRecord::new("Pomerol", "Rosso", "Merlot", "Bordeaux"),
            ],
            DatasetSource::Builtin,
        );
        let new_facets = FacetSet::from_dataset(&reloaded);
        let carried = sel.reconcile(&old_facets, &new_facets);

        // Bianco stays deselected, Rosato is new, Spumante is gone.
        assert_eq!(carried.types, set(&["Rosato", "Rosso"]));
        assert_eq!(carried.regions, set(&["Bordeaux", "Bourgogne", "Rhône"]));
        assert_eq!(carried.varieties, set(&["Chardonnay", "Grenache", "Merlot"]));
        for dim in Dimension::ALL {
            assert!(carried.values(dim).is_subset(new_facets.values(dim)));
        }
    }
}
