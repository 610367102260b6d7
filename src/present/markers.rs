use crate::data::model::WineRecord;
use crate::data::regions::{self, Coordinate};

/// A pin to draw on the marker map.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerRequest {
    pub coordinate: Coordinate,
    /// Used to colour the pin.
    pub wine_type: String,
    pub label: String,
}

/// One marker per wine whose region has a known coordinate.
/// Wines from other regions are left off the map.
pub fn build_markers(wines: &[&WineRecord]) -> Vec<MarkerRequest> {
    wines
        .iter()
        .filter_map(|wine| {
            let coordinate = regions::coordinate(&wine.region)?;
            Some(MarkerRequest {
                coordinate,
                wine_type: wine.wine_type.clone(),
                label: marker_label(wine),
            })
        })
        .collect()
}

fn marker_label(wine: &WineRecord) -> String {
    format!(
        "{}\nTipo: {}\nVitigni: {}",
        wine.name, wine.wine_type, wine.varieties_raw
    )
}
