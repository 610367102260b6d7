use std::collections::BTreeMap;

use crate::data::model::WineRecord;

/// Number of wines per key, sorted by key.
pub fn count_by<'a, F>(wines: &[&'a WineRecord], key: F) -> BTreeMap<String, usize>
where
    F: Fn(&'a WineRecord) -> &'a str,
{
    let mut counts = BTreeMap::new();
    for &wine in wines {
        *counts.entry(key(wine).to_string()).or_insert(0) += 1;
    }
    counts
}

pub fn count_by_type(wines: &[&WineRecord]) -> BTreeMap<String, usize> {
    count_by(wines, |w| w.wine_type.as_str())
}

pub fn count_by_region(wines: &[&WineRecord]) -> BTreeMap<String, usize> {
    count_by(wines, |w| w.region.as_str())
}

/// One slice of a proportion (pie) chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
}

/// Turn counts into fractions of the total; zero counts are dropped.
pub fn proportions(counts: &BTreeMap<String, usize>) -> Vec<Share> {
    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }
    counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(label, &count)| Share {
            label: label.clone(),
            count,
            fraction: count as f64 / total as f64,
        })
        .collect()
}
