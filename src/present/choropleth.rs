use std::collections::BTreeMap;

use serde::Deserialize;

use crate::boundary::Boundary;
use crate::data::regions;

/// How wine regions are matched to boundary polygons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionJoin {
    /// Through the fixed region → boundary code table.
    #[default]
    Exact,
    /// Boundary name contains the region name, ignoring case.
    /// "Loire" hits two administrative regions and "Bordeaux" none.
    Substring,
}

/// Wine count for every boundary, index-aligned with `boundaries`.
/// Boundaries nothing maps to get 0.
pub fn join_counts(
    boundaries: &[Boundary],
    region_counts: &BTreeMap<String, usize>,
    join: RegionJoin,
) -> Vec<usize> {
    boundaries
        .iter()
        .map(|boundary| match join {
            RegionJoin::Exact => region_counts
                .iter()
                .filter(|(region, _)| regions::boundary_code(region) == Some(boundary.code.as_str()))
                .map(|(_, &count)| count)
                .sum(),
            RegionJoin::Substring => {
                let boundary_name = boundary.name.to_lowercase();
                region_counts
                    .iter()
                    .filter(|(region, _)| {
                        !region.is_empty() && boundary_name.contains(&region.to_lowercase())
                    })
                    .map(|(_, &count)| count)
                    .sum()
            }
        })
        .collect()
}
