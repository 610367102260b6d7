/// Data layer: core types, loading, facets and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet      (or the built-in sample)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (Vitigni split into varieties)
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  facets   │   │  filter   │  FilterSelection → matching wines
///   └──────────┘   └──────────┘
///    options for        │
///    the side panel     ▼
///                  crate::present (charts, maps, table)
/// ```

pub mod facets;
pub mod filter;
pub mod loader;
pub mod model;
pub mod regions;
