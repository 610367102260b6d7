use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Column names of the tabular input
// ---------------------------------------------------------------------------

pub const COL_NAME: &str = "Vino";
pub const COL_TYPE: &str = "Tipo";
pub const COL_VARIETIES: &str = "Vitigni";
pub const COL_REGION: &str = "Regione";

/// Every column a wine list must provide, in display order.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_NAME, COL_TYPE, COL_VARIETIES, COL_REGION];

/// Separator between grape varieties inside a `Vitigni` cell.
pub const VARIETY_SEPARATOR: &str = ", ";

// ---------------------------------------------------------------------------
// Dimension – one filterable attribute
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Type,
    Region,
    Variety,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Type, Dimension::Region, Dimension::Variety];

    /// Label shown above the filter widget.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Type => "Wine type",
            Dimension::Region => "Region",
            Dimension::Variety => "Grape variety",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// WineRecord – one row of the wine list
// ---------------------------------------------------------------------------

/// A single wine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WineRecord {
    pub name: String,
    pub wine_type: String,
    /// `varieties_raw` split on [`VARIETY_SEPARATOR`].
    pub varieties: Vec<String>,
    /// The `Vitigni` cell as it appeared in the source.
    pub varieties_raw: String,
    pub region: String,
}

impl WineRecord {
    pub fn new(
        name: impl Into<String>,
        wine_type: impl Into<String>,
        varieties_raw: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        let varieties_raw = varieties_raw.into();
        WineRecord {
            name: name.into(),
            wine_type: wine_type.into(),
            varieties: split_varieties(&varieties_raw),
            varieties_raw,
            region: region.into(),
        }
    }
}

/// Split a `Vitigni` cell into its grape varieties.
///
/// Empty pieces are kept: an empty cell yields `[""]`, so every record has
/// at least one variety and can be selected through the variety filter.
pub fn split_varieties(raw: &str) -> Vec<String> {
    raw.split(VARIETY_SEPARATOR)
        .map(|v| v.trim().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded wine list
// ---------------------------------------------------------------------------

/// Where a dataset was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Builtin,
    File(PathBuf),
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Builtin => write!(f, "built-in sample"),
            DatasetSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<WineRecord>,
    pub source: DatasetSource,
}

impl Dataset {
    pub fn new(records: Vec<WineRecord>, source: DatasetSource) -> Self {
        Dataset { records, source }
    }

    /// The five-wine sample shown when no file has been loaded.
    pub fn builtin() -> Self {
        let records = vec![
            WineRecord::new("Château Margaux", "Rosso", "Cabernet Sauvignon, Merlot", "Bordeaux"),
            WineRecord::new("Chablis", "Bianco", "Chardonnay", "Bourgogne"),
            WineRecord::new("Dom Pérignon", "Spumante", "Chardonnay, Pinot Noir", "Champagne"),
            WineRecord::new("Côtes du Rhône", "Rosso", "Grenache, Syrah", "Rhône"),
            WineRecord::new("Sancerre", "Bianco", "Sauvignon Blanc", "Loire"),
        ];
        Dataset::new(records, DatasetSource::Builtin)
    }

    /// Number of wines.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records at the given indices, in the order of `indices`.
    pub fn select<'a>(&'a self, indices: &[usize]) -> Vec<&'a WineRecord> {
        indices.iter().filter_map(|&i| self.records.get(i)).collect()
    }
}
