use crate::data::model::{COL_NAME, COL_REGION, COL_TYPE, COL_VARIETIES, WineRecord};

/// Column headers of the wine table, in display order.
pub const TABLE_HEADERS: [&str; 5] = ["#", COL_NAME, COL_TYPE, COL_VARIETIES, COL_REGION];

/// One row of the filtered wine table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow<'a> {
    /// Position in the filtered list, starting at 0.
    pub index: usize,
    pub name: &'a str,
    pub wine_type: &'a str,
    pub varieties: &'a str,
    pub region: &'a str,
}

pub fn table_rows<'a>(wines: &[&'a WineRecord]) -> Vec<TableRow<'a>> {
    wines
        .iter()
        .enumerate()
        .map(|(index, &wine)| TableRow {
            index,
            name: &wine.name,
            wine_type: &wine.wine_type,
            varieties: &wine.varieties_raw,
            region: &wine.region,
        })
        .collect()
}
