/// Read-only views of the filtered wines, ready for the widgets in
/// `crate::ui`. Nothing here mutates the dataset or feeds back into the
/// filter.
pub mod aggregate;
pub mod choropleth;
pub mod markers;
pub mod table;
