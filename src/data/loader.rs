use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use arrow::array::{Array, AsArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{
    COL_NAME, COL_REGION, COL_TYPE, COL_VARIETIES, Dataset, DatasetSource, REQUIRED_COLUMNS,
    WineRecord,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The file was readable but does not look like a wine list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInputError {
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("row {row}: '{column}' is not a text value")]
    InvalidCell { row: usize, column: String },
}

/// Position of every required column, in [`REQUIRED_COLUMNS`] order.
fn locate_columns<S: AsRef<str>>(headers: &[S]) -> Result<[usize; 4], MalformedInputError> {
    let mut found = [0usize; 4];
    let mut missing = Vec::new();
    for (slot, wanted) in found.iter_mut().zip(REQUIRED_COLUMNS) {
        match headers.iter().position(|h| h.as_ref() == wanted) {
            Some(idx) => *slot = idx,
            None => missing.push(wanted.to_string()),
        }
    }
    if missing.is_empty() {
        Ok(found)
    } else {
        Err(MalformedInputError::MissingColumns(missing))
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a wine list from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Vino`, `Tipo`, `Vitigni`, `Regione`
/// * `.json`    – `[{ "Vino": ..., "Tipo": ..., "Vitigni": ..., "Regione": ... }, ...]`
/// * `.parquet` – string columns with the same names
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(anyhow!("Unsupported file extension: .{other}")),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::debug!("{} wines read from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let file = File::open(path).context("opening CSV")?;
    load_csv_reader(file, DatasetSource::File(path.to_path_buf()))
}

/// Parse a CSV wine list from any reader. Extra columns are ignored.
pub fn load_csv_reader<R: Read>(reader: R, source: DatasetSource) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let [name_idx, type_idx, varieties_idx, region_idx] = locate_columns(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();
        records.push(WineRecord::new(
            cell(name_idx),
            cell(type_idx),
            cell(varieties_idx),
            cell(region_idx),
        ));
    }

    Ok(Dataset::new(records, source))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Vino": "Chablis", "Tipo": "Bianco", "Vitigni": "Chardonnay", "Regione": "Bourgogne" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text, DatasetSource::File(path.to_path_buf()))
}

fn parse_json(text: &str, source: DatasetSource) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut objects = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        objects.push(obj);
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| objects.iter().any(|obj| !obj.contains_key(**col)))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(MalformedInputError::MissingColumns(missing).into());
    }

    let mut records = Vec::with_capacity(objects.len());
    for (i, obj) in objects.iter().enumerate() {
        let cell = |col: &str| json_text(&obj[col], i, col);
        records.push(WineRecord::new(
            cell(COL_NAME)?,
            cell(COL_TYPE)?,
            cell(COL_VARIETIES)?,
            cell(COL_REGION)?,
        ));
    }

    Ok(Dataset::new(records, source))
}

fn json_text(val: &JsonValue, row: usize, col: &str) -> Result<String, MalformedInputError> {
    match val {
        JsonValue::String(s) => Ok(s.trim().to_string()),
        JsonValue::Null => Ok(String::new()),
        _ => Err(MalformedInputError::InvalidCell {
            row,
            column: col.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// The four wine columns must be `Utf8` or `LargeUtf8`; nulls load as empty
/// strings.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let field_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let indices = locate_columns(&field_names)?;

    let reader = builder.build().context("building parquet reader")?;
    let mut records = Vec::new();
    let mut row_offset = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let mut columns = Vec::with_capacity(indices.len());
        for (&idx, name) in indices.iter().zip(REQUIRED_COLUMNS) {
            columns.push(StringColumn::new(batch.column(idx), name, row_offset)?);
        }

        for row in 0..batch.num_rows() {
            records.push(WineRecord::new(
                columns[0].value(row),
                columns[1].value(row),
                columns[2].value(row),
                columns[3].value(row),
            ));
        }
        row_offset += batch.num_rows();
    }

    Ok(Dataset::new(records, DatasetSource::File(path.to_path_buf())))
}

/// Borrowed view of a string column, either offset width.
enum StringColumn<'a> {
    Utf8(&'a arrow::array::StringArray),
    LargeUtf8(&'a arrow::array::LargeStringArray),
}

impl<'a> StringColumn<'a> {
    fn new(
        col: &'a Arc<dyn Array>,
        name: &str,
        row_offset: usize,
    ) -> Result<Self, MalformedInputError> {
        match col.data_type() {
            DataType::Utf8 => Ok(StringColumn::Utf8(col.as_string::<i32>())),
            DataType::LargeUtf8 => Ok(StringColumn::LargeUtf8(col.as_string::<i64>())),
            _ => Err(MalformedInputError::InvalidCell {
                row: row_offset,
                column: name.to_string(),
            }),
        }
    }

    fn value(&self, row: usize) -> &'a str {
        let (is_null, text) = match *self {
            StringColumn::Utf8(arr) => (arr.is_null(row), arr.value(row)),
            StringColumn::LargeUtf8(arr) => (arr.is_null(row), arr.value(row)),
        };
        if is_null { "" } else { text.trim() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    const SAMPLE_CSV: &str = "\
Vino,Tipo,Vitigni,Regione,Annata
Château Margaux,Rosso,\"Cabernet Sauvignon, Merlot\",Bordeaux,2015
Sancerre,Bianco,Sauvignon Blanc,Loire,2020
";

    fn missing_columns(err: &anyhow::Error) -> Vec<String> {
        match err.downcast_ref::<MalformedInputError>() {
            Some(MalformedInputError::MissingColumns(cols)) => cols.clone(),
            other => panic!("expected MissingColumns, got {other:?} ({err:#})"),
        }
    }

    #[test]
    fn test_csv_reader_parses_records() {
        let ds = load_csv_reader(SAMPLE_CSV.as_bytes(), DatasetSource::Builtin).unwrap();
        assert_eq!(ds.len(), 2);
        let margaux = &ds.records[0];
        assert_eq!(margaux.name, "Château Margaux");
        assert_eq!(margaux.wine_type, "Rosso");
        assert_eq!(margaux.varieties, vec!["Cabernet Sauvignon", "Merlot"]);
        assert_eq!(margaux.varieties_raw, "Cabernet Sauvignon, Merlot");
        assert_eq!(margaux.region, "Bordeaux");
    }

    #[test]
    fn test_csv_columns_in_any_order_with_bom() {
        let text = "\u{feff}Regione,Vitigni,Vino,Tipo\nAlsace,Riesling,Trimbach,Bianco\n";
        let ds = load_csv_reader(text.as_bytes(), DatasetSource::Builtin).unwrap();
        assert_eq!(ds.records[0], WineRecord::new("Trimbach", "Bianco", "Riesling", "Alsace"));
    }

    #[test]
    fn test_csv_missing_columns_are_all_named() {
        let text = "Vino,Colore,Zona\nChablis,Bianco,Bourgogne\n";
        let err = load_csv_reader(text.as_bytes(), DatasetSource::Builtin).unwrap_err();
        assert_eq!(missing_columns(&err), vec!["Tipo", "Vitigni", "Regione"]);
        assert!(err.to_string().contains("Tipo, Vitigni, Regione"));
    }

    #[test]
    fn test_csv_short_row_yields_empty_cells() {
        let text = "Vino,Tipo,Vitigni,Regione\nAnonimo,Rosso\n";
        let ds = load_csv_reader(text.as_bytes(), DatasetSource::Builtin).unwrap();
        assert_eq!(ds.records[0].region, "");
        assert_eq!(ds.records[0].varieties, vec![""]);
    }

    #[test]
    fn test_csv_header_only_is_empty_dataset() {
        let ds = load_csv_reader("Vino,Tipo,Vitigni,Regione\n".as_bytes(), DatasetSource::Builtin)
            .unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_json_records() {
        let text = r#"[
            {"Vino": "Chablis", "Tipo": "Bianco", "Vitigni": "Chardonnay", "Regione": "Bourgogne"},
            {"Vino": "Tavel", "Tipo": "Rosato", "Vitigni": "Grenache, Cinsault", "Regione": null}
        ]"#;
        let ds = parse_json(text, DatasetSource::Builtin).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].varieties, vec!["Grenache", "Cinsault"]);
        assert_eq!(ds.records[1].region, "");
    }

    #[test]
    fn test_json_missing_column() {
        let text = r#"[{"Vino": "Chablis", "Tipo": "Bianco", "Vitigni": "Chardonnay"}]"#;
        let err = parse_json(text, DatasetSource::Builtin).unwrap_err();
        assert_eq!(missing_columns(&err), vec!["Regione"]);
    }

    #[test]
    fn test_json_non_text_cell() {
        let text = r#"[{"Vino": 7, "Tipo": "Bianco", "Vitigni": "Chardonnay", "Regione": "Loire"}]"#;
        let err = parse_json(text, DatasetSource::Builtin).unwrap_err();
        assert_eq!(
            err.downcast_ref::<MalformedInputError>(),
            Some(&MalformedInputError::InvalidCell { row: 0, column: "Vino".to_string() })
        );
    }

    #[test]
    fn test_load_file_dispatch_csv() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.source, DatasetSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_load_file_reports_path_and_columns() {
        let mut file = tempfile::Builder::new().suffix(".CSV").tempfile().unwrap();
        file.write_all(b"Vino,Tipo\nChablis,Bianco\n").unwrap();
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(missing_columns(&err), vec!["Vitigni", "Regione"]);
        assert!(format!("{err:#}").contains("loading"));
    }

    #[test]
    fn test_load_file_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file extension: .xlsx"));
    }

    fn write_parquet(schema: Schema, columns: Vec<Arc<dyn Array>>) -> tempfile::NamedTempFile {
        let schema = Arc::new(schema);
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        file
    }

    #[test]
    fn test_parquet_round_trip_with_nulls() {
        let file = write_parquet(
            Schema::new(vec![
                Field::new("Vino", DataType::Utf8, false),
                Field::new("Tipo", DataType::Utf8, false),
                Field::new("Vitigni", DataType::Utf8, true),
                Field::new("Regione", DataType::Utf8, false),
            ]),
            vec![
                Arc::new(StringArray::from(vec!["Dom Pérignon", "Anonimo"])),
                Arc::new(StringArray::from(vec!["Spumante", "Rosso"])),
                Arc::new(StringArray::from(vec![Some("Chardonnay, Pinot Noir"), None])),
                Arc::new(StringArray::from(vec!["Champagne", "Corsica"])),
            ],
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].varieties, vec!["Chardonnay", "Pinot Noir"]);
        assert_eq!(ds.records[1].varieties_raw, "");
    }

    #[test]
    fn test_parquet_wrong_column_type() {
        let file = write_parquet(
            Schema::new(vec![
                Field::new("Vino", DataType::Utf8, false),
                Field::new("Tipo", DataType::Int64, false),
                Field::new("Vitigni", DataType::Utf8, false),
                Field::new("Regione", DataType::Utf8, false),
            ]),
            vec![
                Arc::new(StringArray::from(vec!["Chablis"])),
                Arc::new(Int64Array::from(vec![1])),
                Arc::new(StringArray::from(vec!["Chardonnay"])),
                Arc::new(StringArray::from(vec!["Bourgogne"])),
            ],
        );
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<MalformedInputError>(),
            Some(&MalformedInputError::InvalidCell { row: 0, column: "Tipo".to_string() })
        );
    }

    #[test]
    fn test_parquet_missing_column() {
        let file = write_parquet(
            Schema::new(vec![Field::new("Vino", DataType::Utf8, false)]),
            vec![Arc::new(StringArray::from(vec!["Chablis"]))],
        );
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(missing_columns(&err), vec!["Tipo", "Vitigni", "Regione"]);
    }
}
