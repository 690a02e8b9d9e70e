use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::Path;

use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::DataType;
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{ElementDataset, ElementRecord, ENERGY_COLUMN, SYMBOL_COLUMN};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the element table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least `Symbol` and `Ionization_Energy_eV`
/// * `.json`    – `[{ "Symbol": "H", "Ionization_Energy_eV": 13.598 }, ...]`
/// * `.parquet` – `Symbol` string column, `Ionization_Energy_eV` numeric column
///
/// Rows come back in file order. Extra columns are ignored.
pub fn load_file(path: &Path) -> Result<ElementDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let not_found = |source| LoadError::InputNotFound {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(not_found)?;
    // Opening a directory succeeds on Unix; it still is not a table.
    let meta = file.metadata().map_err(not_found)?;
    if !meta.is_file() {
        return Err(not_found(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }

    let records = match ext.as_str() {
        "csv" => read_csv(file)?,
        "json" => read_json(file)?,
        "parquet" | "pq" => read_parquet(file)?,
        other => {
            return Err(LoadError::malformed(
                None,
                "extension",
                format!("unsupported file extension: .{other}"),
            ))
        }
    };

    let dataset = validate(records)?;
    info!("loaded {} elements from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Shared cell parsing and validation
// ---------------------------------------------------------------------------

fn parse_symbol(raw: &str, row: usize) -> Result<String, LoadError> {
    let sym = raw.trim();
    if sym.is_empty() {
        return Err(LoadError::malformed(Some(row), SYMBOL_COLUMN, "empty symbol"));
    }
    Ok(sym.to_string())
}

fn parse_energy(raw: &str, row: usize) -> Result<f64, LoadError> {
    let tok = raw.trim();
    if tok.is_empty() {
        return Err(LoadError::malformed(Some(row), ENERGY_COLUMN, "missing value"));
    }
    let value = tok.parse::<f64>().map_err(|_| {
        LoadError::malformed(Some(row), ENERGY_COLUMN, format!("'{tok}' is not a number"))
    })?;
    check_finite(value, row)
}

fn check_finite(value: f64, row: usize) -> Result<f64, LoadError> {
    if !value.is_finite() {
        return Err(LoadError::malformed(
            Some(row),
            ENERGY_COLUMN,
            format!("'{value}' is not a finite number"),
        ));
    }
    Ok(value)
}

/// Symbols are category keys, so they must be unique.
fn validate(records: Vec<ElementRecord>) -> Result<ElementDataset, LoadError> {
    let mut seen = HashSet::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        if !seen.insert(rec.symbol.as_str()) {
            return Err(LoadError::malformed(
                Some(i + 1),
                SYMBOL_COLUMN,
                format!("duplicate symbol '{}'", rec.symbol),
            ));
        }
    }
    Ok(ElementDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv(file: File) -> Result<Vec<ElementRecord>, LoadError> {
    let mut reader = csv::Reader::from_reader(file);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let sym_idx = column_index(&headers, SYMBOL_COLUMN)?;
    let energy_idx = column_index(&headers, ENERGY_COLUMN)?;
    debug!("csv columns: {headers:?}");

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(csv_error)?;
        let symbol = parse_symbol(record.get(sym_idx).unwrap_or(""), row)?;
        let energy = parse_energy(record.get(energy_idx).unwrap_or(""), row)?;
        records.push(ElementRecord::new(symbol, energy));
    }
    Ok(records)
}

fn column_index(headers: &[String], name: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| LoadError::malformed(None, name, "required column missing"))
}

fn csv_error(err: csv::Error) -> LoadError {
    // Record 0 is the header, so the record index is already the 1-based data row.
    let row = err.position().map(|p| p.record() as usize);
    LoadError::malformed(row, "record", err.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented layout, as written by `df.to_json(orient='records')`.
fn read_json(file: File) -> Result<Vec<ElementRecord>, LoadError> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(|e| LoadError::malformed(None, "document", format!("invalid JSON: {e}")))?;

    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::malformed(None, "document", "expected top-level JSON array"))?;

    rows.iter()
        .enumerate()
        .map(|(i, rec)| {
            let row = i + 1;
            let obj = rec
                .as_object()
                .ok_or_else(|| LoadError::malformed(Some(row), "record", "not a JSON object"))?;

            let symbol = match obj.get(SYMBOL_COLUMN) {
                Some(JsonValue::String(s)) => parse_symbol(s, row)?,
                Some(other) => {
                    return Err(LoadError::malformed(
                        Some(row),
                        SYMBOL_COLUMN,
                        format!("expected a string, got {other}"),
                    ))
                }
                None => {
                    return Err(LoadError::malformed(Some(row), SYMBOL_COLUMN, "missing"));
                }
            };

            let energy = match obj.get(ENERGY_COLUMN) {
                Some(JsonValue::Number(n)) => {
                    let v = n.as_f64().ok_or_else(|| {
                        LoadError::malformed(Some(row), ENERGY_COLUMN, format!("'{n}' is not a number"))
                    })?;
                    check_finite(v, row)?
                }
                Some(JsonValue::String(s)) => parse_energy(s, row)?,
                Some(JsonValue::Null) | None => {
                    return Err(LoadError::malformed(Some(row), ENERGY_COLUMN, "missing value"));
                }
                Some(other) => {
                    return Err(LoadError::malformed(
                        Some(row),
                        ENERGY_COLUMN,
                        format!("'{other}' is not a number"),
                    ))
                }
            };

            Ok(ElementRecord::new(symbol, energy))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both Pandas (`df.to_parquet()`) and Polars.
fn read_parquet(file: File) -> Result<Vec<ElementRecord>, LoadError> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .and_then(|b| b.build())
        .map_err(|e| LoadError::malformed(None, "document", format!("invalid parquet: {e}")))?;

    let mut records = Vec::new();
    let mut offset = 0usize;

    for batch_result in reader {
        let batch = batch_result
            .map_err(|e| LoadError::malformed(None, "document", format!("reading batch: {e}")))?;
        let schema = batch.schema();

        let sym_idx = schema
            .index_of(SYMBOL_COLUMN)
            .map_err(|_| LoadError::malformed(None, SYMBOL_COLUMN, "required column missing"))?;
        let energy_idx = schema
            .index_of(ENERGY_COLUMN)
            .map_err(|_| LoadError::malformed(None, ENERGY_COLUMN, "required column missing"))?;

        let sym_col = batch.column(sym_idx);
        let energy_col = batch.column(energy_idx);

        for i in 0..batch.num_rows() {
            let row = offset + i + 1;
            let symbol = parse_symbol(&string_cell(sym_col, i, row)?, row)?;
            let energy = check_finite(float_cell(energy_col, i, row)?, row)?;
            records.push(ElementRecord::new(symbol, energy));
        }
        offset += batch.num_rows();
    }
    Ok(records)
}

// -- Arrow helpers --

fn string_cell(col: &ArrayRef, i: usize, row: usize) -> Result<String, LoadError> {
    if col.is_null(i) {
        return Err(LoadError::malformed(Some(row), SYMBOL_COLUMN, "null value"));
    }
    if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
        Ok(arr.value(i).to_string())
    } else if let Some(arr) = col.as_any().downcast_ref::<LargeStringArray>() {
        Ok(arr.value(i).to_string())
    } else {
        Err(LoadError::malformed(
            None,
            SYMBOL_COLUMN,
            format!("expected a string column, got {:?}", col.data_type()),
        ))
    }
}

fn float_cell(col: &ArrayRef, i: usize, row: usize) -> Result<f64, LoadError> {
    if col.is_null(i) {
        return Err(LoadError::malformed(Some(row), ENERGY_COLUMN, "missing value"));
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(i)),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(i) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(i) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(i) as f64),
        DataType::Utf8 => {
            let raw = any
                .downcast_ref::<StringArray>()
                .map(|a| a.value(i).to_string())
                .unwrap_or_default();
            return parse_energy(&raw, row);
        }
        _ => None,
    };
    value.ok_or_else(|| {
        LoadError::malformed(
            None,
            ENERGY_COLUMN,
            format!("expected a numeric column, got {:?}", col.data_type()),
        )
    })
}
