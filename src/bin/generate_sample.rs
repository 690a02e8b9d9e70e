use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::print_batches;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// (atomic number, symbol, name, first ionization energy in eV)
const ELEMENTS: &[(i64, &str, &str, f64)] = &[
    (1, "H", "Hydrogen", 13.598),
    (2, "He", "Helium", 24.587),
    (3, "Li", "Lithium", 5.392),
    (4, "Be", "Beryllium", 9.323),
    (5, "B", "Boron", 8.298),
    (6, "C", "Carbon", 11.260),
    (7, "N", "Nitrogen", 14.534),
    (8, "O", "Oxygen", 13.618),
    (9, "F", "Fluorine", 17.423),
    (10, "Ne", "Neon", 21.565),
    (11, "Na", "Sodium", 5.139),
    (12, "Mg", "Magnesium", 7.646),
    (13, "Al", "Aluminum", 5.986),
    (14, "Si", "Silicon", 8.152),
    (15, "P", "Phosphorus", 10.487),
    (16, "S", "Sulfur", 10.360),
    (17, "Cl", "Chlorine", 12.968),
    (18, "Ar", "Argon", 15.760),
    (19, "K", "Potassium", 4.341),
    (20, "Ca", "Calcium", 6.113),
    (21, "Sc", "Scandium", 6.561),
    (22, "Ti", "Titanium", 6.828),
    (23, "V", "Vanadium", 6.746),
    (24, "Cr", "Chromium", 6.767),
    (25, "Mn", "Manganese", 7.434),
    (26, "Fe", "Iron", 7.902),
    (27, "Co", "Cobalt", 7.881),
    (28, "Ni", "Nickel", 7.640),
    (29, "Cu", "Copper", 7.726),
    (30, "Zn", "Zinc", 9.394),
    (31, "Ga", "Gallium", 5.999),
    (32, "Ge", "Germanium", 7.899),
    (33, "As", "Arsenic", 9.789),
    (34, "Se", "Selenium", 9.752),
    (35, "Br", "Bromine", 11.814),
    (36, "Kr", "Krypton", 14.000),
];

#[derive(Serialize)]
struct SampleRow<'a> {
    #[serde(rename = "AtomicNumber")]
    atomic_number: i64,
    #[serde(rename = "Symbol")]
    symbol: &'a str,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Ionization_Energy_eV")]
    ionization_energy_ev: f64,
}

fn write_csv(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for &(atomic_number, symbol, name, ionization_energy_ev) in ELEMENTS {
        writer.serialize(SampleRow {
            atomic_number,
            symbol,
            name,
            ionization_energy_ev,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("AtomicNumber", DataType::Int64, false),
        Field::new("Symbol", DataType::Utf8, false),
        Field::new("Name", DataType::Utf8, false),
        Field::new("Ionization_Energy_eV", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(ELEMENTS.iter().map(|e| e.0))),
            Arc::new(StringArray::from_iter_values(ELEMENTS.iter().map(|e| e.1))),
            Arc::new(StringArray::from_iter_values(ELEMENTS.iter().map(|e| e.2))),
            Arc::new(Float64Array::from_iter_values(ELEMENTS.iter().map(|e| e.3))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    print_batches(&[batch]).context("printing sample table")?;
    Ok(())
}

fn main() -> Result<()> {
    let dir = Path::new("data");
    std::fs::create_dir_all(dir).context("creating data directory")?;

    let csv_path = dir.join("elements.csv");
    write_csv(&csv_path)?;
    let parquet_path = dir.join("elements.parquet");
    write_parquet(&parquet_path)?;

    println!(
        "Wrote {} elements to {} and {}",
        ELEMENTS.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
