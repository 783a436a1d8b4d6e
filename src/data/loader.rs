use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Input schema
// ---------------------------------------------------------------------------

pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER: &str = "Booster Version Category";

/// Schema-level load failures, surfaced inside `anyhow` context chains.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing '{0}' column")]
    MissingColumn(&'static str),
    #[error("'class' value {0} is not 0 or 1")]
    BadClass(i64),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load launch records from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the four schema columns (primary format)
/// * `.json`    – records-oriented array of objects keyed by column name
/// * `.parquet` – one scalar column per schema column
///
/// An empty dataset is an error: the process has nothing to chart and the
/// range control has no bounds to seed from.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }?;

    if dataset.is_empty() {
        bail!("{}: no launch records", path.display());
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let file = File::open(path).context("opening CSV")?;
    read_csv(file)
}

fn read_csv<R: Read>(input: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let column = |name: &'static str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))
    };
    let site_idx = column(COL_SITE)?;
    let payload_idx = column(COL_PAYLOAD)?;
    let class_idx = column(COL_CLASS)?;
    let booster_idx = column(COL_BOOSTER)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let payload_raw = record.get(payload_idx).unwrap_or("").trim();
        let payload_mass_kg = payload_raw
            .parse::<f64>()
            .with_context(|| format!("CSV row {row_no}: '{payload_raw}' is not a payload mass"))?;

        let class_raw = record.get(class_idx).unwrap_or("").trim();
        let class = class_raw
            .parse::<i64>()
            .with_context(|| format!("CSV row {row_no}: '{class_raw}' is not a class value"))?;
        let outcome = Outcome::from_class(class)
            .ok_or(LoadError::BadClass(class))
            .with_context(|| format!("CSV row {row_no}"))?;

        records.push(LaunchRecord {
            site: record.get(site_idx).unwrap_or("").to_string(),
            payload_mass_kg,
            outcome,
            booster_category: record.get(booster_idx).unwrap_or("").to_string(),
        });
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 2500.0,
///     "class": 1,
///     "Booster Version Category": "FT"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<LaunchDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let site = obj
            .get(COL_SITE)
            .and_then(JsonValue::as_str)
            .ok_or(LoadError::MissingColumn(COL_SITE))
            .with_context(|| format!("Row {i}"))?;
        let payload_mass_kg = obj
            .get(COL_PAYLOAD)
            .and_then(JsonValue::as_f64)
            .ok_or(LoadError::MissingColumn(COL_PAYLOAD))
            .with_context(|| format!("Row {i}"))?;
        let class = obj
            .get(COL_CLASS)
            .and_then(JsonValue::as_i64)
            .ok_or(LoadError::MissingColumn(COL_CLASS))
            .with_context(|| format!("Row {i}"))?;
        let outcome = Outcome::from_class(class)
            .ok_or(LoadError::BadClass(class))
            .with_context(|| format!("Row {i}"))?;
        let booster = obj
            .get(COL_BOOSTER)
            .and_then(JsonValue::as_str)
            .ok_or(LoadError::MissingColumn(COL_BOOSTER))
            .with_context(|| format!("Row {i}"))?;

        records.push(LaunchRecord {
            site: site.to_string(),
            payload_mass_kg,
            outcome,
            booster_category: booster.to_string(),
        });
    }

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load launch records from a Parquet file with one scalar column per schema
/// column. Works with files written by both **Pandas** (`df.to_parquet()`)
/// and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &'static str| -> Result<&ArrayRef, LoadError> {
            schema
                .index_of(name)
                .map(|i| batch.column(i))
                .map_err(|_| LoadError::MissingColumn(name))
        };
        let site_col = column(COL_SITE)?;
        let payload_col = column(COL_PAYLOAD)?;
        let class_col = column(COL_CLASS)?;
        let booster_col = column(COL_BOOSTER)?;

        for row in 0..batch.num_rows() {
            let site = string_at(site_col, row)
                .with_context(|| format!("Row {row}: reading '{COL_SITE}'"))?;
            let payload_mass_kg = f64_at(payload_col, row)
                .with_context(|| format!("Row {row}: reading '{COL_PAYLOAD}'"))?;
            let class = i64_at(class_col, row)
                .with_context(|| format!("Row {row}: reading '{COL_CLASS}'"))?;
            let outcome = Outcome::from_class(class)
                .ok_or(LoadError::BadClass(class))
                .with_context(|| format!("Row {row}"))?;
            let booster_category = string_at(booster_col, row)
                .with_context(|| format!("Row {row}: reading '{COL_BOOSTER}'"))?;

            records.push(LaunchRecord {
                site,
                payload_mass_kg,
                outcome,
                booster_category,
            });
        }
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn string_at(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("expected a string column, got {other:?}"),
    }
}

fn f64_at(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            Ok(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            Ok(arr.value(row) as f64)
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            Ok(arr.value(row) as f64)
        }
        other => bail!("expected a numeric column, got {other:?}"),
    }
}

fn i64_at(col: &ArrayRef, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            Ok(arr.value(row))
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            Ok(arr.value(row) as i64)
        }
        other => bail!("expected an integer column, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;
    use crate::data::model::Outcome;

    const SAMPLE_CSV: &str = "\
Launch Site,Payload Mass (kg),class,Booster Version Category
CCAFS LC-40,500.0,1,v1.0
CCAFS LC-40,1500.5,0,v1.1
KSC LC-39A,2000.0,1,FT
";

    #[test]
    fn csv_rows_parse_in_order() {
        let ds = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[0].site, "CCAFS LC-40");
        assert_eq!(ds.records[0].outcome, Outcome::Success);
        assert_eq!(ds.records[1].payload_mass_kg, 1500.5);
        assert_eq!(ds.records[1].outcome, Outcome::Failure);
        assert_eq!(ds.records[2].booster_category, "FT");
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "KSC LC-39A"]);
    }

    #[test]
    fn csv_missing_column_is_reported() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category\nA,1.0,v1\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::MissingColumn(COL_CLASS))
        ));
    }

    #[test]
    fn csv_bad_class_is_reported() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,1.0,3,v1\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::BadClass(3))
        ));
    }

    #[test]
    fn csv_non_numeric_payload_is_reported() {
        let csv = "Launch Site,Payload Mass (kg),class,Booster Version Category\nA,heavy,1,v1\n";
        assert!(read_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn json_records_parse() {
        let json = r#"[
            {"Launch Site": "VAFB SLC-4E", "Payload Mass (kg)": 9600.0, "class": 1, "Booster Version Category": "B5"},
            {"Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 350.0, "class": 0, "Booster Version Category": "v1.0"}
        ]"#;
        let ds = parse_json(json).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].site, "VAFB SLC-4E");
        assert_eq!(ds.records[0].outcome, Outcome::Success);
        assert_eq!(ds.records[1].payload_mass_kg, 350.0);
    }

    #[test]
    fn json_missing_field_is_reported() {
        let json = r#"[{"Launch Site": "A", "class": 1, "Booster Version Category": "v1"}]"#;
        let err = parse_json(json).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::MissingColumn(COL_PAYLOAD))
        ));
    }

    #[test]
    fn unsupported_extension_is_reported() {
        let err = load_file(Path::new("launches.txt")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::UnsupportedExtension(ext)) if ext == "txt"
        ));
    }

    #[test]
    fn empty_input_is_an_error() {
        let path = std::env::temp_dir().join(format!("launchdash-empty-{}.csv", std::process::id()));
        std::fs::write(
            &path,
            "Launch Site,Payload Mass (kg),class,Booster Version Category\n",
        )
        .unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("no launch records"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn parquet_round_trip() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD, DataType::Float64, false),
            Field::new(COL_CLASS, DataType::Int64, false),
            Field::new(COL_BOOSTER, DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["KSC LC-39A", "CCAFS SLC-40"])),
                Arc::new(Float64Array::from(vec![5300.0, 2500.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec!["B4", "FT"])),
            ],
        )
        .unwrap();

        let path =
            std::env::temp_dir().join(format!("launchdash-test-{}.parquet", std::process::id()));
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].site, "KSC LC-39A");
        assert_eq!(ds.records[0].payload_mass_kg, 5300.0);
        assert_eq!(ds.records[0].outcome, Outcome::Success);
        assert_eq!(ds.records[1].booster_category, "FT");

        std::fs::remove_file(&path).unwrap();
    }
}
