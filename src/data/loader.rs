use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{Attribute, PenguinDataset, PenguinRecord, Species};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and prepare a penguin dataset.
pub fn load_file(path: &Path) -> Result<PenguinDataset> {
    let raw = read_records(path)?;
    let raw_len = raw.len();
    let dataset = PenguinDataset::prepare(raw);
    log::info!(
        "Loaded {raw_len} records from {}, {} after dropping missing body_mass_g",
        path.display(),
        dataset.len()
    );
    Ok(dataset)
}

/// Read raw records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – flat columns, nulls (or NaN) for missing measurements
/// * `.json`    – `[{ "species": "Adelie", "body_mass_g": 3750, ... }, ...]`
/// * `.csv`     – the Palmer CSV layout, `NA` or empty for missing values
pub fn read_records(path: &Path) -> Result<Vec<PenguinRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => read_parquet(path),
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            parse_json(&text)
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            parse_csv(file)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

const NUMERIC_COLUMNS: [Attribute; 4] = Attribute::ALL;

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names. `species` and the four
/// measurement columns are required; `island`, `sex` and `year` are
/// optional. Extra columns (e.g. a pandas index) are ignored.
pub fn parse_csv<R: Read>(input: R) -> Result<Vec<PenguinRecord>> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let find = |name: &str| headers.iter().position(|h| h == name);
    let species_idx = find("species").context("CSV missing 'species' column")?;
    let mut numeric_idx = [0usize; 4];
    for (slot, attr) in numeric_idx.iter_mut().zip(NUMERIC_COLUMNS) {
        *slot = find(attr.column())
            .with_context(|| format!("CSV missing '{}' column", attr.column()))?;
    }
    let island_idx = find("island");
    let sex_idx = find("sex");
    let year_idx = find("year");

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let species: Species = cell(species_idx)
            .parse()
            .with_context(|| format!("CSV row {row_no}"))?;

        let mut measurements = [None; 4];
        for (m, (idx, attr)) in measurements
            .iter_mut()
            .zip(numeric_idx.iter().zip(NUMERIC_COLUMNS))
        {
            *m = parse_nullable_f64(cell(*idx), row_no, attr.column())?;
        }

        let year = match year_idx.map(cell) {
            Some(s) if !is_missing(s) => Some(
                s.parse::<i64>()
                    .with_context(|| format!("CSV row {row_no}, year: '{s}' is not an integer"))?,
            ),
            _ => None,
        };

        records.push(PenguinRecord {
            species,
            island: island_idx.map(cell).unwrap_or("").to_string(),
            bill_length_mm: measurements[0],
            bill_depth_mm: measurements[1],
            flipper_length_mm: measurements[2],
            body_mass_g: measurements[3],
            sex: sex_idx
                .map(cell)
                .filter(|s| !is_missing(s))
                .map(str::to_string),
            year,
        });
    }

    Ok(records)
}

fn is_missing(s: &str) -> bool {
    s.is_empty() || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("nan")
}

fn parse_nullable_f64(s: &str, row: usize, col: &str) -> Result<Option<f64>> {
    if is_missing(s) {
        return Ok(None);
    }
    let v = s
        .parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{s}' is not a number"))?;
    if !v.is_finite() {
        bail!("Row {row}, {col}: '{s}' is not a finite number");
    }
    Ok(Some(v))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "species": "Adelie",
///     "island": "Torgersen",
///     "bill_length_mm": 39.1,
///     "bill_depth_mm": 18.7,
///     "flipper_length_mm": 181,
///     "body_mass_g": 3750,
///     "sex": "male",
///     "year": 2007
///   },
///   ...
/// ]
/// ```
pub fn parse_json(text: &str) -> Result<Vec<PenguinRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    rows.iter()
        .enumerate()
        .map(|(i, rec)| {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            json_record(obj, i)
        })
        .collect()
}

fn json_record(obj: &Map<String, JsonValue>, row: usize) -> Result<PenguinRecord> {
    let species: Species = obj
        .get("species")
        .and_then(|v| v.as_str())
        .with_context(|| format!("Row {row}: missing or invalid 'species'"))?
        .parse()
        .with_context(|| format!("Row {row}"))?;

    let mut measurements = [None; 4];
    for (m, attr) in measurements.iter_mut().zip(NUMERIC_COLUMNS) {
        *m = json_nullable_f64(obj.get(attr.column()), row, attr.column())?;
    }

    let text = |key: &str| {
        obj.get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !is_missing(s))
            .map(str::to_string)
    };

    Ok(PenguinRecord {
        species,
        island: text("island").unwrap_or_default(),
        bill_length_mm: measurements[0],
        bill_depth_mm: measurements[1],
        flipper_length_mm: measurements[2],
        body_mass_g: measurements[3],
        sex: text("sex"),
        year: obj.get("year").and_then(|v| v.as_i64()),
    })
}

fn json_nullable_f64(val: Option<&JsonValue>, row: usize, col: &str) -> Result<Option<f64>> {
    match val {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => Ok(n.as_f64()),
        Some(JsonValue::String(s)) => parse_nullable_f64(s.trim(), row, col),
        Some(other) => bail!("Row {row}, {col}: {other} is not a number"),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat penguin columns.
///
/// Measurements may be Float64, Float32, Int64 or Int32; NaN is treated as
/// missing, which is what pandas writes for a float column with gaps.
fn read_parquet(path: &Path) -> Result<Vec<PenguinRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let column = |name: &str| schema.index_of(name).ok().map(|i| batch.column(i));

        let species_col = column("species").context("Parquet file missing 'species' column")?;
        let mut numeric_cols = Vec::with_capacity(4);
        for attr in NUMERIC_COLUMNS {
            numeric_cols.push(
                column(attr.column())
                    .with_context(|| format!("Parquet file missing '{}' column", attr.column()))?,
            );
        }
        let island_col = column("island");
        let sex_col = column("sex");
        let year_col = column("year");

        for row in 0..batch.num_rows() {
            let offset = records.len();
            let species: Species = extract_str(species_col, row)?
                .with_context(|| format!("Row {offset}: null species"))?
                .parse()
                .with_context(|| format!("Row {offset}"))?;

            let mut measurements = [None; 4];
            for (m, (col, attr)) in measurements
                .iter_mut()
                .zip(numeric_cols.iter().zip(NUMERIC_COLUMNS))
            {
                *m = extract_f64(col, row)
                    .with_context(|| format!("Row {offset}: failed to read '{attr}'"))?;
            }

            let island = match island_col {
                Some(col) => extract_str(col, row)?.unwrap_or_default(),
                None => String::new(),
            };
            let sex = match sex_col {
                Some(col) => extract_str(col, row)?.filter(|s| !is_missing(s)),
                None => None,
            };
            let year = match year_col {
                Some(col) => extract_f64(col, row)?.map(|y| y as i64),
                None => None,
            };

            records.push(PenguinRecord {
                species,
                island,
                bill_length_mm: measurements[0],
                bill_depth_mm: measurements[1],
                flipper_length_mm: measurements[2],
                body_mass_g: measurements[3],
                sex,
                year,
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

/// Extract a nullable number from a numeric column. NaN is missing, an
/// infinity is an error.
fn extract_f64(col: &ArrayRef, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let v = match col.data_type() {
        DataType::Float64 => downcast::<Float64Array>(col)?.value(row),
        DataType::Float32 => downcast::<Float32Array>(col)?.value(row) as f64,
        DataType::Int64 => downcast::<Int64Array>(col)?.value(row) as f64,
        DataType::Int32 => downcast::<Int32Array>(col)?.value(row) as f64,
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    if v.is_infinite() {
        bail!("{v} is not a finite number");
    }
    Ok((!v.is_nan()).then_some(v))
}

/// Extract a nullable string from a Utf8 or LargeUtf8 column.
fn extract_str(col: &ArrayRef, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let s = match col.data_type() {
        DataType::Utf8 => downcast::<StringArray>(col)?.value(row),
        DataType::LargeUtf8 => downcast::<LargeStringArray>(col)?.value(row),
        other => bail!("Expected a string column, got {other:?}"),
    };
    Ok(Some(s.to_string()))
}

fn downcast<T: Array + 'static>(col: &ArrayRef) -> Result<&T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array layout for {:?}", col.data_type()))
}
