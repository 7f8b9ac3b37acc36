use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::DataError;
use super::model::{RawTable, RawValue};

/// Cell contents read as missing, on top of empty / whitespace-only cells.
const NA_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "#N/A", "<NA>",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a raw earthquake table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`          – comma separated, header row first
/// * `.tsv` / `.tab` – tab separated
/// * `.txt`          – delimiter sniffed from the header line
/// * `.parquet`      – one column per field, utf8 or numeric
pub fn load_file(path: &Path) -> Result<RawTable, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_delimited(path, b','),
        "tsv" | "tab" => load_delimited(path, b'\t'),
        "txt" => {
            let delimiter = sniff_delimiter(path)?;
            load_delimited(path, delimiter)
        }
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedExtension(other.to_string())),
    }
}

fn open(path: &Path) -> Result<File, DataError> {
    File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names, then one observation per line.  Short rows
/// are padded with `Null`, long rows are cut at the header width.
fn load_delimited(path: &Path, delimiter: u8) -> Result<RawTable, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(open(path)?);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let width = headers.len();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row: Vec<RawValue> = record.iter().take(width).map(raw_cell).collect();
        row.resize(width, RawValue::Null);
        rows.push(row);
    }

    log::debug!("read {} rows from {}", rows.len(), path.display());
    Ok(RawTable { headers, rows })
}

/// Pick the candidate delimiter that occurs most often in the header line.
fn sniff_delimiter(path: &Path) -> Result<u8, DataError> {
    let mut first_line = String::new();
    BufReader::new(open(path)?)
        .read_line(&mut first_line)
        .map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let best = [b',', b';', b'\t', b'|']
        .into_iter()
        .map(|d| (d, first_line.bytes().filter(|&b| b == d).count()))
        .max_by_key(|&(_, n)| n)
        .filter(|&(_, n)| n > 0)
        .map(|(d, _)| d)
        .unwrap_or(b',');
    Ok(best)
}

fn raw_cell(s: &str) -> RawValue {
    let trimmed = s.trim();
    if trimmed.is_empty() || NA_TOKENS.contains(&trimmed) {
        return RawValue::Null;
    }
    RawValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file whose columns are the observation fields.
///
/// Utf8 columns become text, integer and float columns become numbers, and
/// anything else (dates, timestamps, ...) is rendered to text through
/// Arrow's display formatting.  Works with files written by **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<RawTable, DataError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| extract_value(col, row))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }
    }

    log::debug!("read {} rows from {}", rows.len(), path.display());
    Ok(RawTable { headers, rows })
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_value(col: &Arc<dyn Array>, row: usize) -> Result<RawValue, DataError> {
    if col.is_null(row) {
        return Ok(RawValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => raw_cell(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => raw_cell(col.as_string::<i64>().value(row)),
        DataType::Int32 => RawValue::Number(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Int64 => RawValue::Number(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Float32 => RawValue::Number(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => RawValue::Number(col.as_primitive::<Float64Type>().value(row)),
        _ => RawValue::Text(array_value_to_string(col, row)?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::array::{Float64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_keeps_raw_headers_and_marks_missing_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "quakes.csv",
            " Date ,Magnitude,Location\n2020-01-01,4.5,EGE (IZMIR)\n2020-01-02,NaN,\n",
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.headers, vec![" Date ", "Magnitude", "Location"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][2], RawValue::Text("EGE (IZMIR)".into()));
        assert_eq!(table.rows[1][1], RawValue::Null);
        assert_eq!(table.rows[1][2], RawValue::Null);
    }

    #[test]
    fn short_rows_are_padded_with_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "short.csv", "a,b,c\n1\n1,2,3,4\n");

        let table = load_file(&path).unwrap();
        assert_eq!(
            table.rows[0],
            vec![RawValue::Text("1".into()), RawValue::Null, RawValue::Null]
        );
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn txt_sniffs_semicolons() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "quakes.txt", "Date;Magnitude\n2020;4.1\n");

        let table = load_file(&path).unwrap();
        assert_eq!(table.headers, vec!["Date", "Magnitude"]);
        assert_eq!(table.rows[0][1], RawValue::Text("4.1".into()));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("quakes.xlsx")).unwrap_err();
        assert!(matches!(err, DataError::UnsupportedExtension(ext) if ext == "xlsx"));
    }

    #[test]
    fn parquet_columns_map_to_text_and_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quakes.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("Location", DataType::Utf8, true),
            Field::new("Magnitude", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("EGE (IZMIR)"), None])),
                Arc::new(Float64Array::from(vec![Some(4.5), Some(5.0)])),
            ],
        )
        .unwrap();
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.headers, vec!["Location", "Magnitude"]);
        assert_eq!(
            table.rows,
            vec![
                vec![RawValue::Text("EGE (IZMIR)".into()), RawValue::Number(4.5)],
                vec![RawValue::Null, RawValue::Number(5.0)],
            ]
        );
    }
}
