use super::city::extract_city;
use super::error::DataError;
use super::model::{CleanedTable, CleaningReport, RawTable, RawValue, Record};

pub const DATE: &str = "Date";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const DEPTH: &str = "Depth";
pub const MAGNITUDE: &str = "Magnitude";
pub const LOCATION: &str = "Location";

/// Columns every input table must carry, matched after trimming.
pub const REQUIRED_COLUMNS: [&str; 6] = [DATE, LATITUDE, LONGITUDE, DEPTH, MAGNITUDE, LOCATION];

/// Positions of the required columns inside a raw row.
struct ColumnIndex {
    date: usize,
    latitude: usize,
    longitude: usize,
    depth: usize,
    magnitude: usize,
    location: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self, DataError> {
        let trimmed: Vec<&str> = headers.iter().map(|h| h.trim()).collect();
        let find = |name: &str| trimmed.iter().position(|h| *h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&name| find(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DataError::MissingColumns(missing));
        }

        let at = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            date: at(DATE),
            latitude: at(LATITUDE),
            longitude: at(LONGITUDE),
            depth: at(DEPTH),
            magnitude: at(MAGNITUDE),
            location: at(LOCATION),
        })
    }
}

/// Why a raw row did not make it into the cleaned table.
enum Rejection {
    MissingField,
    NoCity,
}

/// Turn a raw table into the immutable snapshot the dashboard queries.
///
/// Numeric fields that fail to parse (or are not finite) count as missing,
/// and any row with a missing required field, or whose location holds no
/// parenthesized city, is dropped.  Only a missing required column fails
/// the whole pass.
pub fn clean(raw: RawTable) -> Result<CleanedTable, DataError> {
    let index = ColumnIndex::resolve(&raw.headers)?;

    let mut report = CleaningReport {
        rows_read: raw.len(),
        ..Default::default()
    };
    let mut records = Vec::with_capacity(raw.len());

    for row in &raw.rows {
        match clean_row(row, &index) {
            Ok(record) => records.push(record),
            Err(Rejection::MissingField) => report.dropped_missing += 1,
            Err(Rejection::NoCity) => report.dropped_no_city += 1,
        }
    }
    report.rows_kept = records.len();

    log::info!("cleaned dataset: {report}");
    Ok(CleanedTable::new(records, report))
}

fn clean_row(row: &[RawValue], index: &ColumnIndex) -> Result<Record, Rejection> {
    let number = |i: usize| {
        row.get(i)
            .and_then(RawValue::to_finite_f64)
            .ok_or(Rejection::MissingField)
    };
    let text = |i: usize| {
        row.get(i)
            .and_then(RawValue::to_text)
            .ok_or(Rejection::MissingField)
    };

    let date = text(index.date)?;
    let latitude = number(index.latitude)?;
    let longitude = number(index.longitude)?;
    let depth = number(index.depth)?;
    let magnitude = number(index.magnitude)?;
    let location = text(index.location)?;

    let city = extract_city(&location).ok_or(Rejection::NoCity)?.to_string();

    Ok(Record {
        date,
        latitude,
        longitude,
        depth,
        magnitude,
        location,
        city,
    })
}
