use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// RawValue – a single cell as read from disk
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring what a tabular reader hands back.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Null,
}

impl RawValue {
    /// Coerce the cell to a finite `f64`.  Anything else is "missing".
    pub fn to_finite_f64(&self) -> Option<f64> {
        let v = match self {
            RawValue::Number(v) => *v,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
            RawValue::Null => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Text view of the cell.  Numbers are rendered, `Null` is `None`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            RawValue::Text(s) => Some(s.clone()),
            RawValue::Number(v) => Some(v.to_string()),
            RawValue::Null => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – the loader's output, before any cleaning
// ---------------------------------------------------------------------------

/// Header labels exactly as found in the file, plus one `Vec<RawValue>` per
/// row.  Rows are padded with `Null` to the header width.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawValue>>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Record – one cleaned earthquake observation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub date: String,
    pub latitude: f64,
    pub longitude: f64,
    pub depth: f64,
    pub magnitude: f64,
    /// Free text, e.g. `"CENTRAL ANATOLIA (ANKARA)"`.
    pub location: String,
    /// Derived from `location`.
    pub city: String,
}

// ---------------------------------------------------------------------------
// CleaningReport – what the cleaning pass kept and dropped
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub rows_read: usize,
    /// Dropped because a required field was missing or not numeric.
    pub dropped_missing: usize,
    /// Dropped because the location held no parenthesized city.
    pub dropped_no_city: usize,
    pub rows_kept: usize,
}

impl fmt::Display for CleaningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows read, {} kept ({} missing fields, {} without city)",
            self.rows_read, self.rows_kept, self.dropped_missing, self.dropped_no_city
        )
    }
}

// ---------------------------------------------------------------------------
// CleanedTable – the immutable snapshot every query runs against
// ---------------------------------------------------------------------------

/// Only the cleaner can build one; afterwards it is read-only.  Share it
/// across threads as `Arc<CleanedTable>`.
#[derive(Debug, Clone, Default)]
pub struct CleanedTable {
    records: Vec<Record>,
    report: CleaningReport,
}

impl CleanedTable {
    pub(crate) fn new(records: Vec<Record>, report: CleaningReport) -> Self {
        Self { records, report }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn report(&self) -> CleaningReport {
        self.report
    }

    /// Largest magnitude present, `None` for an empty table.
    pub fn max_magnitude(&self) -> Option<f64> {
        self.records
            .iter()
            .map(|r| r.magnitude)
            .max_by(|a, b| a.total_cmp(b))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// CityCount – one aggregated bar
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityCount {
    pub city: String,
    pub count: usize,
}
