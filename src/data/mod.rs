//! Data layer: raw loading, cleaning, city extraction and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .tsv / .txt / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse file → RawTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  clean   │  trim labels, coerce numbers, city::extract_city,
//!   └──────────┘  drop incomplete rows → CleanedTable (immutable)
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate │  magnitude threshold → ranked Vec<CityCount>
//!   └───────────┘
//! ```

pub mod aggregate;
pub mod city;
pub mod clean;
pub mod error;
pub mod loader;
pub mod model;

use std::path::Path;

pub use error::DataError;
pub use model::{CityCount, CleanedTable, Record};

/// Load and clean a dataset in one go.
pub fn load_cleaned(path: &Path) -> Result<CleanedTable, DataError> {
    clean::clean(loader::load_file(path)?)
}
