use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop the dataset from loading.  All of these are
/// startup-fatal; per-row problems never surface here.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing delimited file: {0}")]
    Csv(#[from] csv::Error),

    #[error("reading parquet file: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("decoding arrow column: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}
