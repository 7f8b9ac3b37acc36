use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::dashboard::DEFAULT_TOP_N;

/// Earthquake counts per city, filtered by a live magnitude threshold.
#[derive(Debug, Clone, Parser)]
#[command(name = "deprem-dash", version, about)]
pub struct Settings {
    /// Earthquake table (.csv, .tsv, .txt or .parquet).
    #[arg(long, env = "DEPREM_DATA", default_value = "Earthquake_4.csv")]
    pub data: PathBuf,

    /// Open the native dashboard window instead of serving it over HTTP.
    #[arg(long)]
    pub window: bool,

    /// Address the HTTP server binds to.
    #[arg(long, env = "DEPREM_BIND", default_value = "127.0.0.1:8050")]
    pub bind: SocketAddr,

    /// Number of cities shown in the chart.
    #[arg(long, env = "DEPREM_TOP", default_value_t = DEFAULT_TOP_N)]
    pub top: usize,
}
