use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Mysql,
    Sqlite,
}

/// Run a dumb insert/delete payload against a database in an infinite loop.
///
/// Settings left out fall back to `PAYLOAD_*` environment variables, then to
/// the `--config` file, then to the defaults listed below.
#[derive(Debug, Default, Parser)]
#[command(name = "payload", version)]
pub struct Args {
    /// Database host [default: 127.0.0.1]
    #[arg(long)]
    pub host: Option<String>,

    /// Database port [default: 3306]
    #[arg(long)]
    pub port: Option<u16>,

    /// Database user [default: payload]
    #[arg(long)]
    pub user: Option<String>,

    /// Database password (required for mysql)
    #[arg(long)]
    pub password: Option<String>,

    /// Database to connect to; a file path for sqlite [default: test]
    #[arg(long)]
    pub database: Option<String>,

    /// Table to write to (required)
    #[arg(long)]
    pub table: Option<String>,

    /// Database backend [default: mysql]
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,

    /// Rows inserted per burst [default: 10]
    #[arg(long)]
    pub batch_size: Option<u32>,

    /// Pause between two inserts, in milliseconds [default: 1000]
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}
