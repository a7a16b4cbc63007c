use std::{fmt, fs::File, path::Path, time::Duration};

use serde::Deserialize;

use crate::{
    cli::{Args, Backend},
    common::{validate_table_name, PayloadError},
};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_USER: &str = "payload";
pub const DEFAULT_DATABASE: &str = "test";
pub const DEFAULT_BATCH_SIZE: u32 = 10;
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Optional settings read from the `--config` JSON file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub table: Option<String>,
    pub backend: Option<Backend>,
    pub batch_size: Option<u32>,
    pub interval_ms: Option<u64>,
}

impl FileConfig {
    /// # Errors
    ///
    /// When the file cannot be opened or is not a valid config document.
    pub fn load(path: &Path) -> Result<Self, PayloadError> {
        let file = File::open(path).map_err(|source| PayloadError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(file).map_err(|source| PayloadError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved settings for one process run.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub backend: Backend,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub table: String,
    pub batch_size: u32,
    pub interval: Duration,
}

impl Config {
    /// Resolves settings from the command line, the process environment and
    /// the optional config file, in that order of precedence.
    ///
    /// # Errors
    ///
    /// On a missing required setting, an invalid value, or an unreadable config file.
    pub fn resolve(args: Args) -> Result<Self, PayloadError> {
        Self::resolve_with_env(args, |key| std::env::var(key).ok())
    }

    /// # Errors
    ///
    /// See [`Config::resolve`].
    pub fn resolve_with_env(
        args: Args,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, PayloadError> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let backend = args.backend.or(file.backend).unwrap_or_default();

        let host = args
            .host
            .or_else(|| env("PAYLOAD_HOST"))
            .or(file.host)
            .unwrap_or_else(|| DEFAULT_HOST.into());

        let env_port = env("PAYLOAD_PORT")
            .map(|value| {
                value
                    .parse::<u16>()
                    .map_err(|_| PayloadError::InvalidValue {
                        name: "PAYLOAD_PORT",
                        value,
                    })
            })
            .transpose()?;
        let port = args.port.or(env_port).or(file.port).unwrap_or(DEFAULT_PORT);

        let user = args
            .user
            .or_else(|| env("PAYLOAD_USER"))
            .or(file.user)
            .unwrap_or_else(|| DEFAULT_USER.into());

        let password = match (
            args.password
                .or_else(|| env("PAYLOAD_PASSWORD"))
                .or(file.password),
            backend,
        ) {
            (Some(password), _) => password,
            // SQLite files carry no credentials.
            (None, Backend::Sqlite) => String::new(),
            (None, Backend::Mysql) => return Err(PayloadError::MissingSetting("password")),
        };

        let database = args
            .database
            .or_else(|| env("PAYLOAD_DATABASE"))
            .or(file.database)
            .unwrap_or_else(|| DEFAULT_DATABASE.into());

        let table = args
            .table
            .or_else(|| env("PAYLOAD_TABLE"))
            .or(file.table)
            .ok_or(PayloadError::MissingSetting("table"))?;
        validate_table_name(&table)?;

        let batch_size = args
            .batch_size
            .or(file.batch_size)
            .unwrap_or(DEFAULT_BATCH_SIZE);
        if batch_size == 0 {
            return Err(PayloadError::InvalidBatchSize);
        }

        let interval = Duration::from_millis(
            args.interval_ms
                .or(file.interval_ms)
                .unwrap_or(DEFAULT_INTERVAL_MS),
        );

        Ok(Self {
            backend,
            host,
            port,
            user,
            password,
            database,
            table,
            batch_size,
            interval,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("table", &self.table)
            .field("batch_size", &self.batch_size)
            .field("interval", &self.interval)
            .finish()
    }
}
