use std::path::PathBuf;

use thiserror;

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Missing required setting: --{0}")]
    MissingSetting(&'static str),
    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),
    #[error("Batch size must be at least 1")]
    InvalidBatchSize,
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
    #[error("Cannot read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Console output failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("MySQL error: {0}")]
    MySql(#[from] sqlx::Error),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlite::Error),
}

pub const MAX_TABLE_NAME_LEN: usize = 64;

/// Checks that `name` is safe to interpolate as a quoted identifier.
///
/// # Errors
///
/// When the name is empty, too long, or holds characters outside `[A-Za-z0-9_$]`.
pub fn validate_table_name(name: &str) -> Result<(), PayloadError> {
    let well_formed = !name.is_empty()
        && name.len() <= MAX_TABLE_NAME_LEN
        && name
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$');

    if well_formed {
        Ok(())
    } else {
        Err(PayloadError::InvalidTableName(name.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate_table_name() {
        assert!(validate_table_name("payload_test").is_ok());
        assert!(validate_table_name("t$1").is_ok());
        assert!(validate_table_name(&"x".repeat(MAX_TABLE_NAME_LEN)).is_ok());

        assert!(validate_table_name("").is_err());
        assert!(validate_table_name("drop table; --").is_err());
        assert!(validate_table_name("a`b").is_err());
        assert!(validate_table_name("a\"b").is_err());
        assert!(validate_table_name(&"x".repeat(MAX_TABLE_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_missing_setting_message() {
        let err = PayloadError::MissingSetting("password");
        assert_eq!("Missing required setting: --password", err.to_string());
    }
}
