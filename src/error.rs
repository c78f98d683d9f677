//! Error types for the Contacts API.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! HTTP-facing errors live in [`crate::server::ApiError`].

use thiserror::Error;

/// Errors that can occur inside a contact store.
///
/// Expected "not found" conditions are never reported through this type;
/// stores signal them with `None` or `false`.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite reported an error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A blocking storage task panicked or was cancelled
    #[error("Storage task failed: {0}")]
    TaskJoin(String),

    /// A thread panicked while holding the connection lock
    #[error("Storage lock poisoned")]
    LockPoisoned,

    /// Generic storage error with context
    #[error("Storage error: {0}")]
    Other(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::LockPoisoned;
        assert_eq!(err.to_string(), "Storage lock poisoned");

        let err = StoreError::TaskJoin("cancelled".to_string());
        assert_eq!(err.to_string(), "Storage task failed: cancelled");

        let err = StoreError::Other("disk full".to_string());
        assert_eq!(err.to_string(), "Storage error: disk full");
    }

    #[test]
    fn test_config_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            var: "CONTACTS_STORE".to_string(),
            reason: "Must be one of: sqlite, memory".to_string(),
        };
        assert!(err.to_string().contains("CONTACTS_STORE"));
        assert!(err.to_string().contains("sqlite, memory"));
    }

    #[test]
    fn test_sqlite_error_converts() {
        let err: StoreError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, StoreError::Sqlite(_)));
    }
}
