//! Error types for Tenantry

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// API error
    #[error("API error: {0}")]
    Api(String),

    /// Blocking database task failed to complete
    #[error("Task error: {0}")]
    Task(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Not found error, carrying the message shown to clients
    #[error("{1}")]
    NotFound(&'static str, String),

    /// Validation error
    #[error("{0}")]
    Validation(String),

    /// Uniqueness conflict
    #[error("{0}")]
    Conflict(String),
}

/// Result type alias for Core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl From<tokio::task::JoinError> for CoreError {
    fn from(e: tokio::task::JoinError) -> Self {
        CoreError::Task(e.to_string())
    }
}

impl CoreError {
    /// True when the underlying SQLite error is a UNIQUE/PRIMARY KEY violation
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            CoreError::Database(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        )
    }

    /// Replace a UNIQUE violation with a conflict carrying `message`
    pub fn into_conflict(self, message: &str) -> Self {
        if self.is_unique_violation() {
            CoreError::Conflict(message.to_string())
        } else {
            self
        }
    }
}
