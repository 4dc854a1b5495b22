//! Error types for sqlbind

use thiserror::Error;

/// Result type alias for sqlbind operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for statement building and row mapping
#[derive(Debug, Error)]
pub enum OrmError {
    /// Row cursor read error
    #[error("Cursor error: {0}")]
    Cursor(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl OrmError {
    /// Create a cursor error
    pub fn cursor(message: impl Into<String>) -> Self {
        Self::Cursor(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a cursor error
    pub fn is_cursor(&self) -> bool {
        matches!(self, Self::Cursor(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<serde_json::Error> for OrmError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
