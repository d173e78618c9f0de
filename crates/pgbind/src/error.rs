//! Error types for pgbind

use crate::value::Value;
use thiserror::Error;

/// Result type alias for pgbind operations
pub type BindResult<T> = Result<T, BindError>;

/// Error types for SQL composition and connection handling
#[derive(Debug, Error)]
pub enum BindError {
    /// An interleaved template argument was neither a recognized token
    /// kind nor a scalar value
    #[error("Unexpected value expression after \"{constructed_sql}\": {value}")]
    UnexpectedValue {
        /// The SQL text assembled up to the offending argument
        constructed_sql: String,
        /// Debug rendering of the offending value
        value: String,
    },

    /// Structural validation error (arity mismatch, empty list, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Failure to obtain a connection from the underlying pool
    #[error("Pool error: {0}")]
    Pool(String),

    /// Connection handle misuse (e.g. use after release)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// An interceptor hook aborted the lifecycle
    #[error("Interceptor error: {0}")]
    Interceptor(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl BindError {
    /// Create an unexpected-value error carrying the SQL assembled so far.
    pub fn unexpected_value(constructed_sql: impl Into<String>, value: &Value) -> Self {
        Self::UnexpectedValue {
            constructed_sql: constructed_sql.into(),
            value: format!("{value:?}"),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create an interceptor error
    pub fn interceptor(message: impl Into<String>) -> Self {
        Self::Interceptor(message.into())
    }

    /// Create an uncategorized error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a pool acquisition error
    pub fn is_pool(&self) -> bool {
        matches!(self, Self::Pool(_))
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for BindError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
