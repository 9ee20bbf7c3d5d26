use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by pgscribe operations
#[derive(Error, Debug)]
pub enum ScribeError {
    /// A data operation was attempted without an active session handle
    #[error("Not connected to a database")]
    NotConnected,
    /// Pool construction or the liveness check failed
    #[error("Connection error: {0}")]
    Connection(String),
    /// A catalog or data query failed, or returned data that cannot be interpreted
    #[error("Metadata query error: {0}")]
    MetadataQuery(String),
    /// The requested table is not visible in the current scope
    #[error("Table not found: {table} (schemas: {scope})")]
    TableNotFound { table: String, scope: String },
    /// A single query exceeded its time budget
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),
    /// Malformed input at the transport boundary
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ScribeError {
    /// True for errors caused by the caller rather than the database
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ScribeError::NotConnected | ScribeError::InvalidRequest(_) | ScribeError::TableNotFound { .. }
        )
    }
}

/// Result type for pgscribe operations
pub type ScribeResult<T> = Result<T, ScribeError>;
