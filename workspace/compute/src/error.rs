use std::time::Duration;

use thiserror::Error;
use tracing::error;

/// Failure of a single data store call.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The query did not finish within the configured bound
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),
}

/// Error types returned by the aggregation core.
///
/// A per-retailer failure inside the roster is not an error at this level: it is
/// absorbed into [`common::AggregationStatus::Unavailable`] on the affected entry.
#[derive(Error, Debug)]
pub enum PortalError {
    /// The underlying query failed or timed out. Retryable.
    #[error("Data unavailable for {entity}")]
    DataUnavailable {
        entity: String,
        #[source]
        source: StoreError,
    },

    /// Ownership-filtered lookup matched nothing. Missing and not-owned are the same answer.
    #[error("{entity} not found")]
    NotFoundOrUnauthorized { entity: String },

    /// Malformed input, rejected before any query is issued
    #[error("Validation error: {0}")]
    Validation(String),
}

impl PortalError {
    pub fn unavailable(entity: impl Into<String>, source: StoreError) -> Self {
        let err = PortalError::DataUnavailable {
            entity: entity.into(),
            source,
        };
        error!(?err, "Data store call failed");
        err
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        PortalError::NotFoundOrUnauthorized {
            entity: entity.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PortalError::Validation(message.into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, PortalError::DataUnavailable { .. })
    }
}

/// Attaches the failing entity to a store error.
pub trait StoreResultExt<T> {
    fn or_unavailable<F>(self, entity: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> StoreResultExt<T> for std::result::Result<T, StoreError> {
    fn or_unavailable<F>(self, entity: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|source| PortalError::unavailable(entity(), source))
    }
}

/// Rejects identifiers that cannot name a row.
pub fn ensure_id(kind: &str, id: i32) -> Result<()> {
    if id <= 0 {
        return Err(PortalError::validation(format!("{} id must be positive, got {}", kind, id)));
    }
    Ok(())
}

/// Type alias for Result with PortalError
pub type Result<T> = std::result::Result<T, PortalError>;
