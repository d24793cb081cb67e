//! Typed error handling for the listing engine
//!
//! # Error Categories
//!
//! - [`QueryError`]: everything a listing or aggregation call can fail with
//! - [`StorageError`]: failures raised by a store backend, carried through
//!   [`QueryError::Storage`] unchanged
//!
//! Parsing anomalies (unknown sort/filter fields, blank search text) are not
//! errors under the default policy; they are resolved where they are parsed.
//!
//! # Example
//!
//! ```rust,ignore
//! match repository.find_all(&request).await {
//!     Ok(certificates) => render(certificates),
//!     Err(QueryError::InvalidPagination { page, size, .. }) => bad_request(page, size),
//!     Err(QueryError::Storage(e)) => internal(e),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Which aggregation stage came back empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationStage {
    /// Tags of the top spender's certificates
    TagFrequency,
    /// Resolving the winning tag id to a tag row
    TagLookup,
}

impl std::fmt::Display for AggregationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregationStage::TagFrequency => write!(f, "tag frequency"),
            AggregationStage::TagLookup => write!(f, "tag lookup"),
        }
    }
}

/// Errors returned by listing and aggregation calls
#[derive(Debug, Error)]
pub enum QueryError {
    /// Negative page, non-positive size, unparseable input or offset overflow
    #[error("Invalid pagination (page: {page}, size: {size}): {message}")]
    InvalidPagination {
        page: String,
        size: String,
        message: String,
    },

    /// Unknown sort or filter field; only raised under the reject policy
    #[error("Unknown field '{field}' for {entity_type}")]
    InvalidField { entity_type: String, field: String },

    /// An aggregation stage produced no group where one was expected
    #[error("Aggregation stage '{stage}' found nothing: {message}")]
    AggregationNotFound {
        stage: AggregationStage,
        message: String,
    },

    /// Failure from the underlying store, propagated as-is
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl QueryError {
    pub(crate) fn invalid_pagination(
        page: impl ToString,
        size: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        QueryError::InvalidPagination {
            page: page.to_string(),
            size: size.to_string(),
            message: message.into(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            QueryError::InvalidPagination { .. } => "INVALID_PAGINATION",
            QueryError::InvalidField { .. } => "INVALID_FIELD",
            QueryError::AggregationNotFound { .. } => "AGGREGATION_NOT_FOUND",
            QueryError::Storage(e) => e.error_code(),
        }
    }
}

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Query execution error
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// Backend not available
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },

    /// A reader or writer panicked while holding the store lock
    #[error("Lock on '{resource}' is poisoned")]
    LockPoisoned { resource: String },
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::QueryError { .. } => "STORAGE_QUERY_ERROR",
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
            StorageError::LockPoisoned { .. } => "STORAGE_LOCK_POISONED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pagination_display() {
        let err = QueryError::invalid_pagination(-1, 5, "page must not be negative");
        assert_eq!(
            err.to_string(),
            "Invalid pagination (page: -1, size: 5): page must not be negative"
        );
        assert_eq!(err.error_code(), "INVALID_PAGINATION");
    }

    #[test]
    fn test_storage_error_is_transparent() {
        let err: QueryError = StorageError::Unavailable {
            backend: "memory".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Storage backend 'memory' is unavailable");
        assert_eq!(err.error_code(), "STORAGE_UNAVAILABLE");
        assert!(matches!(err, QueryError::Storage(StorageError::Unavailable { .. })));
    }

    #[test]
    fn test_aggregation_not_found_display() {
        let err = QueryError::AggregationNotFound {
            stage: AggregationStage::TagFrequency,
            message: "user 4 has no tagged certificates".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Aggregation stage 'tag frequency' found nothing: user 4 has no tagged certificates"
        );
        assert_eq!(err.error_code(), "AGGREGATION_NOT_FOUND");
    }

    #[test]
    fn test_storage_error_codes() {
        let cases = [
            (
                StorageError::QueryError {
                    backend: "memory".into(),
                    message: "timeout".into(),
                },
                "STORAGE_QUERY_ERROR",
            ),
            (
                StorageError::LockPoisoned {
                    resource: "orders".into(),
                },
                "STORAGE_LOCK_POISONED",
            ),
        ];
        for (err, code) in cases {
            assert_eq!(err.error_code(), code);
        }
    }
}
