//! Error types for the persistence layer.
//!
//! All fallible operations return [`StorageResult`], whose error type is the
//! [`StorageError`] umbrella. Driver errors are converted via `From` impls and
//! surface as [`BackendError`] variants; they are never caught or retried here.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Record state errors
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors related to record state.
#[derive(Error, Debug)]
pub enum RecordError {
    /// The requested record was not found.
    #[error("record not found: {kind}/{id}")]
    NotFound { kind: &'static str, id: i64 },

    /// A record that must be saved first was passed without an id.
    #[error("unsaved record: {kind} has no id")]
    Unsaved { kind: &'static str },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Connection pool exhausted.
    #[error("connection pool exhausted for {backend_name}")]
    PoolExhausted { backend_name: String },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// Implement conversions from driver error types

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Backend(BackendError::Internal {
            backend_name: "sqlite".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}

#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(_err: r2d2::Error) -> Self {
        StorageError::Backend(BackendError::PoolExhausted {
            backend_name: "sqlite".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_display() {
        let err = StorageError::Record(RecordError::NotFound {
            kind: "provider_role",
            id: 12,
        });
        assert_eq!(err.to_string(), "record not found: provider_role/12");
    }

    #[test]
    fn test_unsaved_error_display() {
        let err = RecordError::Unsaved { kind: "provider" };
        assert_eq!(err.to_string(), "unsaved record: provider has no id");
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::ConnectionFailed {
            backend_name: "sqlite".to_string(),
            message: "timed out".to_string(),
        };
        assert_eq!(err.to_string(), "connection failed to sqlite: timed out");

        let err = BackendError::PoolExhausted {
            backend_name: "sqlite".to_string(),
        };
        assert!(err.to_string().contains("pool exhausted"));
    }

    #[test]
    fn test_storage_error_from_backend() {
        let err = BackendError::QueryError {
            message: "bad sql".to_string(),
        };
        let storage_err: StorageError = err.into();
        assert!(matches!(storage_err, StorageError::Backend(_)));
    }
}
