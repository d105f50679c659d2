//! # Catalog Errors
//!
//! Error types for catalog queries and their HTTP mapping.

use axum::http::StatusCode;
use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Public message for every server-side failure
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Catalog errors
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// A query parameter failed validation
    #[error("Invalid parameter '{field}': {reason}")]
    InvalidParam { field: String, reason: String },

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Query execution failed in the store
    #[error("Store error: {0}")]
    Store(String),

    /// A returned row could not be decoded into a game record
    #[error("Decode error: {0}")]
    Decode(String),

    /// Fetch and count did not finish within the request deadline
    #[error("Query deadline of {0} ms exceeded")]
    DeadlineExceeded(u64),
}

impl CatalogError {
    pub fn invalid_param(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::InvalidParam {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::InvalidParam { .. } => StatusCode::BAD_REQUEST,
            CatalogError::Store(_)
            | CatalogError::Decode(_)
            | CatalogError::DeadlineExceeded(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the caller.
    ///
    /// Server-side details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            CatalogError::InvalidParam { .. } => self.to_string(),
            _ => SERVER_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                CatalogError::Decode(err.to_string())
            }
            other => CatalogError::Store(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CatalogError::invalid_param("sort", "bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::Store("connection refused".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            CatalogError::DeadlineExceeded(5000).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_details_are_hidden() {
        let err = CatalogError::Store("password authentication failed".to_string());
        assert_eq!(err.public_message(), SERVER_ERROR_MESSAGE);

        let err = CatalogError::invalid_param("perPage", "must be between 1 and 100");
        assert!(err.public_message().contains("perPage"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_sqlx_error_mapping() {
        let err = CatalogError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, CatalogError::Store(_)));
    }
}
