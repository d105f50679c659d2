//! # Response Formatting
//!
//! Response bodies for the catalog endpoints.

use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, GameRecord, PagedResult};

/// `/games` response: one page plus the total match count
#[derive(Debug, Clone, Serialize)]
pub struct GamesResponse {
    pub games: Vec<GameRecord>,
    /// Total matching rows across all pages
    pub length: i64,
}

impl From<PagedResult> for GamesResponse {
    fn from(result: PagedResult) -> Self {
        Self {
            games: result.items,
            length: result.total,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub status: u16,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
            timestamp: Utc::now(),
        }
    }
}

impl From<&CatalogError> for ErrorResponse {
    fn from(err: &CatalogError) -> Self {
        Self::new(err.public_message(), err.status_code().as_u16())
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
