//! Catalog error types

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// Required input missing; reported as 400 with the message as `error`.
    #[error("{0}")]
    Validation(String),

    /// Request body could not be parsed.
    #[error("{0}")]
    MalformedInput(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::MalformedInput(_) | CatalogError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Body for this error.
    ///
    /// Validation errors carry their own message; every other failure is
    /// reported under the operation's `summary` with the raw cause in `details`.
    pub fn envelope(&self, summary: &str) -> ErrorResponse {
        match self {
            CatalogError::Validation(msg) => ErrorResponse {
                error: msg.clone(),
                details: None,
            },
            other => ErrorResponse {
                error: summary.to_string(),
                details: Some(other.to_string()),
            },
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::MalformedInput(err.to_string())
    }
}

/// `{"error": ..., "details": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
