//! HTTP-shaped responses shared by every catalog operation.
//!
//! An [`ApiResponse`] is a status code, a header map and a JSON-encoded body.
//! It converts into an axum response for the development server and into a
//! `lambda_http` response for the serverless entry points.

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::{CatalogError, ErrorResponse};

/// Methods announced to browsers on preflight.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, OPTIONS";

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

#[derive(Serialize)]
struct MessageResponse<'a> {
    message: &'a str,
}

impl ApiResponse {
    /// Serialize `value` as the body.
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status,
                headers: cors_headers(),
                body,
            },
            Err(err) => {
                tracing::error!(error = %err, "Failed to serialize response body");
                Self::json(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        details: Some(err.to_string()),
                    },
                )
            }
        }
    }

    /// 200 with `{"message": ...}`.
    pub fn message(message: &str) -> Self {
        Self::json(StatusCode::OK, &MessageResponse { message })
    }

    /// Error envelope for `err`, using `summary` for non-validation failures.
    pub fn error(err: &CatalogError, summary: &str) -> Self {
        Self::json(err.status_code(), &err.envelope(summary))
    }

    /// Answer to a CORS preflight request.
    pub fn preflight() -> Self {
        let mut headers = cors_headers();
        headers.remove(header::CONTENT_TYPE);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        Self {
            status: StatusCode::OK,
            headers,
            body: String::new(),
        }
    }

    /// Parse the body back into JSON.
    #[cfg(test)]
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

/// Headers carried by every catalog response.
fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, self.headers, self.body).into_response()
    }
}
