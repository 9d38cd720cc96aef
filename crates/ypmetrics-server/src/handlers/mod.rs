//! Ingestion surfaces.
//!
//! - `path`: legacy path-encoded updates and plain-text reads
//! - `json`: structured JSON-body updates and reads
//! - `dashboard`: HTML overview
//!
//! Both ingestion surfaces write through `MetricStore::apply`; neither carries
//! its own update logic.

pub mod dashboard;
pub mod json;
pub mod path;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ypmetrics_core::error::{ClientCode, MetricsError};

/// Per-request failure: a status plus a plain-text body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

pub fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::BadRequest => StatusCode::BAD_REQUEST,
        ClientCode::NotFound => StatusCode::NOT_FOUND,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<MetricsError> for ApiError {
    fn from(e: MetricsError) -> Self {
        Self::new(status_for(e.client_code()), e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}
