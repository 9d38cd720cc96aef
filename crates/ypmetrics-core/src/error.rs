//! Shared error type across ypmetrics crates.

use thiserror::Error;

use crate::model::MetricKind;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Malformed input or invalid metric data.
    BadRequest,
    /// Lookup miss.
    NotFound,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by the store, persistence, and both binaries.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Malformed numeric, text, or JSON input.
    #[error("parse error: {0}")]
    Parse(String),
    #[error("metric '{name}' of type '{kind}' not found")]
    NotFound { kind: MetricKind, name: String },
    #[error("invalid metric kind: {0}")]
    InvalidKind(String),
    /// Well-formed document that does not describe a usable metric.
    #[error("{0}")]
    InvalidData(String),
    #[error("io: {0}")]
    Io(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MetricsError::Parse(_) => ClientCode::BadRequest,
            MetricsError::NotFound { .. } => ClientCode::NotFound,
            MetricsError::InvalidKind(_) => ClientCode::BadRequest,
            MetricsError::InvalidData(_) => ClientCode::BadRequest,
            MetricsError::Io(_) => ClientCode::Internal,
            MetricsError::Internal(_) => ClientCode::Internal,
        }
    }

    pub fn not_found(kind: MetricKind, name: impl Into<String>) -> Self {
        MetricsError::NotFound {
            kind,
            name: name.into(),
        }
    }
}
