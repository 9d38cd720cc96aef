//! Legacy path-encoded surface.
//!
//! - `POST /update/{kind}/{name}/{value}`
//! - `GET /value/{kind}/{name}`
//! - `POST /metrics`

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use ypmetrics_core::{MetricKind, MetricValue};

use super::ApiError;
use crate::app_state::AppState;

pub async fn update(
    State(app): State<AppState>,
    Path((kind, name, raw)): Path<(String, String, String)>,
) -> Result<String, ApiError> {
    if name.is_empty() {
        return Err(ApiError::not_found("invalid request format"));
    }
    let kind: MetricKind = kind
        .parse()
        .map_err(|_| ApiError::bad_request("invalid metric kind"))?;
    let value = MetricValue::parse(kind, &raw).map_err(|e| {
        tracing::debug!(error = %e, "rejecting path update");
        ApiError::bad_request("invalid value")
    })?;

    let applied = app.store().apply(&name, value);
    app.after_write().await;

    Ok(match (value, applied) {
        (MetricValue::Counter(delta), MetricValue::Counter(total)) => {
            format!("Counter {name} incremented by {delta}, new value: {total}")
        }
        (_, applied) => format!("Gauge {name} updated to {applied}"),
    })
}

/// `POST /update/{kind}/{value}`: the name segment is missing.
pub async fn missing_name() -> ApiError {
    ApiError::not_found("invalid request format")
}

pub async fn value(
    State(app): State<AppState>,
    Path((kind, name)): Path<(String, String)>,
) -> Result<String, ApiError> {
    app.store()
        .lookup(&kind, &name)
        .map(|v| v.to_string())
        .map_err(|e| ApiError::not_found(e.to_string()))
}

pub async fn dump(State(app): State<AppState>) -> Response {
    match serde_json::to_string_pretty(&app.store().dump_all()) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "serialize metrics failed");
            ApiError::internal("failed to serialize metrics").into_response()
        }
    }
}
