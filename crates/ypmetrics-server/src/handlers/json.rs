//! Structured JSON-body surface.
//!
//! - `POST /update/`: body is a `Metric`; responds with the stored state
//! - `POST /value/`: body is `{id, type}`

use axum::{body::Bytes, extract::State, Json};
use ypmetrics_core::Metric;

use super::ApiError;
use crate::app_state::AppState;

fn decode(body: &[u8]) -> Result<Metric, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::bad_request(e.to_string()))
}

pub async fn update(State(app): State<AppState>, body: Bytes) -> Result<Json<Metric>, ApiError> {
    let update = decode(&body)?.into_update()?;
    let kind = update.value.kind();

    app.store().apply(&update.id, update.value);
    app.after_write().await;

    // Report what the store holds now, not what the client sent.
    let stored = app.store().get(kind, &update.id).ok_or_else(|| {
        tracing::error!(id = %update.id, %kind, "metric missing right after write");
        ApiError::internal("could not retrieve updated metric")
    })?;

    Ok(Json(Metric::from_value(update.id, stored)))
}

pub async fn value(State(app): State<AppState>, body: Bytes) -> Result<Json<Metric>, ApiError> {
    let query = decode(&body)?;
    let found = query
        .kind()
        .ok()
        .and_then(|kind| app.store().get(kind, &query.id))
        .ok_or_else(|| ApiError::not_found("metric not found"))?;

    Ok(Json(Metric::from_value(query.id, found)))
}
