//! Shared helpers for router tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use ypmetrics_core::{FileStorage, MetricStore};
use ypmetrics_server::app_state::AppState;
use ypmetrics_server::config::SaveMode;
use ypmetrics_server::router::build_router;

pub fn memory_state() -> AppState {
    AppState::with_parts(Arc::new(MetricStore::new()), None, SaveMode::Disabled)
}

pub fn file_state(storage: FileStorage, mode: SaveMode) -> AppState {
    AppState::with_parts(Arc::new(MetricStore::new()), Some(Arc::new(storage)), mode)
}

pub fn router(state: &AppState) -> Router {
    build_router(state.clone())
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, String) {
    let mut req = Request::builder().method(method).uri(uri);
    if body.is_some() {
        req = req.header("content-type", "application/json");
    }
    let req = req
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
