//! Axum router wiring.
//!
//! Both ingestion surfaces share one `AppState`. Route shapes:
//! - `POST /update/`, `POST /value/`: JSON body
//! - `POST /update/{kind}/{name}/{value}`, `GET /value/{kind}/{name}`: path-encoded
//! - `POST /metrics`: JSON dump
//! - `GET /`: HTML dashboard

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, handlers, obs};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard::index))
        .route("/update/", post(handlers::json::update))
        .route("/value/", post(handlers::json::value))
        .route("/update/:kind/:name/:value", post(handlers::path::update))
        // Two segments only: the name is missing.
        .route("/update/:kind/:name", post(handlers::path::missing_name))
        .route("/value/:kind/:name", get(handlers::path::value))
        .route("/metrics", post(handlers::path::dump))
        .layer(middleware::from_fn(obs::log_requests))
        .with_state(state)
}
