//! Request logging.
//!
//! One `info` event per request carrying method, uri, status, response size
//! (when the body length is known up front) and elapsed time.

use std::time::Instant;

use axum::{
    body::HttpBody,
    extract::Request,
    middleware::Next,
    response::Response,
};

pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();

    let resp = next.run(req).await;

    let size = resp.body().size_hint().exact();
    tracing::info!(
        %method,
        %uri,
        status = resp.status().as_u16(),
        size = ?size,
        elapsed_us = started.elapsed().as_micros() as u64,
        "request processed"
    );
    resp
}
