#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use axum::http::StatusCode;
use common::{memory_state, router, send};

#[tokio::test]
async fn gauge_update_then_read() {
    let state = memory_state();
    let app = router(&state);

    let (status, body) = send(&app, "POST", "/update/gauge/Latency/10.5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Gauge Latency updated to 10.500000"), "body={body}");

    let (status, body) = send(&app, "GET", "/value/gauge/Latency", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "10.500000");
}

#[tokio::test]
async fn counter_accumulates_across_requests() {
    let app = router(&memory_state());

    let (status, _) = send(&app, "POST", "/update/counter/Requests/5", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, "POST", "/update/counter/Requests/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("new value: 10"), "body={body}");

    let (_, body) = send(&app, "GET", "/value/counter/Requests", None).await;
    assert_eq!(body, "10");
}

#[tokio::test]
async fn negative_counter_delta_is_accepted() {
    let app = router(&memory_state());
    send(&app, "POST", "/update/counter/c/5", None).await;
    let (status, body) = send(&app, "POST", "/update/counter/c/-7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("new value: -2"), "body={body}");
}

#[tokio::test]
async fn bad_value_and_kind() {
    let app = router(&memory_state());

    let (status, body) = send(&app, "POST", "/update/gauge/Latency/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("invalid value"));

    let (status, _) = send(&app, "POST", "/update/counter/Requests/1.5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "POST", "/update/histogram/x/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("invalid metric kind"));
}

#[tokio::test]
async fn non_finite_gauge_is_rejected() {
    let state = memory_state();
    let app = router(&state);

    for raw in ["NaN", "inf", "-inf"] {
        let (status, body) = send(&app, "POST", &format!("/update/gauge/Bad/{raw}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{raw}");
        assert!(body.contains("invalid value"), "{raw}: {body}");
    }

    let (status, _) = send(&app, "GET", "/value/gauge/Bad", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_name_is_not_found() {
    let app = router(&memory_state());
    let (status, body) = send(&app, "POST", "/update/gauge/10.5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("invalid request format"));
}

#[tokio::test]
async fn read_misses_are_not_found() {
    let app = router(&memory_state());

    let (status, body) = send(&app, "GET", "/value/gauge/nothing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("not found"));

    let (status, _) = send(&app, "GET", "/value/histogram/nothing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dump_returns_both_tables() {
    let app = router(&memory_state());
    send(&app, "POST", "/update/gauge/g/1.5", None).await;
    send(&app, "POST", "/update/counter/c/3", None).await;

    let (status, body) = send(&app, "POST", "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["gauges"]["g"], 1.5);
    assert_eq!(v["counters"]["c"], 3);
}

#[tokio::test]
async fn dashboard_lists_metrics() {
    let app = router(&memory_state());
    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No metrics available"));

    send(&app, "POST", "/update/gauge/Alloc/42", None).await;
    let (_, body) = send(&app, "GET", "/", None).await;
    assert!(body.contains("Alloc:"));
    assert!(body.contains("42.00"));
}
