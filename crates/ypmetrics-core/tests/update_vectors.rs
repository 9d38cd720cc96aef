//! Structured update validation vectors.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use ypmetrics_core::model::{Metric, MetricUpdate, MetricValue};
use ypmetrics_core::{MetricsError, Result};

mod vector_loader;
use vector_loader::TestVector;

fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

fn decode_update(body: &str) -> Result<MetricUpdate> {
    let m: Metric = serde_json::from_str(body).map_err(|e| MetricsError::Parse(e.to_string()))?;
    m.into_update()
}

#[test]
fn update_vectors() {
    let files = [
        "update_counter_ok.json",
        "update_gauge_ok.json",
        "update_gauge_missing_value.json",
        "update_counter_missing_delta.json",
        "update_unknown_type.json",
        "update_empty_id.json",
        "update_malformed_body.json",
        "update_value_wrong_type.json",
    ];

    for f in files {
        let v = load(f);
        let res = decode_update(&v.body.decode());

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.client_code().as_str(), err.code, "vector={}", v.description);
            if let Some(msg) = err.message {
                assert_eq!(e.to_string(), msg, "vector={}", v.description);
            }
            continue;
        }

        let up = res.expect("expected ok update");
        let ex = v.expect.expect("missing expect block");

        assert_eq!(up.id, ex["id"].as_str().unwrap(), "vector={}", v.description);
        assert_eq!(up.value.kind().as_str(), ex["kind"].as_str().unwrap(), "vector={}", v.description);
        match up.value {
            MetricValue::Gauge(g) => {
                assert_eq!(g, ex["value"].as_f64().unwrap(), "vector={}", v.description)
            }
            MetricValue::Counter(d) => {
                assert_eq!(d, ex["delta"].as_i64().unwrap(), "vector={}", v.description)
            }
        }
    }
}

#[test]
fn read_request_needs_only_id_and_type() {
    let m: Metric = serde_json::from_str(r#"{"id":"humidity","type":"gauge"}"#).unwrap();
    assert_eq!(m.kind().unwrap().as_str(), "gauge");
    assert!(m.delta.is_none() && m.value.is_none());
}
