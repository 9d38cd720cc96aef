//! `GET /`: HTML overview of every stored metric.

use std::fmt::Write;

use axum::{extract::State, response::Html};
use ypmetrics_core::Snapshot;

use crate::app_state::AppState;

const HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Metrics Dashboard</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 20px; line-height: 1.6; }
        h1 { color: #333; }
        .metric-section { margin-bottom: 30px; border: 1px solid #ddd; padding: 15px; border-radius: 5px; }
        .metric-item { display: flex; justify-content: space-between; padding: 5px 0; border-bottom: 1px solid #eee; }
        .metric-name { font-weight: bold; }
        .metric-value { font-family: monospace; }
    </style>
</head>
<body>
    <h1>Metrics Dashboard</h1>
"#;

pub async fn index(State(app): State<AppState>) -> Html<String> {
    Html(render(&app.store().dump_all()))
}

pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::from(HEAD);

    if !snapshot.gauges.is_empty() {
        section(
            &mut out,
            "Gauge Metrics",
            snapshot.gauges.iter().map(|(k, v)| (k, format!("{v:.2}"))),
        );
    }
    if !snapshot.counters.is_empty() {
        section(
            &mut out,
            "Counter Metrics",
            snapshot.counters.iter().map(|(k, v)| (k, v.to_string())),
        );
    }
    if snapshot.is_empty() {
        out.push_str("    <p>No metrics available</p>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn section<'a>(out: &mut String, title: &str, rows: impl Iterator<Item = (&'a String, String)>) {
    let _ = writeln!(out, "    <div class=\"metric-section\">\n        <h2>{title}</h2>");
    for (name, value) in rows {
        let _ = writeln!(
            out,
            "        <div class=\"metric-item\"><span class=\"metric-name\">{}:</span><span class=\"metric-value\">{}</span></div>",
            escape_html(name),
            value
        );
    }
    out.push_str("    </div>\n");
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
