//! ypmetrics collector library entry.
//!
//! Wires the metric store, the snapshot file, and both ingestion surfaces into
//! an axum service. Consumed by the binary (`main.rs`) and by integration
//! tests.

pub mod app_state;
pub mod config;
pub mod handlers;
pub mod obs;
pub mod persistence;
pub mod router;
pub mod server;
