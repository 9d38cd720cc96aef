//! ypmetrics core: the metric model, the in-memory store, and snapshot
//! persistence shared by the collector and the agent.
//!
//! This crate carries no HTTP or async runtime dependencies. The collector
//! wires it behind its two ingestion surfaces; the agent uses the wire model
//! and the address helpers.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed input and I/O failures surface as `MetricsError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod net;
pub mod persist;
pub mod store;

/// Shared result type.
pub use error::{Result, MetricsError};
pub use model::{Metric, MetricKind, MetricValue};
pub use persist::FileStorage;
pub use store::{MetricStore, Snapshot};
