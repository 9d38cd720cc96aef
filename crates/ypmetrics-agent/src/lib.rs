//! ypmetrics agent library entry.
//!
//! Samples runtime statistics into a local buffer and reports the buffer to
//! the collector on a separate interval. Used by the binary and by
//! integration tests.

pub mod agent;
pub mod buffer;
pub mod config;
pub mod runtime_stats;
pub mod sink;

pub use agent::{Agent, ReportSummary};
pub use sink::{HttpSink, MetricSink, ReportError};
