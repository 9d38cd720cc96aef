//! Top-level facade crate for ypmetrics.
//!
//! Re-exports the core model, the collector, and the agent so users can depend
//! on a single crate.

pub mod core {
    pub use ypmetrics_core::*;
}

pub mod server {
    pub use ypmetrics_server::*;
}

pub mod agent {
    pub use ypmetrics_agent::*;
}
