//! Observability: structured logging and Prometheus metrics.
//!
//! - Logging through `tracing` with pretty, compact or JSON output
//! - Prometheus counters for cleanup runs and alert checks (`prometheus` feature)

pub mod metrics;
mod tracing_init;

pub use tracing_init::*;
