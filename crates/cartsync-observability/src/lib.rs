//! # cartsync-observability
//!
//! Structured tracing setup, per-operation log events for the reconciliation
//! layer, and counters aggregated across passes.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::ReconcileMetrics;
pub use tracing_setup::events;
