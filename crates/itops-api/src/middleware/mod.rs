//! # Middleware Stack
//!
//! - [`metrics`]: Prometheus request metrics.
//!
//! Request tracing and CORS come straight from `tower_http` and are wired
//! in [`crate::app`].

pub mod metrics;
