//! # varsel-telemetry
//!
//! Observability glue for hosts embedding a varsel processor. The core
//! crate reports everything through its hook seam; this crate provides
//! ready-made hook sets that route that output into the wider ecosystem.
//!
//! ### Components:
//! - `logging`: subscriber setup plus [`logging::TracingHooks`], which
//!   forwards the processor's log hook into `tracing` at matching levels
//! - `metrics`: a prometheus [`metrics::MetricsRecorder`] and the
//!   [`metrics::MetricsHooks`] adapter that drives it

pub mod logging;
pub mod metrics;
