//! Optional instrumentation (feature `metrics`).
//!
//! Recorders only write counters, snapshots only read them, exporters only
//! publish snapshots. Cache and registry code depend on the recorder traits;
//! nothing here influences behavior.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
