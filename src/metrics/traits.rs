//! # Metrics Traits
//!
//! ```text
//!   ┌─────────────────────────┐        ┌─────────────────────────┐
//!   │   CoreMetricsRecorder   │        │  EmitterMetricsRecorder │
//!   │ get hit/miss, insert,   │        │ emit, invoke, error,    │
//!   │ evict, clear            │        │ once retire, off        │
//!   └───────────┬─────────────┘        └─────────────────────────┘
//!               ▼
//!   ┌─────────────────────────┐   ┌─────────────────────────┐
//!   │   LruMetricsRecorder    │   │ LruMetricsReadRecorder  │
//!   │ pop_lru, touch          │   │ peek_lru, recency_rank  │
//!   └─────────────────────────┘   └─────────────────────────┘
//!
//!   MetricsSnapshotProvider<S>   (tests, benches)
//!   MetricsExporter<S>           (monitoring backends)
//! ```

/// Counters shared by every cache.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// LRU counters recorded from `&mut self` methods.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// LRU counters recorded from `&self` methods.
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Listener registry counters. Every registry method takes `&self`.
pub trait EmitterMetricsRecorder {
    fn record_emit_call(&self);
    fn record_emit_without_listeners(&self);
    fn record_listener_invoked(&self);
    fn record_listener_error(&self);
    fn record_once_retired(&self);
    fn record_off_call(&self);
    fn record_off_found(&self);
}

/// Produces a point-in-time copy of the counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Zeroes all counters.
pub trait MetricsReset {
    fn reset_metrics(&self);
}

/// Publishes a snapshot to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
