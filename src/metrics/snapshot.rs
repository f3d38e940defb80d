/// Point-in-time copy of an [`LruCache`](crate::policy::lru::LruCache)'s counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,

    pub peek_calls: u64,
    pub peek_found: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub peek_lru_calls: u64,
    pub peek_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub recency_rank_calls: u64,
    pub recency_rank_found: u64,
    pub recency_rank_scan_steps: u64,

    pub clear_calls: u64,

    pub cache_len: usize,
    pub capacity: usize,
}

impl LruMetricsSnapshot {
    /// Fraction of `get` calls that hit, or `0.0` before the first `get`.
    pub fn hit_ratio(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

/// Point-in-time copy of an [`EventEmitter`](crate::events::EventEmitter)'s counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EmitterMetricsSnapshot {
    pub emit_calls: u64,
    pub emits_without_listeners: u64,
    pub listener_invocations: u64,
    pub listener_errors: u64,
    pub once_retired: u64,
    pub off_calls: u64,
    pub off_found: u64,

    pub event_count: usize,
    pub registration_count: usize,
}
