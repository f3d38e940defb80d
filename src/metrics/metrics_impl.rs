use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{
    CoreMetricsRecorder, EmitterMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder,
    MetricsReset,
};

/// Counters owned by an [`LruCache`](crate::policy::lru::LruCache).
///
/// Plain `u64`s are written through `&mut self`; [`MetricsCell`]s are written
/// from read-only paths.
#[derive(Debug, Default)]
pub struct LruMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub clear_calls: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
    pub peek_lru_calls: MetricsCell,
    pub peek_lru_found: MetricsCell,
    pub recency_rank_calls: MetricsCell,
    pub recency_rank_found: MetricsCell,
    pub recency_rank_scan_steps: MetricsCell,
}

impl CoreMetricsRecorder for LruMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl LruMetricsRecorder for LruMetrics {
    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }
}

impl LruMetricsReadRecorder for LruMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_found(&self) {
        self.peek_found.incr();
    }

    fn record_peek_lru_call(&self) {
        self.peek_lru_calls.incr();
    }

    fn record_peek_lru_found(&self) {
        self.peek_lru_found.incr();
    }

    fn record_recency_rank_call(&self) {
        self.recency_rank_calls.incr();
    }

    fn record_recency_rank_found(&self) {
        self.recency_rank_found.incr();
    }

    fn record_recency_rank_scan_step(&self) {
        self.recency_rank_scan_steps.incr();
    }
}

/// Counters owned by an [`EventEmitter`](crate::events::EventEmitter).
#[derive(Debug, Default)]
pub struct EmitterMetrics {
    pub emit_calls: MetricsCell,
    pub emits_without_listeners: MetricsCell,
    pub listener_invocations: MetricsCell,
    pub listener_errors: MetricsCell,
    pub once_retired: MetricsCell,
    pub off_calls: MetricsCell,
    pub off_found: MetricsCell,
}

impl EmitterMetricsRecorder for EmitterMetrics {
    fn record_emit_call(&self) {
        self.emit_calls.incr();
    }

    fn record_emit_without_listeners(&self) {
        self.emits_without_listeners.incr();
    }

    fn record_listener_invoked(&self) {
        self.listener_invocations.incr();
    }

    fn record_listener_error(&self) {
        self.listener_errors.incr();
    }

    fn record_once_retired(&self) {
        self.once_retired.incr();
    }

    fn record_off_call(&self) {
        self.off_calls.incr();
    }

    fn record_off_found(&self) {
        self.off_found.incr();
    }
}

impl MetricsReset for EmitterMetrics {
    fn reset_metrics(&self) {
        for cell in [
            &self.emit_calls,
            &self.emits_without_listeners,
            &self.listener_invocations,
            &self.listener_errors,
            &self.once_retired,
            &self.off_calls,
            &self.off_found,
        ] {
            cell.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lru_get_counters_split_hits_and_misses() {
        let mut metrics = LruMetrics::default();
        metrics.record_get_hit();
        metrics.record_get_hit();
        metrics.record_get_miss();

        assert_eq!(metrics.get_calls, 3);
        assert_eq!(metrics.get_hits, 2);
        assert_eq!(metrics.get_misses, 1);
    }

    #[test]
    fn lru_read_counters_work_through_shared_ref() {
        let metrics = LruMetrics::default();
        let shared = &metrics;
        shared.record_peek_lru_call();
        shared.record_recency_rank_scan_step();
        shared.record_recency_rank_scan_step();

        assert_eq!(metrics.peek_lru_calls.get(), 1);
        assert_eq!(metrics.recency_rank_scan_steps.get(), 2);
    }

    #[test]
    fn emitter_reset_zeroes_everything() {
        let metrics = EmitterMetrics::default();
        metrics.record_emit_call();
        metrics.record_listener_invoked();
        metrics.record_off_found();
        metrics.reset_metrics();

        assert_eq!(metrics.emit_calls.get(), 0);
        assert_eq!(metrics.listener_invocations.get(), 0);
        assert_eq!(metrics.off_found.get(), 0);
    }
}
