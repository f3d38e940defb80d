use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::{EmitterMetricsSnapshot, LruMetricsSnapshot};
use crate::metrics::traits::MetricsExporter;

/// Writes snapshots in the Prometheus text exposition format.
///
/// ```
/// use lrukit::metrics::exporter::PrometheusTextExporter;
/// use lrukit::metrics::traits::MetricsExporter;
/// use lrukit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(2);
/// cache.put(1, 1);
/// cache.get(&1);
///
/// let exporter = PrometheusTextExporter::new("lru", Vec::new());
/// exporter.export(&cache.metrics_snapshot());
/// let text = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(text.contains("lru_get_hits_total 1"));
/// ```
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Write errors are dropped.
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn write_gauge(&self, suffix: &str, value: usize) {
        self.write_metric("gauge", suffix, value as u64);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<LruMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &LruMetricsSnapshot) {
        self.write_counter("get_calls_total", snapshot.get_calls);
        self.write_counter("get_hits_total", snapshot.get_hits);
        self.write_counter("get_misses_total", snapshot.get_misses);
        self.write_counter("insert_calls_total", snapshot.insert_calls);
        self.write_counter("insert_updates_total", snapshot.insert_updates);
        self.write_counter("insert_new_total", snapshot.insert_new);
        self.write_counter("evict_calls_total", snapshot.evict_calls);
        self.write_counter("evicted_entries_total", snapshot.evicted_entries);
        self.write_counter("peek_calls_total", snapshot.peek_calls);
        self.write_counter("pop_lru_calls_total", snapshot.pop_lru_calls);
        self.write_counter("pop_lru_found_total", snapshot.pop_lru_found);
        self.write_counter("touch_calls_total", snapshot.touch_calls);
        self.write_counter("touch_found_total", snapshot.touch_found);
        self.write_counter(
            "recency_rank_scan_steps_total",
            snapshot.recency_rank_scan_steps,
        );
        self.write_gauge("cache_len", snapshot.cache_len);
        self.write_gauge("capacity", snapshot.capacity);
    }
}

impl<W: Write + Send> MetricsExporter<EmitterMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &EmitterMetricsSnapshot) {
        self.write_counter("emit_calls_total", snapshot.emit_calls);
        self.write_counter(
            "emits_without_listeners_total",
            snapshot.emits_without_listeners,
        );
        self.write_counter("listener_invocations_total", snapshot.listener_invocations);
        self.write_counter("listener_errors_total", snapshot.listener_errors);
        self.write_counter("once_retired_total", snapshot.once_retired);
        self.write_counter("off_calls_total", snapshot.off_calls);
        self.write_counter("off_found_total", snapshot.off_found);
        self.write_gauge("event_count", snapshot.event_count);
        self.write_gauge("registration_count", snapshot.registration_count);
    }
}
