//! # Cache Traits
//!
//! Small trait hierarchy that lets generic code (benches, the profiling
//! binary, property tests) drive any recency cache without naming the
//! concrete type.
//!
//! ```text
//!   ┌──────────────────────────────────┐
//!   │          CoreCache<K, V>         │
//!   │  insert / get / contains / len   │
//!   │  is_empty / capacity / clear     │
//!   └────────────────┬─────────────────┘
//!                    ▼
//!   ┌──────────────────────────────────┐
//!   │        MutableCache<K, V>        │
//!   │  remove / remove_batch           │
//!   └────────────────┬─────────────────┘
//!                    ▼
//!   ┌──────────────────────────────────┐
//!   │       LruCacheTrait<K, V>        │
//!   │  pop_lru / peek_lru / touch      │
//!   │  recency_rank                    │
//!   └──────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! Implementations in this crate are single-threaded. Thread-safe wrappers
//! (see `ConcurrentLruCache` behind the `concurrency` feature) carry the
//! [`ConcurrentCache`] marker.

/// Operations every cache supports.
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::CoreCache;
///
/// fn warm<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, &str)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.to_string());
///     }
/// }
///
/// let mut cache = LruCache::new(8);
/// warm(&mut cache, &[(1, "one"), (2, "two")]);
/// assert_eq!(CoreCache::len(&cache), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or updates `key`, returning the value it replaced.
    ///
    /// A new key inserted into a full cache evicts according to the policy.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Looks up `key`. May update the policy's bookkeeping (recency, frequency).
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks for `key` without touching eviction state.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;

    fn clear(&mut self);
}

/// Caches that allow removing an arbitrary key.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes every key in `keys`, returning results in input order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// Recency-ordered caches.
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::{CoreCache, LruCacheTrait};
///
/// let mut cache = LruCache::new(3);
/// cache.insert(1, "a");
/// cache.insert(2, "b");
/// cache.insert(3, "c");
/// CoreCache::get(&mut cache, &1);
///
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
/// assert!(cache.touch(&2));
/// assert_eq!(cache.pop_lru(), Some((3, "c")));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without changing the order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Promotes `key` to most recently used. Returns `false` on a miss.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order (0 = most recently used).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Marker for cache types that are safe to share across threads.
pub trait ConcurrentCache: Send + Sync {}
