//! lrukit: a fixed-capacity LRU cache and a synchronous event emitter.
//!
//! - [`policy::lru::LruCache`]: O(1) `get`/`put` with least-recently-used
//!   eviction, built on [`ds::IntrusiveList`] and an `FxHashMap` index.
//! - [`events::EventEmitter`]: named events dispatched to ordered listeners,
//!   with one-shot registrations and identity-based removal.
//!
//! Optional features:
//!
//! | Feature       | Adds                                                  |
//! |---------------|-------------------------------------------------------|
//! | `metrics`     | counters, snapshots and a Prometheus text exporter    |
//! | `concurrency` | [`policy::lru::ConcurrentLruCache`] (`parking_lot`)   |
//! | `dhat-heap`   | the `dhat_profile` heap-profiling binary              |

pub mod ds;
pub mod error;
pub mod events;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
