pub use crate::ds::{IntrusiveList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::events::{EventEmitter, Listener, ListenerError, ListenerHandle};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{EmitterMetricsSnapshot, LruMetricsSnapshot};
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentLruCache;
pub use crate::policy::lru::LruCache;
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};
