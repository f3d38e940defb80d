//! Error types shared across the crate.
//!
//! - [`ConfigError`]: a constructor was handed parameters it cannot honor
//!   (e.g. a zero-capacity cache).
//! - [`InvariantError`]: an internal consistency check failed. Produced by
//!   `check_invariants` methods; seeing one outside of tests is a bug.
//!
//! Listener failures have their own type, [`ListenerError`](crate::events::ListenerError),
//! because they originate in user code rather than in the crate.
//!
//! ```
//! use lrukit::error::ConfigError;
//! use lrukit::policy::lru::LruCache;
//!
//! let err = LruCache::<u32, u32>::try_new(0).unwrap_err();
//! assert_eq!(err, ConfigError::zero_capacity());
//! assert!(err.to_string().contains("capacity"));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Invalid construction parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// The error every fixed-capacity structure reports for `capacity == 0`.
    pub fn zero_capacity() -> Self {
        Self::new("cache capacity must be greater than zero")
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Description of a violated internal invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invariant violated: {}", self.0)
    }
}

impl std::error::Error for InvariantError {}
