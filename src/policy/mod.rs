//! Cache replacement policies.

pub mod lru;
