//! Synchronous listener registry.
//!
//! - [`EventEmitter`]: event name to ordered listeners, with one-shot
//!   registrations and re-entrant dispatch.
//! - [`ListenerHandle`]: identity-compared listener reference used for both
//!   registration and removal.
//! - [`ListenerError`]: a listener failure, returned from `emit`.

pub mod emitter;
pub mod listener;

pub use emitter::EventEmitter;
pub use listener::{FnListener, Listener, ListenerError, ListenerHandle, TryFnListener};
