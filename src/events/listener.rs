//! Listener callbacks and the handles that identify them.
//!
//! A [`ListenerHandle`] is what gets registered with an
//! [`EventEmitter`](crate::events::EventEmitter). Two handles are the same
//! listener only if they were cloned from one another; two separately built
//! handles around identical closures are different listeners.
//!
//! ```
//! use lrukit::events::ListenerHandle;
//!
//! let a = ListenerHandle::<i32>::new(|_| {});
//! let b = a.clone();
//! let c = ListenerHandle::<i32>::new(|_| {});
//! assert!(a.ptr_eq(&b));
//! assert!(!a.ptr_eq(&c));
//! ```

use std::fmt;
use std::rc::Rc;

// ---------------------------------------------------------------------------
// ListenerError
// ---------------------------------------------------------------------------

/// Failure reported by a listener. Aborts the `emit` call it happened in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerError(String);

impl ListenerError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener failed: {}", self.0)
    }
}

impl std::error::Error for ListenerError {}

impl From<&str> for ListenerError {
    fn from(msg: &str) -> Self {
        Self::new(msg)
    }
}

impl From<String> for ListenerError {
    fn from(msg: String) -> Self {
        Self(msg)
    }
}

// ---------------------------------------------------------------------------
// Listener trait
// ---------------------------------------------------------------------------

/// A callback invoked with the arguments of every matching `emit`.
///
/// Listeners may call back into the emitter that invoked them.
pub trait Listener<A: ?Sized> {
    fn on_event(&self, args: &A) -> Result<(), ListenerError>;
}

/// A [`Listener`] backed by a closure that cannot fail.
pub struct FnListener<F>(pub F);

impl<A, F> Listener<A> for FnListener<F>
where
    A: ?Sized,
    F: Fn(&A),
{
    fn on_event(&self, args: &A) -> Result<(), ListenerError> {
        (self.0)(args);
        Ok(())
    }
}

/// A [`Listener`] backed by a closure that may fail.
pub struct TryFnListener<F>(pub F);

impl<A, F> Listener<A> for TryFnListener<F>
where
    A: ?Sized,
    F: Fn(&A) -> Result<(), ListenerError>,
{
    fn on_event(&self, args: &A) -> Result<(), ListenerError> {
        (self.0)(args)
    }
}

// ---------------------------------------------------------------------------
// ListenerHandle
// ---------------------------------------------------------------------------

/// Shared, identity-compared reference to a listener.
pub struct ListenerHandle<A: ?Sized>(Rc<dyn Listener<A>>);

impl<A: ?Sized> ListenerHandle<A> {
    /// Wraps an infallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&A) + 'static,
    {
        Self(Rc::new(FnListener(f)))
    }

    /// Wraps a closure whose `Err` aborts the emission it runs in.
    ///
    /// ```
    /// use lrukit::events::{EventEmitter, ListenerError, ListenerHandle};
    ///
    /// let emitter = EventEmitter::<u32>::new();
    /// emitter.on(
    ///     "job",
    ///     ListenerHandle::fallible(|n: &u32| {
    ///         if *n > 3 {
    ///             Err(ListenerError::new("too many retries"))
    ///         } else {
    ///             Ok(())
    ///         }
    ///     }),
    /// );
    /// assert_eq!(emitter.emit("job", &1), Ok(true));
    /// assert!(emitter.emit("job", &9).is_err());
    /// ```
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(&A) -> Result<(), ListenerError> + 'static,
    {
        Self(Rc::new(TryFnListener(f)))
    }

    /// Wraps any [`Listener`] implementation.
    pub fn from_listener<L>(listener: L) -> Self
    where
        L: Listener<A> + 'static,
    {
        Self(Rc::new(listener))
    }

    /// Whether both handles refer to the same listener allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub fn call(&self, args: &A) -> Result<(), ListenerError> {
        self.0.on_event(args)
    }
}

impl<A: ?Sized> Clone for ListenerHandle<A> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<A: ?Sized> fmt::Debug for ListenerHandle<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ListenerHandle")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}
