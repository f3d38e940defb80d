//! # Event Emitter
//!
//! Named events fanned out synchronously to an ordered list of listeners.
//!
//! ```text
//!   EventEmitter<A>
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │ RefCell<FxHashMap<String, Vec<Registration<A>>>>             │
//!   │                                                              │
//!   │   "data"  ─► [ h1 ] [ h2 (once) ] [ h1 ]                     │
//!   │   "close" ─► [ h3 ]                                          │
//!   └──────────────────────────────────────────────────────────────┘
//!
//!   emit("data", &args)
//!     1. borrow registry, clone registrations ─► snapshot [h1, h2, h1]
//!     2. release borrow
//!     3. call snapshot in order, stop at the first Err
//!        a one-shot entry is removed from the live list right before its
//!        own call, and skipped if it is no longer there
//! ```
//!
//! Every method takes `&self`, so a listener that captured a reference to
//! its emitter can register, remove or emit while it runs. Registrations
//! added during a pass wait for the next `emit`. A one-shot registration
//! fires at most once even under nested `emit` calls, and one that was
//! never reached (because an earlier listener failed) stays registered.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use lrukit::events::EventEmitter;
//!
//! let emitter = EventEmitter::<String>::new();
//! let log = Rc::new(RefCell::new(Vec::new()));
//!
//! let sink = Rc::clone(&log);
//! let handle = emitter.on_fn("greet", move |name: &String| {
//!     sink.borrow_mut().push(format!("hello {name}"));
//! });
//!
//! assert_eq!(emitter.emit("greet", &"ada".to_string()), Ok(true));
//! assert!(emitter.off("greet", &handle));
//! assert_eq!(emitter.emit("greet", &"bob".to_string()), Ok(false));
//! assert_eq!(*log.borrow(), vec!["hello ada".to_string()]);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::events::listener::{ListenerError, ListenerHandle};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::EmitterMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::EmitterMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{EmitterMetricsRecorder, MetricsReset, MetricsSnapshotProvider};

struct Registration<A: ?Sized> {
    id: u64,
    handle: ListenerHandle<A>,
    once: bool,
}

impl<A: ?Sized> Clone for Registration<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            handle: self.handle.clone(),
            once: self.once,
        }
    }
}

/// Registry of listeners keyed by event name.
///
/// `A` is the payload every listener of this emitter receives by reference.
/// Use a tuple or struct for several arguments and `()` for none. The
/// payload may borrow (`EventEmitter<&str>`); the listeners themselves are
/// `'static` closures because handles are type-erased behind `Rc`.
pub struct EventEmitter<A: ?Sized> {
    registry: RefCell<FxHashMap<String, Vec<Registration<A>>>>,
    next_id: Cell<u64>,
    #[cfg(feature = "metrics")]
    metrics: EmitterMetrics,
}

impl<A: ?Sized> EventEmitter<A> {
    pub fn new() -> Self {
        Self {
            registry: RefCell::new(FxHashMap::default()),
            next_id: Cell::new(0),
            #[cfg(feature = "metrics")]
            metrics: EmitterMetrics::default(),
        }
    }

    /// Appends `listener` to `event`. The same handle may be added more than
    /// once; each registration fires separately.
    pub fn on(&self, event: impl Into<String>, listener: ListenerHandle<A>) -> &Self {
        self.register(event.into(), listener, false);
        self
    }

    /// Like [`on`](Self::on), but the registration is removed right before
    /// its first call.
    pub fn once(&self, event: impl Into<String>, listener: ListenerHandle<A>) -> &Self {
        self.register(event.into(), listener, true);
        self
    }

    /// Registers a closure and returns its handle for a later [`off`](Self::off).
    pub fn on_fn<F>(&self, event: impl Into<String>, f: F) -> ListenerHandle<A>
    where
        F: Fn(&A) + 'static,
    {
        let handle = ListenerHandle::new(f);
        self.register(event.into(), handle.clone(), false);
        handle
    }

    /// One-shot variant of [`on_fn`](Self::on_fn).
    pub fn once_fn<F>(&self, event: impl Into<String>, f: F) -> ListenerHandle<A>
    where
        F: Fn(&A) + 'static,
    {
        let handle = ListenerHandle::new(f);
        self.register(event.into(), handle.clone(), true);
        handle
    }

    /// Removes the first registration of `listener` under `event`.
    ///
    /// Later duplicates of the same handle stay registered. Returns `false`
    /// when nothing matched.
    pub fn off(&self, event: &str, listener: &ListenerHandle<A>) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_off_call();

        let mut registry = self.registry.borrow_mut();
        let Some(registrations) = registry.get_mut(event) else {
            return false;
        };
        let Some(pos) = registrations
            .iter()
            .position(|r| r.handle.ptr_eq(listener))
        else {
            return false;
        };

        registrations.remove(pos);
        if registrations.is_empty() {
            registry.remove(event);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_off_found();

        true
    }

    /// Calls every listener registered for `event` with `args`, in
    /// registration order.
    ///
    /// Returns `Ok(true)` if at least one listener was registered when the
    /// call started. The first listener error stops the pass and is returned.
    /// One-shot registrations the pass never reached stay registered.
    pub fn emit(&self, event: &str, args: &A) -> Result<bool, ListenerError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_emit_call();

        let snapshot = self.snapshot(event);
        if snapshot.is_empty() {
            #[cfg(feature = "metrics")]
            self.metrics.record_emit_without_listeners();
            return Ok(false);
        }

        trace!(event, listeners = snapshot.len(), "emitting event");

        for registration in &snapshot {
            if registration.once && !self.retire_once(event, registration.id) {
                continue;
            }

            #[cfg(feature = "metrics")]
            self.metrics.record_listener_invoked();

            if let Err(err) = registration.handle.call(args) {
                #[cfg(feature = "metrics")]
                self.metrics.record_listener_error();

                debug!(event, error = %err, "listener error aborted emit");
                return Err(err);
            }
        }
        Ok(true)
    }

    /// Number of registrations for `event`, counting duplicates.
    pub fn listener_count(&self, event: &str) -> usize {
        self.registry.borrow().get(event).map_or(0, Vec::len)
    }

    /// Events with at least one registration, sorted.
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registry.borrow().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Drops every registration for `event`, returning how many there were.
    pub fn remove_all_listeners(&self, event: &str) -> usize {
        self.registry
            .borrow_mut()
            .remove(event)
            .map_or(0, |registrations| registrations.len())
    }

    pub fn clear(&self) {
        let mut registry = self.registry.borrow_mut();
        debug!(events = registry.len(), "clearing event emitter");
        registry.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.registry.borrow().is_empty()
    }

    fn register(&self, event: String, handle: ListenerHandle<A>, once: bool) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.registry
            .borrow_mut()
            .entry(event)
            .or_default()
            .push(Registration { id, handle, once });
    }

    /// Copies the registrations for `event`. The registry borrow ends before
    /// this returns.
    fn snapshot(&self, event: &str) -> Vec<Registration<A>> {
        self.registry
            .borrow()
            .get(event)
            .map(|registrations| registrations.to_vec())
            .unwrap_or_default()
    }

    /// Removes the one-shot registration `id` ahead of its call. Returns
    /// `false` if it was already removed by `off`, a nested `emit` or a clear.
    fn retire_once(&self, event: &str, id: u64) -> bool {
        let mut registry = self.registry.borrow_mut();
        let Some(registrations) = registry.get_mut(event) else {
            return false;
        };
        let Some(pos) = registrations.iter().position(|r| r.id == id) else {
            return false;
        };

        registrations.remove(pos);
        if registrations.is_empty() {
            registry.remove(event);
        }

        debug!(event, "retired one-shot listener");
        #[cfg(feature = "metrics")]
        self.metrics.record_once_retired();

        true
    }
}

#[cfg(feature = "metrics")]
impl<A: ?Sized> EventEmitter<A> {
    /// Resets all counters to zero. Registrations are untouched.
    pub fn reset_metrics(&self) {
        self.metrics.reset_metrics();
    }

    pub fn metrics_snapshot(&self) -> EmitterMetricsSnapshot {
        let registry = self.registry.borrow();
        EmitterMetricsSnapshot {
            emit_calls: self.metrics.emit_calls.get(),
            emits_without_listeners: self.metrics.emits_without_listeners.get(),
            listener_invocations: self.metrics.listener_invocations.get(),
            listener_errors: self.metrics.listener_errors.get(),
            once_retired: self.metrics.once_retired.get(),
            off_calls: self.metrics.off_calls.get(),
            off_found: self.metrics.off_found.get(),
            event_count: registry.len(),
            registration_count: registry.values().map(Vec::len).sum(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<A: ?Sized> MetricsSnapshotProvider<EmitterMetricsSnapshot> for EventEmitter<A> {
    fn snapshot(&self) -> EmitterMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<A: ?Sized> Default for EventEmitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> fmt::Debug for EventEmitter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        let mut counts: Vec<(&str, usize)> = registry
            .iter()
            .map(|(name, regs)| (name.as_str(), regs.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("EventEmitter")
            .field("listeners", &counts)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn recorder(log: &Log, tag: &'static str) -> ListenerHandle<()> {
        let log = Rc::clone(log);
        ListenerHandle::new(move |_: &()| log.borrow_mut().push(tag))
    }

    mod registration {
        use super::*;

        #[test]
        fn new_emitter_is_empty() {
            let emitter = EventEmitter::<()>::new();
            assert!(emitter.is_empty());
            assert_eq!(emitter.listener_count("anything"), 0);
            assert!(emitter.event_names().is_empty());
        }

        #[test]
        fn duplicates_are_counted_and_fire_separately() {
            let log = Log::default();
            let emitter = EventEmitter::new();
            let h = recorder(&log, "h");
            emitter.on("e", h.clone()).on("e", h);

            assert_eq!(emitter.listener_count("e"), 2);
            assert_eq!(emitter.emit("e", &()), Ok(true));
            assert_eq!(*log.borrow(), vec!["h", "h"]);
        }

        #[test]
        fn event_names_are_sorted() {
            let emitter = EventEmitter::<()>::new();
            emitter.on_fn("zeta", |_| {});
            emitter.on_fn("alpha", |_| {});
            emitter.once_fn("mid", |_| {});
            assert_eq!(emitter.event_names(), vec!["alpha", "mid", "zeta"]);
        }

        #[test]
        fn remove_all_listeners_reports_count() {
            let emitter = EventEmitter::<()>::new();
            emitter.on_fn("e", |_| {});
            emitter.once_fn("e", |_| {});
            emitter.on_fn("other", |_| {});

            assert_eq!(emitter.remove_all_listeners("e"), 2);
            assert_eq!(emitter.remove_all_listeners("e"), 0);
            assert_eq!(emitter.listener_count("other"), 1);
        }

        #[test]
        fn clear_drops_everything() {
            let emitter = EventEmitter::<()>::new();
            emitter.on_fn("a", |_| {});
            emitter.on_fn("b", |_| {});
            emitter.clear();
            assert!(emitter.is_empty());
            assert_eq!(emitter.emit("a", &()), Ok(false));
        }
    }

    mod dispatch {
        use super::*;

        #[test]
        fn runs_in_registration_order() {
            let log = Log::default();
            let emitter = EventEmitter::new();
            emitter.on("e", recorder(&log, "first"));
            emitter.on("e", recorder(&log, "second"));
            emitter.on("e", recorder(&log, "third"));

            emitter.emit("e", &()).unwrap();
            assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
        }

        #[test]
        fn passes_arguments_by_reference() {
            let seen = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&seen);
            let emitter = EventEmitter::<(i32, &'static str)>::new();
            emitter.on_fn("pair", move |(n, s)| sink.borrow_mut().push((*n, *s)));

            emitter.emit("pair", &(1, "one")).unwrap();
            emitter.emit("pair", &(2, "two")).unwrap();
            assert_eq!(*seen.borrow(), vec![(1, "one"), (2, "two")]);
        }

        #[test]
        fn other_events_are_not_dispatched() {
            let log = Log::default();
            let emitter = EventEmitter::new();
            emitter.on("a", recorder(&log, "a"));

            assert_eq!(emitter.emit("b", &()), Ok(false));
            assert!(log.borrow().is_empty());
        }

        #[test]
        fn payload_may_borrow_local_data() {
            let text = String::from("borrowed");
            let seen = Rc::new(Cell::new(0));
            let sink = Rc::clone(&seen);

            let emitter = EventEmitter::<&str>::new();
            emitter.on_fn("len", move |s| sink.set(s.len()));
            emitter.emit("len", &text.as_str()).unwrap();

            assert_eq!(seen.get(), 8);
        }

        #[test]
        fn unsized_payload() {
            let total = Rc::new(Cell::new(0));
            let sink = Rc::clone(&total);
            let emitter = EventEmitter::<[u32]>::new();
            emitter.on_fn("batch", move |xs: &[u32]| sink.set(sink.get() + xs.iter().sum::<u32>()));

            emitter.emit("batch", &[1, 2, 3][..]).unwrap();
            assert_eq!(total.get(), 6);
        }
    }

    mod once {
        use super::*;

        #[test]
        fn fires_exactly_once() {
            let log = Log::default();
            let emitter = EventEmitter::new();
            emitter.once("e", recorder(&log, "once"));

            assert_eq!(emitter.emit("e", &()), Ok(true));
            assert_eq!(emitter.emit("e", &()), Ok(false));
            assert_eq!(*log.borrow(), vec!["once"]);
            assert_eq!(emitter.listener_count("e"), 0);
        }

        #[test]
        fn keeps_position_among_persistent_listeners() {
            let log = Log::default();
            let emitter = EventEmitter::new();
            emitter.on("e", recorder(&log, "a"));
            emitter.once("e", recorder(&log, "b"));
            emitter.on("e", recorder(&log, "c"));

            emitter.emit("e", &()).unwrap();
            emitter.emit("e", &()).unwrap();
            assert_eq!(*log.borrow(), vec!["a", "b", "c", "a", "c"]);
        }

        #[test]
        fn removable_with_off_before_firing() {
            let log = Log::default();
            let emitter = EventEmitter::new();
            let h = recorder(&log, "x");
            emitter.once("e", h.clone());

            assert!(emitter.off("e", &h));
            assert_eq!(emitter.emit("e", &()), Ok(false));
            assert!(log.borrow().is_empty());
        }
    }

    mod removal {
        use super::*;

        #[test]
        fn off_removes_only_first_match() {
            let log = Log::default();
            let emitter = EventEmitter::new();
            let h = recorder(&log, "h");
            emitter.on("e", h.clone());
            emitter.on("e", recorder(&log, "other"));
            emitter.on("e", h.clone());

            assert!(emitter.off("e", &h));
            assert_eq!(emitter.listener_count("e"), 2);
            emitter.emit("e", &()).unwrap();
            assert_eq!(*log.borrow(), vec!["other", "h"]);
        }

        #[test]
        fn off_with_lookalike_closure_is_noop() {
            let log = Log::default();
            let emitter = EventEmitter::new();
            emitter.on("e", recorder(&log, "same"));

            assert!(!emitter.off("e", &recorder(&log, "same")));
            assert_eq!(emitter.listener_count("e"), 1);
        }

        #[test]
        fn off_on_unknown_event_is_noop() {
            let emitter = EventEmitter::<()>::new();
            let h = ListenerHandle::new(|_: &()| {});
            assert!(!emitter.off("missing", &h));
        }

        #[test]
        fn off_last_listener_forgets_event() {
            let emitter = EventEmitter::<()>::new();
            let h = emitter.on_fn("e", |_| {});
            emitter.off("e", &h);
            assert!(emitter.is_empty());
            assert!(emitter.event_names().is_empty());
        }
    }

    mod failures {
        use super::*;
        use std::panic::{catch_unwind, AssertUnwindSafe};

        #[test]
        fn error_aborts_remaining_listeners() {
            let log = Log::default();
            let emitter = EventEmitter::new();
            emitter.on("e", recorder(&log, "before"));
            emitter.on(
                "e",
                ListenerHandle::fallible(|_: &()| Err(ListenerError::new("boom"))),
            );
            emitter.on("e", recorder(&log, "after"));

            let err = emitter.emit("e", &()).unwrap_err();
            assert_eq!(err.message(), "boom");
            assert_eq!(*log.borrow(), vec!["before"]);
            assert_eq!(emitter.listener_count("e"), 3);
        }

        #[test]
        fn one_shot_behind_failing_listener_waits_for_next_emit() {
            let fired = Rc::new(Cell::new(0));
            let emitter = EventEmitter::<bool>::new();
            emitter.on(
                "e",
                ListenerHandle::fallible(|fail: &bool| {
                    if *fail {
                        Err(ListenerError::new("rejected"))
                    } else {
                        Ok(())
                    }
                }),
            );
            let sink = Rc::clone(&fired);
            emitter.once_fn("e", move |_| sink.set(sink.get() + 1));

            assert!(emitter.emit("e", &true).is_err());
            assert_eq!(fired.get(), 0);
            assert_eq!(emitter.listener_count("e"), 2);

            assert_eq!(emitter.emit("e", &false), Ok(true));
            assert_eq!(fired.get(), 1);
            assert_eq!(emitter.listener_count("e"), 1);

            emitter.emit("e", &false).unwrap();
            assert_eq!(fired.get(), 1);
        }

        #[test]
        fn failing_one_shot_is_retired_by_its_own_call() {
            let log = Log::default();
            let emitter = EventEmitter::new();
            emitter.once(
                "e",
                ListenerHandle::fallible(|_: &()| Err(ListenerError::new("once fails"))),
            );
            emitter.once("e", recorder(&log, "pending"));

            assert!(emitter.emit("e", &()).is_err());
            assert_eq!(emitter.listener_count("e"), 1);

            assert_eq!(emitter.emit("e", &()), Ok(true));
            assert_eq!(*log.borrow(), vec!["pending"]);
            assert!(emitter.is_empty());
        }

        #[test]
        fn one_shot_behind_panicking_listener_survives() {
            let log = Log::default();
            let emitter = EventEmitter::new();
            emitter.on("e", ListenerHandle::new(|_: &()| panic!("listener panicked")));
            emitter.once("e", recorder(&log, "later"));

            let result = catch_unwind(AssertUnwindSafe(|| emitter.emit("e", &())));
            assert!(result.is_err());
            assert_eq!(emitter.listener_count("e"), 2);
            assert!(log.borrow().is_empty());
        }

        #[test]
        fn panic_leaves_registry_usable() {
            let log = Log::default();
            let emitter = EventEmitter::new();
            emitter.on("e", ListenerHandle::new(|_: &()| panic!("listener panicked")));
            emitter.on("ok", recorder(&log, "ok"));

            let result = catch_unwind(AssertUnwindSafe(|| emitter.emit("e", &())));
            assert!(result.is_err());

            assert_eq!(emitter.emit("ok", &()), Ok(true));
            assert_eq!(emitter.listener_count("e"), 1);
            assert_eq!(*log.borrow(), vec!["ok"]);
        }
    }

    mod reentrancy {
        use super::*;

        #[test]
        fn listener_added_during_emit_runs_next_time() {
            let log = Log::default();
            let emitter = Rc::new(EventEmitter::<()>::new());

            let weak = Rc::downgrade(&emitter);
            let late = recorder(&log, "late");
            let armed = Cell::new(false);
            emitter.on_fn("e", move |_| {
                if !armed.replace(true) {
                    if let Some(emitter) = weak.upgrade() {
                        emitter.on("e", late.clone());
                    }
                }
            });

            emitter.emit("e", &()).unwrap();
            assert!(log.borrow().is_empty());
            assert_eq!(emitter.listener_count("e"), 2);

            emitter.emit("e", &()).unwrap();
            assert_eq!(*log.borrow(), vec!["late"]);
        }

        #[test]
        fn listener_removed_during_emit_still_runs_this_pass() {
            let log = Log::default();
            let emitter = Rc::new(EventEmitter::<()>::new());
            let victim = recorder(&log, "victim");

            let weak = Rc::downgrade(&emitter);
            let target = victim.clone();
            emitter.on_fn("e", move |_| {
                if let Some(emitter) = weak.upgrade() {
                    emitter.off("e", &target);
                }
            });
            emitter.on("e", victim);

            emitter.emit("e", &()).unwrap();
            assert_eq!(*log.borrow(), vec!["victim"]);

            emitter.emit("e", &()).unwrap();
            assert_eq!(*log.borrow(), vec!["victim"]);
        }

        #[test]
        fn nested_emit_never_repeats_once_listener() {
            let count = Rc::new(Cell::new(0));
            let emitter = Rc::new(EventEmitter::<u32>::new());

            let weak = Rc::downgrade(&emitter);
            let hits = Rc::clone(&count);
            emitter.once_fn("e", move |depth| {
                hits.set(hits.get() + 1);
                if *depth < 3 {
                    if let Some(emitter) = weak.upgrade() {
                        assert_eq!(emitter.emit("e", &(depth + 1)), Ok(false));
                    }
                }
            });

            assert_eq!(emitter.emit("e", &0), Ok(true));
            assert_eq!(count.get(), 1);
        }

        #[test]
        fn nested_emit_fires_pending_one_shot_only_once() {
            let log = Log::default();
            let emitter = Rc::new(EventEmitter::<()>::new());

            let weak = Rc::downgrade(&emitter);
            let nested = Cell::new(false);
            emitter.on_fn("e", move |_| {
                if !nested.replace(true) {
                    if let Some(emitter) = weak.upgrade() {
                        emitter.emit("e", &()).unwrap();
                    }
                }
            });
            emitter.once("e", recorder(&log, "once"));

            emitter.emit("e", &()).unwrap();
            assert_eq!(*log.borrow(), vec!["once"]);
            assert_eq!(emitter.listener_count("e"), 1);
        }

        #[test]
        fn one_shot_removed_mid_pass_is_skipped() {
            let log = Log::default();
            let emitter = Rc::new(EventEmitter::<()>::new());
            let pending = recorder(&log, "pending");

            let weak = Rc::downgrade(&emitter);
            let target = pending.clone();
            emitter.on_fn("e", move |_| {
                if let Some(emitter) = weak.upgrade() {
                    emitter.off("e", &target);
                }
            });
            emitter.once("e", pending);

            assert_eq!(emitter.emit("e", &()), Ok(true));
            assert!(log.borrow().is_empty());
        }

        #[test]
        fn listener_can_query_counts_while_running() {
            let emitter = Rc::new(EventEmitter::<()>::new());
            let seen = Rc::new(Cell::new(usize::MAX));

            let weak = Rc::downgrade(&emitter);
            let sink = Rc::clone(&seen);
            emitter.once_fn("e", move |_| {
                if let Some(emitter) = weak.upgrade() {
                    sink.set(emitter.listener_count("e"));
                }
            });

            emitter.emit("e", &()).unwrap();
            assert_eq!(seen.get(), 0);
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn counters_follow_dispatch() {
            let emitter = EventEmitter::<()>::new();
            let h = emitter.on_fn("e", |_| {});
            emitter.once_fn("e", |_| {});
            emitter.on("f", ListenerHandle::fallible(|_: &()| Err("nope".into())));

            emitter.emit("e", &()).unwrap();
            emitter.emit("missing", &()).unwrap();
            let _ = emitter.emit("f", &());
            emitter.off("e", &h);
            emitter.off("e", &h);

            let snap = emitter.metrics_snapshot();
            assert_eq!(snap.emit_calls, 3);
            assert_eq!(snap.emits_without_listeners, 1);
            assert_eq!(snap.listener_invocations, 3);
            assert_eq!(snap.listener_errors, 1);
            assert_eq!(snap.once_retired, 1);
            assert_eq!(snap.off_calls, 2);
            assert_eq!(snap.off_found, 1);
            assert_eq!(snap.event_count, 1);
            assert_eq!(snap.registration_count, 1);
        }

        #[test]
        fn reset_zeroes_counters_but_keeps_registrations() {
            let emitter = EventEmitter::<()>::new();
            emitter.on_fn("e", |_| {});
            emitter.emit("e", &()).unwrap();
            emitter.reset_metrics();

            let snap = emitter.metrics_snapshot();
            assert_eq!(snap.emit_calls, 0);
            assert_eq!(snap.listener_invocations, 0);
            assert_eq!(snap.registration_count, 1);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            On(usize),
            Once(usize),
            Off(usize),
            Emit,
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                3 => (0usize..4).prop_map(Op::On),
                2 => (0usize..4).prop_map(Op::Once),
                2 => (0usize..4).prop_map(Op::Off),
                2 => Just(Op::Emit),
            ]
        }

        proptest! {
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_emit_matches_registration_model(
                ops in prop::collection::vec(op_strategy(), 0..80)
            ) {
                let fired = Rc::new(RefCell::new(Vec::new()));
                let handles: Vec<ListenerHandle<()>> = (0..4)
                    .map(|i| {
                        let sink = Rc::clone(&fired);
                        ListenerHandle::new(move |_: &()| sink.borrow_mut().push(i))
                    })
                    .collect();

                let emitter = EventEmitter::new();
                let mut model: Vec<(usize, bool)> = Vec::new();

                for op in ops {
                    match op {
                        Op::On(i) => {
                            emitter.on("e", handles[i].clone());
                            model.push((i, false));
                        }
                        Op::Once(i) => {
                            emitter.once("e", handles[i].clone());
                            model.push((i, true));
                        }
                        Op::Off(i) => {
                            let pos = model.iter().position(|(m, _)| *m == i);
                            if let Some(pos) = pos {
                                model.remove(pos);
                            }
                            prop_assert_eq!(emitter.off("e", &handles[i]), pos.is_some());
                        }
                        Op::Emit => {
                            fired.borrow_mut().clear();
                            let expected: Vec<usize> = model.iter().map(|(i, _)| *i).collect();
                            model.retain(|(_, once)| !once);
                            prop_assert_eq!(emitter.emit("e", &()), Ok(!expected.is_empty()));
                            prop_assert_eq!(&*fired.borrow(), &expected);
                        }
                    }
                    prop_assert_eq!(emitter.listener_count("e"), model.len());
                }
            }
        }
    }
}
