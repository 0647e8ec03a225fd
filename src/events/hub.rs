//! # Named listener registry with synchronous dispatch.
//!
//! [`NotificationHub`] maps event names to registered [`Listener`]s and
//! invokes every matching listener inline when an event is dispatched.
//! Dispatch runs to completion before returning; there are no worker tasks
//! and no queues between the emitter and the listeners.
//!
//! ## Rules
//! - Registration is keyed by `(name, listener identity)`. Adding the same
//!   pair twice is a no-op; removing an unknown pair is a no-op.
//! - Dispatch snapshots the matching listeners under the lock, then invokes
//!   them outside it. Listeners may add or remove listeners re-entrantly;
//!   changes take effect for the *next* dispatch.
//! - Listener panics are not caught; the hub is an in-process call chain, not
//!   an isolation boundary.
//!
//! ## Example
//! ```rust
//! use patchbay::{AdapterEvent, ListenerFn, NotificationHub};
//!
//! let hub = NotificationHub::new();
//! hub.add_listener("open", ListenerFn::arc(|ev: &AdapterEvent| {
//!     println!("open at {:?}", ev.at);
//! }));
//!
//! assert_eq!(hub.dispatch(&AdapterEvent::open()), 1);
//! assert_eq!(hub.dispatch(&AdapterEvent::error()), 0);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use crate::events::AdapterEvent;

/// Contract for notification listeners.
///
/// Called inline from the dispatching call site. Implementations should be
/// quick; long work belongs on a consumer task fed through `activities()`.
pub trait Listener: Send + Sync + 'static {
    /// Handle a single dispatched event.
    fn handle(&self, event: &AdapterEvent);
}

/// Shared handle to a listener.
pub type ListenerRef = Arc<dyn Listener>;

/// Function-backed listener implementation.
///
/// Wraps a plain closure so callers do not have to hand-implement
/// [`Listener`] for one-off handlers.
#[derive(Debug)]
pub struct ListenerFn<F> {
    f: F,
}

impl<F> ListenerFn<F>
where
    F: Fn(&AdapterEvent) + Send + Sync + 'static,
{
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`ListenerFn::arc`] when you immediately need a [`ListenerRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the listener and returns it as a shared handle.
    ///
    /// ## Example
    /// ```rust
    /// use patchbay::{AdapterEvent, ListenerFn, ListenerRef};
    ///
    /// let l: ListenerRef = ListenerFn::arc(|_ev: &AdapterEvent| {});
    /// ```
    pub fn arc(f: F) -> ListenerRef {
        Arc::new(Self::new(f))
    }
}

impl<F> Listener for ListenerFn<F>
where
    F: Fn(&AdapterEvent) + Send + Sync + 'static,
{
    fn handle(&self, event: &AdapterEvent) {
        (self.f)(event)
    }
}

/// Registry of `(name, listener)` pairs with synchronous fan-out.
#[derive(Default)]
pub struct NotificationHub {
    listeners: Mutex<Vec<(Arc<str>, ListenerRef)>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for events named `name`.
    ///
    /// A `(name, listener)` pair already present (same name, same listener
    /// identity) is not added again.
    pub fn add_listener(&self, name: impl Into<Arc<str>>, listener: ListenerRef) {
        let name = name.into();
        let mut listeners = self.listeners.lock();
        if listeners
            .iter()
            .any(|(n, l)| *n == name && same_listener(l, &listener))
        {
            return;
        }
        listeners.push((name, listener));
    }

    /// Removes a previously registered `(name, listener)` pair.
    ///
    /// Pairs are matched by name and listener identity; an unknown pair is
    /// silently ignored.
    pub fn remove_listener(&self, name: &str, listener: &ListenerRef) {
        let mut listeners = self.listeners.lock();
        if let Some(idx) = listeners
            .iter()
            .position(|(n, l)| &**n == name && same_listener(l, listener))
        {
            listeners.remove(idx);
        }
    }

    /// Invokes every listener registered for `event.name`, in registration
    /// order, and returns how many were invoked.
    ///
    /// The matching listeners are snapshotted first, so re-entrant
    /// registration changes only affect later dispatches.
    pub fn dispatch(&self, event: &AdapterEvent) -> usize {
        let matched: Vec<ListenerRef> = {
            let listeners = self.listeners.lock();
            listeners
                .iter()
                .filter(|(n, _)| *n == event.name)
                .map(|(_, l)| Arc::clone(l))
                .collect()
        };

        for listener in &matched {
            listener.handle(event);
        }
        matched.len()
    }

    /// Number of registered `(name, listener)` pairs across all names.
    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.lock().is_empty()
    }
}

/// Identity comparison on the data pointer, ignoring the vtable.
///
/// Vtable pointers are not unique across codegen units, so comparing fat
/// pointers directly can miss matches for the same allocation.
fn same_listener(a: &ListenerRef, b: &ListenerRef) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
