//! Lifecycle notifications: payload type and listener hub.
//!
//! This module groups the notification **data model** and the **hub** used to
//! register listeners and dispatch events by name.
//!
//! ## Contents
//! - [`AdapterEvent`] event payload with name, sequence and timestamp
//! - [`Listener`], [`ListenerFn`], [`ListenerRef`] listener contract and helpers
//! - [`NotificationHub`] named-listener registry with synchronous fan-out
//! - [`LogListener`] stdout listener for demos (feature `logging`)
//!
//! ## Quick reference
//! - **Emitter**: the adapter core fires `"open"` / `"error"` on ready-state
//!   transitions; `dispatch_event` forwards caller-supplied events verbatim.
//! - **Consumers**: listeners registered via `add_event_listener`, invoked
//!   inline in registration order.

mod event;
mod hub;

#[cfg(feature = "logging")]
mod log;

pub use event::AdapterEvent;
pub use hub::{Listener, ListenerFn, ListenerRef, NotificationHub};

#[cfg(feature = "logging")]
pub use log::LogListener;
