//! # Lifecycle notifications emitted by the adapter.
//!
//! [`AdapterEvent`] is the payload handed to listeners registered on the
//! [`NotificationHub`](crate::events::NotificationHub). The adapter core emits
//! two well-known names:
//! - `"open"` — the ready state transitioned into `OPEN`
//! - `"error"` — the ready state transitioned into anything else, including
//!   `CLOSED` (historical naming, kept for compatibility)
//!
//! Custom names are allowed; `dispatch_event` forwards whatever it is given.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore emission order when events are recorded
//! out of band.
//!
//! ## Example
//! ```rust
//! use patchbay::{AdapterEvent, ReadyState};
//!
//! let ev = AdapterEvent::open().with_ready_state(ReadyState::Open);
//!
//! assert!(ev.is_open());
//! assert_eq!(ev.ready_state, Some(ReadyState::Open));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::state::ReadyState;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Notification payload with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - `ready_state`: the state just applied, set on lifecycle events
#[derive(Clone, Debug)]
pub struct AdapterEvent {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event name listeners register against (e.g. `"open"`, `"error"`).
    pub name: Arc<str>,
    /// Ready state that was just applied, if this is a lifecycle event.
    pub ready_state: Option<ReadyState>,
}

impl AdapterEvent {
    /// Name of the event fired on a transition into `OPEN`.
    pub const OPEN: &'static str = "open";

    /// Name of the event fired on any transition that is not into `OPEN`.
    ///
    /// This includes the transition into `CLOSED`; the name is a historical
    /// artifact of the lifecycle contract and is preserved as-is.
    pub const ERROR: &'static str = "error";

    /// Creates an event with the given name, current timestamp and next
    /// sequence number.
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            name: name.into(),
            ready_state: None,
        }
    }

    /// Creates an `"open"` lifecycle event.
    #[inline]
    pub fn open() -> Self {
        Self::named(Self::OPEN)
    }

    /// Creates an `"error"` lifecycle event.
    #[inline]
    pub fn error() -> Self {
        Self::named(Self::ERROR)
    }

    /// Attaches the ready state that was just applied.
    #[inline]
    pub fn with_ready_state(mut self, state: ReadyState) -> Self {
        self.ready_state = Some(state);
        self
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        &*self.name == Self::OPEN
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        &*self.name == Self::ERROR
    }
}
