//! # Sealed adapter: the public capability surface.
//!
//! [`Adapter`] is what [`create_adapter`](crate::create_adapter) returns. It
//! exposes the public operation set and nothing else: `set_ready_state` does
//! not exist on this type, and `ready_state()` reads the live state machine
//! directly, so no enhancer-installed slot sits between the caller and the
//! true lifecycle value.
//!
//! ## Rules
//! - Clones are handles onto the same channel: they share the live queue
//!   set, the lifecycle machine and the listener hub.
//! - `ingress`, `close` and `dispatch_event` run synchronously to
//!   completion; only consuming the returned stream (and `egress`) suspend.
//!
//! ## Example
//! ```rust
//! use futures::StreamExt;
//! use patchbay::{create_adapter_default, SequenceConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), patchbay::SealError> {
//! let adapter = create_adapter_default::<&str, _>(())?;
//! let mut activities = adapter.activities(SequenceConfig::new());
//!
//! adapter.ingress("hello");
//! adapter.close();
//!
//! assert_eq!(activities.next().await, Some("hello"));
//! assert_eq!(activities.next().await, None);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::core::buildable::{ActivitiesOp, CloseOp, EgressOp, IngressOp};
use crate::core::shared::AdapterCore;
use crate::error::EgressError;
use crate::events::{AdapterEvent, ListenerRef};
use crate::ingress::{ActivityStream, SequenceConfig};
use crate::state::ReadyState;

/// Bidirectional, multi-consumer activity channel.
///
/// Producers push inbound activities with [`ingress`](Adapter::ingress);
/// every consumer holding a stream from [`activities`](Adapter::activities)
/// receives each of them exactly once, in order. The outbound direction
/// ([`egress`](Adapter::egress)) fails until an enhancer supplies behavior
/// for it.
pub struct Adapter<T> {
    core: Arc<AdapterCore<T>>,
    ingress: IngressOp<T>,
    close: CloseOp,
    activities: ActivitiesOp<T>,
    egress: EgressOp<T>,
}

impl<T> Clone for Adapter<T> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            ingress: Arc::clone(&self.ingress),
            close: Arc::clone(&self.close),
            activities: Arc::clone(&self.activities),
            egress: Arc::clone(&self.egress),
        }
    }
}

impl<T: Clone + Send + 'static> Adapter<T> {
    pub(crate) fn from_parts(
        core: Arc<AdapterCore<T>>,
        ingress: IngressOp<T>,
        close: CloseOp,
        activities: ActivitiesOp<T>,
        egress: EgressOp<T>,
    ) -> Self {
        Self {
            core,
            ingress,
            close,
            activities,
            egress,
        }
    }

    /// Opens a fresh, independent lazy sequence of inbound activities.
    ///
    /// Each call registers one new queue in the live set; cancelling the
    /// config's token (or dropping everything at `close`) affects only that
    /// queue. Requires a Tokio runtime when a cancellation token is supplied.
    pub fn activities(&self, config: SequenceConfig) -> ActivityStream<T> {
        (self.activities)(config)
    }

    /// Delivers one inbound activity to every live sequence, in registration
    /// order. With no live sequences the activity is silently dropped.
    pub fn ingress(&self, activity: T) {
        (self.ingress)(activity)
    }

    /// Sends one activity out of the adapter.
    ///
    /// Fails with [`EgressError::NotConfigured`] unless an enhancer replaced
    /// the egress slot with real outbound behavior.
    pub async fn egress(&self, activity: T) -> Result<(), EgressError> {
        (self.egress)(activity).await
    }

    /// Ends every live sequence (consumers drain buffered items, then their
    /// iteration completes). Idempotent.
    ///
    /// Closing the channel does not touch the ready state; drive that
    /// through an enhancer holding the set-ready-state op.
    pub fn close(&self) {
        (self.close)()
    }

    /// Current lifecycle value, read from the state machine itself.
    pub fn ready_state(&self) -> ReadyState {
        self.core.machine.current()
    }

    /// Registers `listener` for events named `name`.
    pub fn add_event_listener(&self, name: impl Into<Arc<str>>, listener: ListenerRef) {
        self.core.hub.add_listener(name, listener)
    }

    /// Removes a previously registered `(name, listener)` pair; unknown
    /// pairs are ignored.
    pub fn remove_event_listener(&self, name: &str, listener: &ListenerRef) {
        self.core.hub.remove_listener(name, listener)
    }

    /// Synchronously invokes every listener registered for `event.name`.
    ///
    /// Always returns `true`: events carry no cancellation semantics here;
    /// the boolean mirrors event targets where a listener could veto.
    pub fn dispatch_event(&self, event: &AdapterEvent) -> bool {
        self.core.hub.dispatch(event);
        true
    }
}
