//! # Shared adapter core: state machine, fan-out registry, notification hub.
//!
//! One [`AdapterCore`] is created per factory invocation and shared (via
//! `Arc`) by the buildable adapter, the sealed adapter, and every default
//! operation slot. Enhancers replace slots, never the core; that is what
//! keeps the terminal-state guarantee and per-consumer isolation intact no
//! matter what an enhancer does.
//!
//! ## Rules
//! - All lifecycle mutation goes through [`AdapterCore::set_ready_state`].
//! - The machine lock is released before listeners run, so a listener may
//!   call back into the core re-entrantly.

use std::sync::Arc;

use crate::error::StateError;
use crate::events::{AdapterEvent, NotificationHub};
use crate::ingress::IngressRegistry;
use crate::state::{ReadyState, ReadyStateMachine};

/// Shared state behind one adapter: lifecycle machine, live queue set,
/// listener hub.
pub(crate) struct AdapterCore<T> {
    pub(crate) machine: ReadyStateMachine,
    pub(crate) registry: IngressRegistry<T>,
    pub(crate) hub: NotificationHub,
}

impl<T: Clone + Send + 'static> AdapterCore<T> {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            machine: ReadyStateMachine::new(),
            registry: IngressRegistry::new(),
            hub: NotificationHub::new(),
        })
    }

    /// Applies a lifecycle transition and fires the matching notification.
    ///
    /// `"open"` fires on a transition into `Open`; every other applied
    /// transition fires `"error"` - including the one into `Closed`. The
    /// naming is inherited from the lifecycle contract this adapter
    /// implements and is preserved literally.
    ///
    /// A same-state call applies nothing and fires nothing.
    pub(crate) fn set_ready_state(&self, next: ReadyState) -> Result<(), StateError> {
        match self.machine.transition(next)? {
            None => Ok(()),
            Some(applied) => {
                let event = if applied.is_open() {
                    AdapterEvent::open()
                } else {
                    AdapterEvent::error()
                }
                .with_ready_state(applied);

                self.hub.dispatch(&event);
                Ok(())
            }
        }
    }
}
