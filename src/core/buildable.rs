//! # Buildable adapter: the middleware-facing surface.
//!
//! [`Buildable`] is what the builder chain passes around before sealing. It
//! carries the shared core plus one replaceable slot per operation; enhancers
//! swap slots with `with_*`, and can fetch the current slot first (`*_op()`)
//! to call through to the previous behavior.
//!
//! ## Architecture
//! ```text
//! Buildable<T>
//!   ├─ core ───────► AdapterCore { machine, registry, hub }   (fixed)
//!   ├─ ingress ────► slot: Fn(T)                              (replaceable)
//!   ├─ close ──────► slot: Fn()                               (replaceable)
//!   ├─ activities ─► slot: Fn(SequenceConfig) -> Stream       (replaceable)
//!   ├─ set_ready_state ─► slot: Fn(ReadyState) -> Result      (replaceable, dropped at seal)
//!   └─ egress ─────► slot: Fn(T) -> future                    (replaceable, fails by default)
//! ```
//!
//! ## Rules
//! - Replacing a slot never touches the core: the state machine's terminal
//!   guarantee and the registry's per-consumer isolation hold regardless.
//! - Slot handles (`*_op()`) stay valid after sealing; an enhancer that
//!   captured `set_ready_state_op()` keeps driving transitions even though
//!   the sealed adapter no longer exposes the operation.
//! - The default egress slot always fails with
//!   [`EgressError::NotConfigured`]; real egress is enhancer-supplied.
//!
//! ## Example
//! ```rust
//! use patchbay::{BuildFn, Enhance, create_adapter};
//!
//! /// Uppercases every inbound activity.
//! struct Shout;
//!
//! impl Enhance<String> for Shout {
//!     fn wrap(&self, next: BuildFn<String>) -> BuildFn<String> {
//!         Box::new(move |options| {
//!             let adapter = next(options);
//!             let inner = adapter.ingress_op();
//!             adapter.with_ingress(move |activity: String| inner(activity.to_uppercase()))
//!         })
//!     }
//! }
//!
//! # let _ = create_adapter::<String, _, _>((), &Shout);
//! ```

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::core::adapter::Adapter;
use crate::core::shared::AdapterCore;
use crate::error::{EgressError, StateError};
use crate::events::{AdapterEvent, ListenerRef};
use crate::ingress::{ActivityStream, SequenceConfig};
use crate::state::ReadyState;

/// Inbound delivery slot: push one activity toward consumers.
pub type IngressOp<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Teardown slot: end every live sequence.
pub type CloseOp = Arc<dyn Fn() + Send + Sync>;

/// Subscription slot: create one fresh consumer sequence.
pub type ActivitiesOp<T> = Arc<dyn Fn(SequenceConfig) -> ActivityStream<T> + Send + Sync>;

/// Lifecycle slot: drive the ready-state machine.
pub type SetReadyStateOp = Arc<dyn Fn(ReadyState) -> Result<(), StateError> + Send + Sync>;

/// Future returned by the egress slot.
pub type BoxEgressFuture = BoxFuture<'static, Result<(), EgressError>>;

/// Outbound delivery slot: send one activity out of the adapter.
pub type EgressOp<T> = Arc<dyn Fn(T) -> BoxEgressFuture + Send + Sync>;

/// Pre-seal adapter with the full, replaceable operation set.
///
/// Produced by the base builder, threaded through the enhancer chain, and
/// consumed by the factory's seal step. Deliberately not `Clone`: exactly one
/// buildable flows through one build.
pub struct Buildable<T> {
    core: Arc<AdapterCore<T>>,
    ingress: IngressOp<T>,
    close: CloseOp,
    activities: ActivitiesOp<T>,
    set_ready_state: SetReadyStateOp,
    egress: EgressOp<T>,
}

impl<T: Clone + Send + 'static> Buildable<T> {
    /// Wires the default operation set to `core`.
    pub(crate) fn with_core(core: Arc<AdapterCore<T>>) -> Self {
        let ingress: IngressOp<T> = {
            let registry = core.registry.clone();
            Arc::new(move |activity| registry.ingress(activity))
        };
        let close: CloseOp = {
            let registry = core.registry.clone();
            Arc::new(move || registry.close())
        };
        let activities: ActivitiesOp<T> = {
            let registry = core.registry.clone();
            Arc::new(move |config| registry.subscribe(config))
        };
        let set_ready_state: SetReadyStateOp = {
            let core = Arc::clone(&core);
            Arc::new(move |state| core.set_ready_state(state))
        };
        let egress: EgressOp<T> =
            Arc::new(|_activity| Box::pin(std::future::ready(Err(EgressError::NotConfigured))));

        Self {
            core,
            ingress,
            close,
            activities,
            set_ready_state,
            egress,
        }
    }

    /// Builds an adapter wired to its own private core, unrelated to any
    /// factory.
    ///
    /// Useful for exercising enhancers in isolation. Returning a detached
    /// buildable from an enhancer makes the factory fail its lineage check
    /// with [`SealError::ForeignAdapter`](crate::error::SealError), since the
    /// value is not the one the factory set out to build.
    pub fn detached() -> Self {
        Self::with_core(AdapterCore::new())
    }

    // ---------------------------
    // Invocation
    // ---------------------------

    /// Delivers one inbound activity through the current ingress slot.
    pub fn ingress(&self, activity: T) {
        (self.ingress)(activity)
    }

    /// Ends every live sequence through the current close slot.
    pub fn close(&self) {
        (self.close)()
    }

    /// Opens a fresh consumer sequence through the current activities slot.
    pub fn activities(&self, config: SequenceConfig) -> ActivityStream<T> {
        (self.activities)(config)
    }

    /// Drives the lifecycle through the current set-ready-state slot.
    pub fn set_ready_state(&self, state: ReadyState) -> Result<(), StateError> {
        (self.set_ready_state)(state)
    }

    /// Sends one outbound activity through the current egress slot.
    pub async fn egress(&self, activity: T) -> Result<(), EgressError> {
        (self.egress)(activity).await
    }

    // ---------------------------
    // Notifications
    // ---------------------------

    /// Registers a named listener on the shared hub.
    ///
    /// Listeners added during composition stay registered on the sealed
    /// adapter; the hub lives in the core.
    pub fn add_event_listener(&self, name: impl Into<Arc<str>>, listener: ListenerRef) {
        self.core.hub.add_listener(name, listener)
    }

    /// Removes a previously registered listener.
    pub fn remove_event_listener(&self, name: &str, listener: &ListenerRef) {
        self.core.hub.remove_listener(name, listener)
    }

    /// Dispatches `event` to every listener registered under its name.
    pub fn dispatch_event(&self, event: &AdapterEvent) -> bool {
        self.core.hub.dispatch(event);
        true
    }

    // ---------------------------
    // Slot access (for call-through wrapping)
    // ---------------------------

    pub fn ingress_op(&self) -> IngressOp<T> {
        Arc::clone(&self.ingress)
    }

    pub fn close_op(&self) -> CloseOp {
        Arc::clone(&self.close)
    }

    pub fn activities_op(&self) -> ActivitiesOp<T> {
        Arc::clone(&self.activities)
    }

    pub fn set_ready_state_op(&self) -> SetReadyStateOp {
        Arc::clone(&self.set_ready_state)
    }

    pub fn egress_op(&self) -> EgressOp<T> {
        Arc::clone(&self.egress)
    }

    // ---------------------------
    // Slot replacement
    // ---------------------------

    /// Replaces the ingress slot.
    pub fn with_ingress(mut self, op: impl Fn(T) + Send + Sync + 'static) -> Self {
        self.ingress = Arc::new(op);
        self
    }

    /// Replaces the close slot.
    pub fn with_close(mut self, op: impl Fn() + Send + Sync + 'static) -> Self {
        self.close = Arc::new(op);
        self
    }

    /// Replaces the activities slot.
    pub fn with_activities(
        mut self,
        op: impl Fn(SequenceConfig) -> ActivityStream<T> + Send + Sync + 'static,
    ) -> Self {
        self.activities = Arc::new(op);
        self
    }

    /// Replaces the set-ready-state slot.
    ///
    /// The replacement decides what a transition request means; the machine
    /// itself stays reachable only through the core, so the terminal
    /// guarantee cannot be overridden.
    pub fn with_set_ready_state(
        mut self,
        op: impl Fn(ReadyState) -> Result<(), StateError> + Send + Sync + 'static,
    ) -> Self {
        self.set_ready_state = Arc::new(op);
        self
    }

    /// Replaces the egress slot.
    pub fn with_egress(
        mut self,
        op: impl Fn(T) -> BoxEgressFuture + Send + Sync + 'static,
    ) -> Self {
        self.egress = Arc::new(op);
        self
    }

    // ---------------------------
    // Sealing
    // ---------------------------

    pub(crate) fn core(&self) -> &Arc<AdapterCore<T>> {
        &self.core
    }

    /// Converts into the sealed, public adapter.
    ///
    /// The set-ready-state slot is dropped here: the sealed type has no such
    /// operation. `ready_state()` on the sealed adapter reads the core's
    /// machine directly, so no enhancer slot can shadow it.
    pub(crate) fn seal(self) -> Adapter<T> {
        Adapter::from_parts(
            self.core,
            self.ingress,
            self.close,
            self.activities,
            self.egress,
        )
    }
}
