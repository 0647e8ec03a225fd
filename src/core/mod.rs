//! Adapter core: construction, enhancement, sealing.
//!
//! This module contains the factory pipeline and the two adapter types it
//! moves between. The public API from here is [`create_adapter`] /
//! [`create_adapter_default`], the pre-seal [`Buildable`] (what enhancers
//! receive) and the sealed [`Adapter`] (what callers receive).
//!
//! ## System wiring
//! ```text
//! create_adapter(options, enhancer)
//!     │
//!     │   AdapterCore (one per factory call, shared via Arc)
//!     │     ├─ ReadyStateMachine   CONNECTING → OPEN → CLOSED
//!     │     ├─ IngressRegistry     live per-consumer queues
//!     │     └─ NotificationHub     named listeners, sync dispatch
//!     │
//!     ├─► base builder ──► Buildable (default slots onto the core)
//!     ├─► enhancer.wrap(base) ──► build ──► build(options)
//!     └─► lineage check ──► seal ──► Adapter
//!
//! Runtime flow after sealing:
//!   producer ── ingress(a) ──► IngressRegistry ──► every live queue ──► consumers
//!   enhancer ── set_ready_state op ──► machine ──► hub: "open" / "error"
//!   caller   ── close() ──► end + clear all queues
//! ```
//!
//! Internal modules:
//! - [`shared`]: the per-factory core (machine + registry + hub);
//! - [`buildable`]: pre-seal adapter with replaceable operation slots;
//! - [`adapter`]: sealed public adapter;
//! - [`factory`]: assembly, lineage validation, sealing.

mod adapter;
mod buildable;
mod factory;
mod shared;

pub use adapter::Adapter;
pub use buildable::{
    ActivitiesOp, BoxEgressFuture, Buildable, CloseOp, EgressOp, IngressOp, SetReadyStateOp,
};
pub use factory::{create_adapter, create_adapter_default};
