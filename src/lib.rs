//! # patchbay
//!
//! **Patchbay** is a bidirectional, multi-consumer activity channel for Rust.
//!
//! It decouples producers of discrete messages ("activities") from any number
//! of independent consumers, exposes a connection-like lifecycle
//! (connecting/open/closed), and lets middleware ("enhancers") intercept,
//! transform, or replace both the inbound (ingress) and outbound (egress)
//! paths before the adapter is handed to callers.
//!
//! ## Architecture
//! ### Overview
//! ```text
//! options ──► create_adapter(options, enhancer)
//!                 │
//!                 │   ┌────────────────────────────────┐
//!                 ├──►│ AdapterCore (Arc-shared)       │
//!                 │   │  - ReadyStateMachine           │
//!                 │   │  - IngressRegistry<T>          │
//!                 │   │  - NotificationHub             │
//!                 │   └────────────────────────────────┘
//!                 ├──► base builder ──► Buildable (all operation slots)
//!                 ├──► enhancer.wrap(base) ──► build(options)
//!                 └──► lineage check ──► seal ──► Adapter (public set only)
//!
//! Runtime flow:
//!   producer ── ingress(a) ──► IngressRegistry ──┬──► [queue 1] ──► consumer 1
//!                                                ├──► [queue 2] ──► consumer 2
//!                                                └──► [queue N] ──► consumer N
//!   enhancer ── set_ready_state ──► machine ──► hub ──► "open"/"error" listeners
//!   caller   ── close() ──► end + clear every live queue (consumers drain)
//!   caller   ── egress(a) ──► enhancer-supplied slot (fails by default)
//! ```
//!
//! ### Lifecycle
//! ```text
//! CONNECTING (initial) ◄──────► OPEN
//!       │                        │
//!       └────────► CLOSED ◄──────┘        (terminal, no way out)
//!
//! Applied transition into OPEN fires "open"; every other applied transition
//! fires "error" - including the one into CLOSED (inherited naming, kept).
//! Same-state calls apply nothing and fire nothing.
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                          |
//! |-------------------|---------------------------------------------------------------|---------------------------------------------|
//! | **Factory**       | Build, enhance, validate and seal adapters.                   | [`create_adapter`], [`Identity`]            |
//! | **Enhancers**     | Wrap or replace any operation slot before sealing.            | [`Enhance`], [`EnhanceFn`], [`compose`]     |
//! | **Fan-out**       | Deliver each inbound activity to every live consumer.         | [`ActivityStream`], [`SequenceConfig`]      |
//! | **Lifecycle**     | Connection-like ready state with notifications.               | [`ReadyState`], [`AdapterEvent`]            |
//! | **Notifications** | Named listeners, synchronous dispatch.                        | [`NotificationHub`], [`Listener`]           |
//! | **Errors**        | Typed errors per failure site.                                | [`StateError`], [`EgressError`], [`SealError`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogListener`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use futures::StreamExt;
//! use patchbay::{create_adapter, BuildFn, Enhance, ReadyState, SequenceConfig};
//!
//! /// Marks the channel open as soon as it is built.
//! struct OpenOnBuild;
//!
//! impl<T: Clone + Send + 'static> Enhance<T> for OpenOnBuild {
//!     fn wrap(&self, next: BuildFn<T>) -> BuildFn<T> {
//!         Box::new(move |options| {
//!             let adapter = next(options);
//!             let _ = adapter.set_ready_state(ReadyState::Open);
//!             adapter
//!         })
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = create_adapter::<String, _, _>((), &OpenOnBuild)?;
//!     assert_eq!(adapter.ready_state(), ReadyState::Open);
//!
//!     // Each consumer gets its own independent stream.
//!     let mut inbound = adapter.activities(SequenceConfig::new());
//!
//!     adapter.ingress("first".to_owned());
//!     adapter.ingress("second".to_owned());
//!     adapter.close();
//!
//!     while let Some(activity) = inbound.next().await {
//!         println!("received: {activity}");
//!     }
//!     Ok(())
//! }
//! ```
mod core;
mod enhance;
mod error;
mod events;
mod ingress;
mod state;

// ---- Public re-exports ----

pub use core::{
    ActivitiesOp, Adapter, BoxEgressFuture, Buildable, CloseOp, EgressOp, IngressOp,
    SetReadyStateOp, create_adapter, create_adapter_default,
};
pub use enhance::{BuildFn, Composed, Enhance, EnhanceFn, Identity, compose};
pub use error::{EgressError, SealError, StateError};
pub use events::{AdapterEvent, Listener, ListenerFn, ListenerRef, NotificationHub};
pub use ingress::{ActivityStream, SequenceConfig};
pub use state::ReadyState;

// Optional: expose a simple built-in logging listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use events::LogListener;
