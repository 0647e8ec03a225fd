//! Ingress side: per-consumer queues and the fan-out registry.
//!
//! ## Contents
//! - [`SequenceConfig`] per-subscription options (cancellation signal)
//! - [`ActivityStream`] lazy sequence returned by `activities()`
//! - `ActivityQueue` producer half of one subscription (crate-internal)
//! - `IngressRegistry` live set of producer halves (crate-internal)
//!
//! ## Quick reference
//! - **Producers**: `ingress(activity)` fans out to every live queue.
//! - **Consumers**: each `activities()` call yields one independent
//!   [`ActivityStream`]; cancelling one never disturbs another.

mod queue;
mod registry;

pub use queue::{ActivityStream, SequenceConfig};

pub(crate) use registry::IngressRegistry;
