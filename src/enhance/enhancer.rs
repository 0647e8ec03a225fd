//! # Enhancer contract and the identity enhancer.
//!
//! An enhancer is a transform over the "build adapter from options"
//! function: it receives the next builder in the chain and returns a builder
//! with the same signature. The base builder sits innermost; each enhancer
//! wraps around it and may inspect the options, call through, replace
//! operation slots on the returned adapter, or substitute different behavior
//! entirely.
//!
//! ## Rules
//! - Builders run once per factory invocation; the chain is re-assembled for
//!   every `create_adapter` call.
//! - The base builder executes first; enhancer logic wraps around its result.
//! - [`Identity`] is the default enhancer and must be indistinguishable from
//!   omitting enhancement entirely.
//!
//! ## Example
//! ```rust
//! use patchbay::{BuildFn, Enhance, ReadyState};
//!
//! /// Marks the adapter open as soon as it is built.
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
//! ```

use crate::core::Buildable;

/// Boxed "build adapter from options" function.
///
/// `O` is the opaque options type forwarded verbatim through the chain; the
/// innermost base builder ignores it.
pub type BuildFn<T, O = ()> = Box<dyn FnOnce(O) -> Buildable<T> + Send>;

/// Contract for adapter enhancers.
///
/// `wrap` is called once per factory invocation, outermost enhancer first,
/// and must return a builder of the same shape. Implementations decide
/// whether and how to call `next`.
pub trait Enhance<T, O = ()>: Send + Sync {
    /// Wraps the next builder in the chain.
    fn wrap(&self, next: BuildFn<T, O>) -> BuildFn<T, O>;
}

/// The default enhancer: passes the builder through untouched.
///
/// ## Example
/// ```rust
/// use patchbay::{create_adapter, Identity, ReadyState};
///
/// let adapter = create_adapter::<String, _, _>((), &Identity)?;
/// assert_eq!(adapter.ready_state(), ReadyState::Connecting);
/// # Ok::<(), patchbay::SealError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl<T, O> Enhance<T, O> for Identity {
    fn wrap(&self, next: BuildFn<T, O>) -> BuildFn<T, O> {
        next
    }
}
