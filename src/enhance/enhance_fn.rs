//! # Function-backed enhancer (`EnhanceFn`)
//!
//! [`EnhanceFn`] wraps a plain closure `F: Fn(BuildFn) -> BuildFn` so one-off
//! enhancers do not need a named type.
//!
//! ## Example
//! ```rust
//! use patchbay::{BuildFn, EnhanceFn, Enhance, create_adapter};
//!
//! let tap = EnhanceFn::new(|next: BuildFn<String>| -> BuildFn<String> {
//!     Box::new(move |options| {
//!         // inspect options here, then build through
//!         next(options)
//!     })
//! });
//!
//! let adapter = create_adapter::<String, _, _>((), &tap)?;
//! # drop(adapter);
//! # Ok::<(), patchbay::SealError>(())
//! ```

use std::sync::Arc;

use crate::enhance::enhancer::{BuildFn, Enhance};

/// Function-backed enhancer implementation.
///
/// Wraps a closure that transforms the next builder in the chain.
#[derive(Debug)]
pub struct EnhanceFn<F> {
    f: F,
}

impl<F> EnhanceFn<F> {
    /// Creates a new function-backed enhancer.
    ///
    /// Prefer [`EnhanceFn::arc`] when building a chain for
    /// [`compose`](crate::enhance::compose).
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the enhancer and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

impl<T, O, F> Enhance<T, O> for EnhanceFn<F>
where
    F: Fn(BuildFn<T, O>) -> BuildFn<T, O> + Send + Sync,
{
    fn wrap(&self, next: BuildFn<T, O>) -> BuildFn<T, O> {
        (self.f)(next)
    }
}
