//! # Chain composition - folds many enhancers into one.
//!
//! [`compose`] turns a list of enhancers into a single [`Composed`] value
//! implementing [`Enhance`]. List order is outermost-first: for
//! `compose(vec![f, g])`, the effective builder is `f.wrap(g.wrap(base))`,
//! so `f`'s build logic sees the options first and the base builder still
//! executes innermost.
//!
//! An empty list behaves exactly like [`Identity`](crate::enhance::Identity).
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use patchbay::{compose, create_adapter, BuildFn, Enhance, EnhanceFn};
//!
//! let chain: Vec<Arc<dyn Enhance<String>>> = vec![
//!     EnhanceFn::arc(|next: BuildFn<String>| -> BuildFn<String> {
//!         Box::new(move |options| next(options))
//!     }),
//!     EnhanceFn::arc(|next: BuildFn<String>| -> BuildFn<String> {
//!         Box::new(move |options| next(options))
//!     }),
//! ];
//!
//! let adapter = create_adapter::<String, _, _>((), &compose(chain))?;
//! # drop(adapter);
//! # Ok::<(), patchbay::SealError>(())
//! ```

use std::sync::Arc;

use crate::enhance::enhancer::{BuildFn, Enhance};

/// Folds `enhancers` into a single enhancer, outermost-first.
pub fn compose<T, O>(enhancers: Vec<Arc<dyn Enhance<T, O>>>) -> Composed<T, O> {
    Composed { chain: enhancers }
}

/// A linear enhancer chain produced by [`compose`].
pub struct Composed<T, O = ()> {
    chain: Vec<Arc<dyn Enhance<T, O>>>,
}

impl<T, O> Composed<T, O> {
    /// Number of links in the chain.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

impl<T, O> Enhance<T, O> for Composed<T, O>
where
    T: 'static,
    O: 'static,
{
    fn wrap(&self, next: BuildFn<T, O>) -> BuildFn<T, O> {
        // Right-to-left fold keeps the first list entry outermost.
        self.chain.iter().rev().fold(next, |acc, e| e.wrap(acc))
    }
}
