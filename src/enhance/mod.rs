//! Enhancer composition: the middleware seam of the adapter.
//!
//! ## Contents
//! - [`BuildFn`] boxed "build adapter from options" function
//! - [`Enhance`] enhancer contract, [`Identity`] the default
//! - [`EnhanceFn`] closure adapter for one-off enhancers
//! - [`compose`], [`Composed`] fold a list of enhancers into one
//!
//! ## Quick reference
//! The factory hands the base builder to the enhancer's `wrap`; the returned
//! builder is invoked with the options and must yield the adapter to seal.
//! Composition order is outermost-first; the base builder always executes
//! innermost.

mod compose;
mod enhance_fn;
mod enhancer;

pub use compose::{Composed, compose};
pub use enhance_fn::EnhanceFn;
pub use enhancer::{BuildFn, Enhance, Identity};
