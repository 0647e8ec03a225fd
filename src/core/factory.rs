//! # Factory: build, enhance, validate, seal.
//!
//! [`create_adapter`] is the single entry point. It assembles the base
//! builder around a fresh core, hands it to the enhancer, invokes the
//! resulting builder with the options, validates the result's lineage and
//! seals it into the public [`Adapter`].
//!
//! ## Architecture
//! ```text
//! create_adapter(options, enhancer)
//!     │
//!     ├─ core = AdapterCore::new()                    (machine/registry/hub)
//!     ├─ base = |_options| Buildable::with_core(core) (default slots)
//!     ├─ build = enhancer.wrap(base)                  (chain assembly)
//!     ├─ buildable = build(options)                   (base runs innermost)
//!     ├─ lineage check: buildable.core is THIS core, else ForeignAdapter
//!     └─ buildable.seal() ──► Adapter                 (set_ready_state dropped)
//! ```
//!
//! ## Rules
//! - The factory retains no reference to the sealed adapter.
//! - An enhancer may capture op slots during composition and keep using
//!   them after sealing; that is the only post-seal path to
//!   `set_ready_state`.
//! - A builder that swaps in a foreign buildable (one not descended from
//!   this factory's base) fails the whole construction; no adapter escapes.

use std::sync::Arc;

use crate::core::adapter::Adapter;
use crate::core::buildable::Buildable;
use crate::core::shared::AdapterCore;
use crate::enhance::{BuildFn, Enhance, Identity};
use crate::error::SealError;

/// Builds an adapter, runs it through `enhancer`, validates and seals it.
///
/// `options` is opaque to the core: it is forwarded verbatim to the builder
/// chain, where enhancers may inspect it. The base builder ignores it.
///
/// # Errors
/// [`SealError::ForeignAdapter`] if the chain returned a buildable that was
/// not produced by this factory's own base builder.
///
/// # Example
/// ```rust
/// use patchbay::{create_adapter, BuildFn, Enhance, ReadyState};
///
/// struct OpenImmediately;
///
/// impl<T: Clone + Send + 'static> Enhance<T> for OpenImmediately {
///     fn wrap(&self, next: BuildFn<T>) -> BuildFn<T> {
///         Box::new(move |options| {
///             let adapter = next(options);
///             let _ = adapter.set_ready_state(ReadyState::Open);
///             adapter
///         })
///     }
/// }
///
/// let adapter = create_adapter::<String, _, _>((), &OpenImmediately)?;
/// assert_eq!(adapter.ready_state(), ReadyState::Open);
/// # Ok::<(), patchbay::SealError>(())
/// ```
pub fn create_adapter<T, O, E>(options: O, enhancer: &E) -> Result<Adapter<T>, SealError>
where
    T: Clone + Send + 'static,
    O: 'static,
    E: Enhance<T, O> + ?Sized,
{
    let core = AdapterCore::new();

    let base: BuildFn<T, O> = {
        let core = Arc::clone(&core);
        Box::new(move |_options| Buildable::with_core(core))
    };

    let build = enhancer.wrap(base);
    let buildable = build(options);

    if !Arc::ptr_eq(buildable.core(), &core) {
        return Err(SealError::ForeignAdapter);
    }

    Ok(buildable.seal())
}

/// [`create_adapter`] with the [`Identity`] enhancer.
pub fn create_adapter_default<T, O>(options: O) -> Result<Adapter<T>, SealError>
where
    T: Clone + Send + 'static,
    O: 'static,
{
    create_adapter(options, &Identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    use futures::StreamExt;

    use crate::core::buildable::SetReadyStateOp;
    use crate::enhance::EnhanceFn;
    use crate::error::{EgressError, StateError};
    use crate::ingress::SequenceConfig;
    use crate::state::ReadyState;

    #[tokio::test]
    async fn test_identity_build_yields_working_channel() {
        let adapter = create_adapter::<&str, _, _>((), &Identity).unwrap();
        let mut stream = adapter.activities(SequenceConfig::new());

        adapter.ingress("one");
        adapter.close();

        assert_eq!(stream.next().await, Some("one"));
        assert_eq!(stream.next().await, None);
        assert_eq!(adapter.ready_state(), ReadyState::Connecting);
    }

    #[tokio::test]
    async fn test_identity_egress_is_not_configured() {
        let adapter = create_adapter_default::<&str, _>(()).unwrap();
        assert_eq!(
            adapter.egress("out").await,
            Err(EgressError::NotConfigured)
        );
    }

    #[test]
    fn test_enhancer_sees_the_options() {
        let enhancer = EnhanceFn::new(|next: BuildFn<String, u32>| -> BuildFn<String, u32> {
            Box::new(move |options| {
                assert_eq!(options, 42);
                next(options)
            })
        });

        assert!(create_adapter::<String, _, _>(42u32, &enhancer).is_ok());
    }

    #[test]
    fn test_foreign_buildable_fails_the_seal() {
        let substitute = EnhanceFn::new(|_next: BuildFn<String>| -> BuildFn<String> {
            Box::new(|_options| Buildable::detached())
        });

        let result = create_adapter::<String, _, _>((), &substitute);
        assert!(matches!(result, Err(SealError::ForeignAdapter)));
    }

    #[test]
    fn test_captured_op_drives_the_sealed_adapter() {
        let slot: Arc<parking_lot::Mutex<Option<SetReadyStateOp>>> =
            Arc::new(parking_lot::Mutex::new(None));

        let slot_in = Arc::clone(&slot);
        let enhancer = EnhanceFn::new(move |next: BuildFn<String>| -> BuildFn<String> {
            let slot_in = Arc::clone(&slot_in);
            Box::new(move |options| {
                let adapter = next(options);
                // keep the middleware-only op for use after sealing
                *slot_in.lock() = Some(adapter.set_ready_state_op());
                adapter
            })
        });

        let adapter = create_adapter::<String, _, _>((), &enhancer).unwrap();
        assert_eq!(adapter.ready_state(), ReadyState::Connecting);

        let op = slot.lock().take().unwrap();
        op(ReadyState::Open).unwrap();
        assert_eq!(adapter.ready_state(), ReadyState::Open);

        op(ReadyState::Closed).unwrap();
        assert_eq!(op(ReadyState::Open), Err(StateError::Terminal));
        assert_eq!(adapter.ready_state(), ReadyState::Closed);
    }
}
