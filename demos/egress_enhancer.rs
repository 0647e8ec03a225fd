//! # Example: egress_enhancer
//!
//! Demonstrates enhancer composition: one enhancer routes outbound delivery
//! onto a wire, another opens the lifecycle and taps notifications.
//!
//! Shows how to:
//! - Replace the failing default egress slot with [`Buildable::with_egress`].
//! - Register lifecycle listeners during composition with
//!   [`Buildable::add_event_listener`].
//! - Capture [`Buildable::set_ready_state_op`] so middleware can keep
//!   driving the state machine after the adapter is sealed.
//!
//! ## Flow
//! ```text
//! create_adapter(options, compose([lifecycle, outbound]))
//!   ├─► base builder                            Buildable, egress = NotConfigured
//!   ├─► outbound (inner)                        with_egress -> wire_tx.send
//!   ├─► lifecycle (outer)
//!   │     ├─► add_event_listener("open"/"error")
//!   │     ├─► set_ready_state(Open)             fires "open"
//!   │     └─► capture set_ready_state_op
//!   └─► seal                                    set_ready_state gone from the surface
//!
//! adapter.egress(line) ──► wire ──► remote side prints
//! captured op(Closed)  ──► fires "error" (inherited name), state = CLOSED
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example egress_enhancer
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use patchbay::{
    AdapterEvent, BuildFn, EgressError, Enhance, EnhanceFn, ListenerFn, ReadyState,
    SetReadyStateOp, compose, create_adapter, create_adapter_default,
};
use tokio::sync::mpsc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("=== egress_enhancer example ===\n");

    // 1. Without an enhancer, outbound delivery always fails.
    let bare = create_adapter_default::<String, _>(())?;
    let err = bare.egress("lost".to_owned()).await.unwrap_err();
    println!("[bare] egress failed as expected: {err}");
    assert_eq!(err, EgressError::NotConfigured);

    // 2. A channel standing in for the remote side of the wire.
    let (wire_tx, mut wire_rx) = mpsc::unbounded_channel::<String>();

    // 3. Enhancer: route egress onto the wire.
    let outbound = EnhanceFn::arc(move |next: BuildFn<String>| -> BuildFn<String> {
        let wire_tx = wire_tx.clone();
        Box::new(move |options| {
            let adapter = next(options);
            let wire_tx = wire_tx.clone();
            adapter.with_egress(move |activity: String| {
                let wire_tx = wire_tx.clone();
                Box::pin(async move {
                    wire_tx
                        .send(activity)
                        .map_err(|e| EgressError::failed(e.to_string()))
                })
            })
        })
    });

    // 4. Enhancer: tap lifecycle notifications, mark the channel open, and
    //    keep a handle on the transition op for later.
    let state_op: Arc<Mutex<Option<SetReadyStateOp>>> = Arc::new(Mutex::new(None));
    let lifecycle = {
        let slot = Arc::clone(&state_op);
        EnhanceFn::arc(move |next: BuildFn<String>| -> BuildFn<String> {
            let slot = Arc::clone(&slot);
            Box::new(move |options| {
                let adapter = next(options);
                for name in [AdapterEvent::OPEN, AdapterEvent::ERROR] {
                    adapter.add_event_listener(
                        name,
                        ListenerFn::arc(|ev: &AdapterEvent| {
                            println!("[listener] {} -> {:?}", ev.name, ev.ready_state);
                        }),
                    );
                }
                adapter
                    .set_ready_state(ReadyState::Open)
                    .expect("fresh adapter accepts open");
                *slot.lock() = Some(adapter.set_ready_state_op());
                adapter
            })
        })
    };

    // 5. Compose (first entry outermost) and build.
    let chain: Vec<Arc<dyn Enhance<String>>> = vec![lifecycle, outbound];
    let adapter = create_adapter::<String, _, _>((), &compose(chain))?;
    println!("[main] ready_state: {}", adapter.ready_state());

    // 6. Outbound delivery now lands on the wire.
    for line in ["alpha", "bravo", "charlie"] {
        adapter.egress(line.to_owned()).await?;
    }

    wire_rx.close();
    while let Some(line) = wire_rx.recv().await {
        println!("[wire] received: {line}");
    }

    // 7. The sealed adapter has no set_ready_state; only the captured op can
    //    still drive transitions. Note the inherited "error" name for the
    //    transition into CLOSED.
    let op = state_op.lock().clone().expect("captured during build");
    op(ReadyState::Closed)?;
    println!("[main] ready_state: {}", adapter.ready_state());

    println!("\n=== example completed successfully ===");
    Ok(())
}
