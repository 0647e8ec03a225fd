//! # Example: basic_fan_out
//!
//! Demonstrates the core delivery contract: one inbound activity reaches
//! every live consumer sequence exactly once, in arrival order.
//!
//! Shows how to:
//! - Build an adapter with no enhancers via [`create_adapter_default`].
//! - Open independent consumer sequences with [`Adapter::activities`].
//! - Push activities with [`Adapter::ingress`] and drain after
//!   [`Adapter::close`].
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► create_adapter_default()               ready_state = CONNECTING
//!   ├─► activities() x2                        audit + mirror join
//!   ├─► ingress("hello")                       both queues buffer it
//!   ├─► activities()                           late joins (misses "hello")
//!   ├─► ingress("world")                       all three queues buffer it
//!   ├─► close()                                every queue ends after its buffer
//!   └─► drain audit / mirror / late
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic_fan_out
//! ```

use futures::StreamExt;
use patchbay::{ReadyState, SequenceConfig, create_adapter_default};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("=== basic_fan_out example ===\n");

    // 1. Identity build: no enhancers, default operation set.
    let adapter = create_adapter_default::<String, _>(())?;
    println!("[main] ready_state: {}", adapter.ready_state());
    assert_eq!(adapter.ready_state(), ReadyState::Connecting);

    // 2. Two consumers join before the first activity.
    let mut audit = adapter.activities(SequenceConfig::new());
    let mut mirror = adapter.activities(SequenceConfig::new());

    adapter.ingress("hello".to_owned());

    // 3. A consumer that joins later misses what came before it.
    let mut late = adapter.activities(SequenceConfig::new());
    adapter.ingress("world".to_owned());

    // 4. Close: every sequence drains its buffer, then ends.
    adapter.close();

    // 5. The three streams are fully independent; drain them one by one.
    while let Some(activity) = audit.next().await {
        println!("[audit]  {activity}");
    }
    while let Some(activity) = mirror.next().await {
        println!("[mirror] {activity}");
    }
    while let Some(activity) = late.next().await {
        println!("[late]   {activity}");
    }

    println!("\n=== example completed successfully ===");
    Ok(())
}
