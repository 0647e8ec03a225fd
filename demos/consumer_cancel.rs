//! # Example: consumer_cancel
//!
//! Demonstrates per-consumer cancellation: ending one sequence never
//! disturbs the others.
//!
//! Shows how to:
//! - Bind a sequence to a [`CancellationToken`] via
//!   [`SequenceConfig::with_signal`].
//! - Cancel one consumer while another keeps receiving.
//! - End everything with [`Adapter::close`].
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► activities(signal: stop_a) ──► consumer A task
//!   ├─► activities()               ──► consumer B task
//!   ├─► ingress(tick 1..3)             both consumers print
//!   ├─► stop_a.cancel()                A's stream ends, B unaffected
//!   ├─► ingress(tick 4..5)             only B prints
//!   └─► close()                        B drains and ends
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example consumer_cancel
//! ```

use std::time::Duration;

use futures::StreamExt;
use patchbay::{SequenceConfig, create_adapter_default};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("=== consumer_cancel example ===\n");

    // 1. Plain adapter; fan-out needs no enhancers.
    let adapter = create_adapter_default::<String, _>(())?;

    // 2. Consumer A is bound to a cancellation token.
    let stop_a = CancellationToken::new();
    let mut seq_a = adapter.activities(SequenceConfig::new().with_signal(stop_a.clone()));
    let consumer_a = tokio::spawn(async move {
        let mut seen = 0u32;
        while let Some(activity) = seq_a.next().await {
            seen += 1;
            println!("[consumer-a] {activity}");
        }
        println!("[consumer-a] sequence ended after {seen} activities");
        seen
    });

    // 3. Consumer B runs until the adapter closes.
    let mut seq_b = adapter.activities(SequenceConfig::new());
    let consumer_b = tokio::spawn(async move {
        let mut seen = 0u32;
        while let Some(activity) = seq_b.next().await {
            seen += 1;
            println!("[consumer-b] {activity}");
        }
        println!("[consumer-b] sequence ended after {seen} activities");
        seen
    });

    // 4. Both consumers receive the first burst.
    for n in 1..=3 {
        adapter.ingress(format!("tick #{n}"));
    }
    tokio::time::sleep(Duration::from_millis(50)).await;

    // 5. Cancel consumer A; its stream ends, B keeps flowing.
    println!("\n[main] cancelling consumer A\n");
    stop_a.cancel();
    tokio::time::sleep(Duration::from_millis(50)).await;

    for n in 4..=5 {
        adapter.ingress(format!("tick #{n}"));
    }
    tokio::time::sleep(Duration::from_millis(50)).await;

    // 6. Close the channel; consumer B drains whatever is left, then ends.
    println!("\n[main] closing the channel\n");
    adapter.close();

    let (seen_a, seen_b) = (consumer_a.await?, consumer_b.await?);
    assert_eq!(seen_a, 3, "A saw only the burst before cancel");
    assert_eq!(seen_b, 5, "B saw every activity");

    println!("\n=== example completed successfully ===");
    Ok(())
}
