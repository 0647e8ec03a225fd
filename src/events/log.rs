//! # Simple logging listener for debugging and demos.
//!
//! [`LogListener`] prints dispatched events to stdout in a human-readable
//! format. This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [open] seq=3 ready_state=OPEN
//! [error] seq=4 ready_state=CLOSED
//! [custom] seq=5
//! ```
//!
//! ## Example
//! ```no_run
//! # use std::sync::Arc;
//! # use patchbay::{AdapterEvent, LogListener, NotificationHub};
//! let hub = NotificationHub::new();
//! hub.add_listener("open", Arc::new(LogListener));
//! hub.add_listener("error", Arc::new(LogListener));
//! ```

use crate::events::{AdapterEvent, Listener};

/// Simple stdout logging listener.
///
/// Enabled via the `logging` feature. Prints human-readable event lines to
/// stdout for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Listener`] for
/// structured logging or metrics collection.
pub struct LogListener;

impl Listener for LogListener {
    fn handle(&self, e: &AdapterEvent) {
        match e.ready_state {
            Some(state) => println!("[{}] seq={} ready_state={}", e.name, e.seq, state),
            None => println!("[{}] seq={}", e.name, e.seq),
        }
    }
}
