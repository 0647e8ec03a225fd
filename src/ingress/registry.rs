//! # Ingress fan-out - delivers each activity to every live consumer.
//!
//! The registry owns the producer halves of all outstanding `activities()`
//! subscriptions and pushes each ingressed activity to every one of them.
//!
//! ## Architecture
//! ```text
//! ingress(activity)
//!     │
//!     ├──► [queue 1] ──► stream 1 ──► consumer 1
//!     │    (unbounded)        └◄── signal 1 (optional watcher)
//!     ├──► [queue 2] ──► stream 2 ──► consumer 2
//!     │    (unbounded)
//!     └──► [queue N] ──► stream N ──► consumer N
//! ```
//!
//! ## Rules
//! - **Per-queue FIFO**: each consumer sees activities in ingress order
//! - **No cross-queue ordering**: consumer A may lag behind consumer B
//! - **Live-set only**: an activity reaches exactly the queues registered at
//!   the moment `ingress` runs; with no live queues it is silently dropped
//! - **Guarded removal**: a queue is removed at most once, whether the
//!   removal comes from its cancellation signal or from `close()`
//! - **Close drains**: `close()` ends every sequence; consumers still drain
//!   items buffered before the close. Calling `close()` again is a no-op.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use parking_lot::Mutex;

use crate::ingress::queue::{ActivityQueue, ActivityStream, SequenceConfig};

struct RegistryInner<T> {
    /// Live producer halves, in registration order.
    queues: Mutex<Vec<ActivityQueue<T>>>,
    /// Source of registry-unique queue ids.
    next_id: AtomicU64,
}

/// Fan-out coordinator for all live `activities()` subscriptions.
///
/// Cheap to clone; clones share the same live set.
pub(crate) struct IngressRegistry<T> {
    inner: Arc<RegistryInner<T>>,
}

impl<T> Clone for IngressRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> IngressRegistry<T> {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                queues: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Registers a fresh sequence and returns its consumer half.
    ///
    /// When `config` carries a cancellation signal, a watcher task removes
    /// this exact queue from the live set once the signal fires. The watcher
    /// stands down silently if the queue is already gone (closed out first).
    ///
    /// Requires a Tokio runtime when a signal is supplied; with no signal,
    /// nothing is spawned.
    pub(crate) fn subscribe(&self, config: SequenceConfig) -> ActivityStream<T> {
        let id = self.inner.next_id.fetch_add(1, AtomicOrdering::Relaxed);
        let (queue, stream) = ActivityQueue::new(id, config.signal.as_ref());
        let done = queue.done();

        self.inner.queues.lock().push(queue);

        if let Some(signal) = config.signal {
            let registry = self.clone();
            tokio::spawn(async move {
                tokio::select! {
                    _ = signal.cancelled() => registry.remove(id),
                    _ = done.cancelled() => {}
                }
            });
        }

        stream
    }

    /// Delivers `activity` to every live queue, in registration order.
    ///
    /// Never suspends. With an empty live set the activity is dropped;
    /// nothing is buffered for future subscribers.
    pub(crate) fn ingress(&self, activity: T) {
        let queues = self.inner.queues.lock();
        for queue in queues.iter() {
            queue.push(activity.clone());
        }
    }

    /// Removes one queue by id. Safe to call when the queue is already gone.
    pub(crate) fn remove(&self, id: u64) {
        let removed = {
            let mut queues = self.inner.queues.lock();
            queues
                .iter()
                .position(|q| q.id() == id)
                .map(|idx| queues.remove(idx))
        };
        // Dropping outside the lock; this cancels the queue's done token.
        drop(removed);
    }

    /// Ends every live sequence and empties the live set.
    ///
    /// Each consumer drains items buffered before the close, then its stream
    /// ends. Idempotent.
    pub(crate) fn close(&self) {
        let drained: Vec<ActivityQueue<T>> = {
            let mut queues = self.inner.queues.lock();
            queues.drain(..).collect()
        };
        drop(drained);
    }

    /// Number of live queues.
    pub(crate) fn len(&self) -> usize {
        self.inner.queues.lock().len()
    }
}
