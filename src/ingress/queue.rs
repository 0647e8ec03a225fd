//! # Per-consumer activity queue and its consumer-facing stream.
//!
//! Each call to `activities()` creates one [`ActivityQueue`] (the producer
//! half, owned by the registry) paired with one [`ActivityStream`] (the
//! consumer half, returned to the caller). The pair is backed by an unbounded
//! channel so pushing never suspends the producer and nothing is dropped
//! while the sequence is live.
//!
//! ## Rules
//! - A pending `next()` resolves on exactly one of three conditions: an
//!   activity arrives, the queue is dropped (stream drains buffered items,
//!   then ends), or the cancellation signal fires (stream ends immediately,
//!   skipping anything still buffered).
//! - Dropping the queue cancels its `done` token so the registry's signal
//!   watcher can stand down.
//! - After the stream has ended it stays ended; polling again keeps
//!   returning `None`.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

/// Per-subscription options for `activities()`.
///
/// ## Example
/// ```rust
/// use tokio_util::sync::CancellationToken;
/// use patchbay::SequenceConfig;
///
/// let stop = CancellationToken::new();
/// let config = SequenceConfig::new().with_signal(stop.clone());
/// assert!(config.signal.is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SequenceConfig {
    /// Cancellation signal bound to this subscription only. Firing it ends
    /// the returned stream and removes it from delivery.
    pub signal: Option<CancellationToken>,
}

impl SequenceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a cancellation signal to the subscription.
    pub fn with_signal(mut self, signal: CancellationToken) -> Self {
        self.signal = Some(signal);
        self
    }
}

/// Producer half of one consumer's sequence. Owned by the registry.
pub(crate) struct ActivityQueue<T> {
    /// Registry-unique id, used for guarded removal.
    id: u64,
    /// Sender feeding the paired [`ActivityStream`].
    tx: mpsc::UnboundedSender<T>,
    /// Cancelled on drop; releases the signal watcher for this queue.
    done: CancellationToken,
}

impl<T> ActivityQueue<T> {
    /// Creates the queue plus its paired consumer stream.
    ///
    /// `signal` is observed by the stream directly: when it fires, a pending
    /// wait terminates without waiting for the registry to catch up.
    pub(crate) fn new(id: u64, signal: Option<&CancellationToken>) -> (Self, ActivityStream<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let stream = ActivityStream {
            rx,
            cancel: signal.map(|s| Box::pin(s.clone().cancelled_owned())),
            ended: false,
        };
        let queue = Self {
            id,
            tx,
            done: CancellationToken::new(),
        };
        (queue, stream)
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Delivers one activity. Returns `false` if the consumer dropped its
    /// stream; the activity is discarded in that case.
    pub(crate) fn push(&self, activity: T) -> bool {
        self.tx.send(activity).is_ok()
    }

    /// Token cancelled when this queue is dropped (removed or closed out).
    pub(crate) fn done(&self) -> CancellationToken {
        self.done.clone()
    }
}

impl<T> Drop for ActivityQueue<T> {
    fn drop(&mut self) {
        self.done.cancel();
    }
}

/// Consumer half of one subscription: a lazy, finite-until-ended sequence of
/// activities.
///
/// Returned by `activities()`. Activities arrive in ingress order. The
/// stream ends when the adapter is closed (after draining buffered items) or
/// when the bound cancellation signal fires (immediately, buffered items are
/// skipped).
pub struct ActivityStream<T> {
    rx: mpsc::UnboundedReceiver<T>,
    cancel: Option<Pin<Box<WaitForCancellationFutureOwned>>>,
    ended: bool,
}

impl<T> Stream for ActivityStream<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let this = self.get_mut();
        if this.ended {
            return Poll::Ready(None);
        }

        // Cancellation wins over buffered items: an aborted consumer stops
        // observing activities at once.
        if let Some(cancel) = this.cancel.as_mut() {
            if cancel.as_mut().poll(cx).is_ready() {
                this.ended = true;
                this.cancel = None;
                this.rx.close();
                return Poll::Ready(None);
            }
        }

        match this.rx.poll_recv(cx) {
            Poll::Ready(None) => {
                this.ended = true;
                this.cancel = None;
                Poll::Ready(None)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use futures::StreamExt;

    #[tokio::test]
    async fn test_push_then_recv_preserves_order() {
        let (queue, mut stream) = ActivityQueue::new(0, None);

        assert!(queue.push("a"));
        assert!(queue.push("b"));

        assert_eq!(stream.next().await, Some("a"));
        assert_eq!(stream.next().await, Some("b"));
    }

    #[tokio::test]
    async fn test_dropping_queue_drains_then_ends() {
        let (queue, mut stream) = ActivityQueue::new(0, None);

        queue.push("buffered");
        drop(queue);

        assert_eq!(stream.next().await, Some("buffered"));
        assert_eq!(stream.next().await, None);
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn test_cancel_ends_immediately_and_skips_buffer() {
        let signal = CancellationToken::new();
        let (queue, mut stream) = ActivityQueue::new(0, Some(&signal));

        queue.push("never seen");
        signal.cancel();

        assert_eq!(stream.next().await, None);
        drop(queue);
    }

    #[tokio::test]
    async fn test_cancel_wakes_a_pending_wait() {
        let signal = CancellationToken::new();
        let (_queue, mut stream) = ActivityQueue::<&str>::new(0, Some(&signal));

        let waiter = tokio::spawn(async move { stream.next().await });
        tokio::task::yield_now().await;

        signal.cancel();
        assert_eq!(waiter.await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_push_after_consumer_drop_reports_gone() {
        let (queue, stream) = ActivityQueue::new(0, None);
        drop(stream);

        assert!(!queue.push("lost"));
    }

    #[tokio::test]
    async fn test_done_token_fires_on_drop() {
        let (queue, _stream) = ActivityQueue::<&str>::new(7, None);
        let done = queue.done();

        assert!(!done.is_cancelled());
        drop(queue);
        assert!(done.is_cancelled());
    }
}
