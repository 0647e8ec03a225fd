// End-to-end tests for the factory pipeline: build → enhance → seal, then
// fan-out delivery, lifecycle notifications, and consumer cancellation.
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use patchbay::{
    AdapterEvent, BuildFn, Buildable, EgressError, Enhance, EnhanceFn, ListenerFn, ReadyState,
    SealError, SequenceConfig, SetReadyStateOp, StateError, compose, create_adapter,
    create_adapter_default,
};

// ── Test fixtures ──

/// Captures the middleware-only set-ready-state op during composition, so
/// tests can drive transitions on the sealed adapter.
struct CaptureLifecycle {
    op: Arc<Mutex<Option<SetReadyStateOp>>>,
}

impl CaptureLifecycle {
    fn new() -> Self {
        Self {
            op: Arc::new(Mutex::new(None)),
        }
    }

    fn op(&self) -> SetReadyStateOp {
        self.op.lock().clone().expect("op captured during build")
    }
}

impl<T: Clone + Send + 'static> Enhance<T> for CaptureLifecycle {
    fn wrap(&self, next: BuildFn<T>) -> BuildFn<T> {
        let slot = Arc::clone(&self.op);
        Box::new(move |options| {
            let adapter = next(options);
            *slot.lock() = Some(adapter.set_ready_state_op());
            adapter
        })
    }
}

/// Records every `"open"` / `"error"` notification with its attached state.
fn record_lifecycle(
    adapter: &patchbay::Adapter<&'static str>,
) -> Arc<Mutex<Vec<(String, Option<ReadyState>)>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    for name in [AdapterEvent::OPEN, AdapterEvent::ERROR] {
        let log_in = Arc::clone(&log);
        adapter.add_event_listener(
            name,
            ListenerFn::arc(move |ev: &AdapterEvent| {
                log_in.lock().push((ev.name.to_string(), ev.ready_state));
            }),
        );
    }
    log
}

/// Awaits the next stream item behind a guard so a regression cannot hang
/// the whole suite.
async fn next_within<T: Clone + Send + 'static>(
    stream: &mut patchbay::ActivityStream<T>,
) -> Option<T> {
    tokio::time::timeout(Duration::from_secs(1), stream.next())
        .await
        .expect("stream wait timed out")
}

// ── Lifecycle ──

#[tokio::test]
async fn test_closed_is_terminal_for_every_target() {
    let lifecycle = CaptureLifecycle::new();
    let adapter = create_adapter::<&str, _, _>((), &lifecycle).unwrap();
    let op = lifecycle.op();

    op(ReadyState::Open).unwrap();
    op(ReadyState::Closed).unwrap();

    assert_eq!(op(ReadyState::Open), Err(StateError::Terminal));
    assert_eq!(op(ReadyState::Connecting), Err(StateError::Terminal));
    assert_eq!(adapter.ready_state(), ReadyState::Closed);
}

#[tokio::test]
async fn test_open_and_error_notifications_fire_exactly_once() {
    let lifecycle = CaptureLifecycle::new();
    let adapter = create_adapter::<&str, _, _>((), &lifecycle).unwrap();
    let log = record_lifecycle(&adapter);
    let op = lifecycle.op();

    op(ReadyState::Open).unwrap();
    assert_eq!(adapter.ready_state(), ReadyState::Open);

    op(ReadyState::Closed).unwrap();
    assert_eq!(adapter.ready_state(), ReadyState::Closed);

    assert_eq!(
        *log.lock(),
        vec![
            ("open".to_owned(), Some(ReadyState::Open)),
            ("error".to_owned(), Some(ReadyState::Closed)),
        ]
    );
}

#[tokio::test]
async fn test_same_state_transition_is_silent() {
    let lifecycle = CaptureLifecycle::new();
    let adapter = create_adapter::<&str, _, _>((), &lifecycle).unwrap();
    let log = record_lifecycle(&adapter);
    let op = lifecycle.op();

    op(ReadyState::Connecting).unwrap();

    assert!(log.lock().is_empty());
    assert_eq!(adapter.ready_state(), ReadyState::Connecting);
}

// ── Fan-out ──

#[tokio::test]
async fn test_one_ingress_reaches_every_live_stream_exactly_once() {
    let adapter = create_adapter_default::<&str, _>(()).unwrap();

    let mut streams: Vec<_> = (0..3)
        .map(|_| adapter.activities(SequenceConfig::new()))
        .collect();

    adapter.ingress("a");
    adapter.ingress("b");
    adapter.close();

    for stream in &mut streams {
        assert_eq!(next_within(stream).await, Some("a"));
        assert_eq!(next_within(stream).await, Some("b"));
        assert_eq!(next_within(stream).await, None);
    }
}

#[tokio::test]
async fn test_cancelling_one_consumer_leaves_the_rest_flowing() {
    let adapter = create_adapter_default::<&str, _>(()).unwrap();
    let stop = CancellationToken::new();

    let mut doomed = adapter.activities(SequenceConfig::new().with_signal(stop.clone()));
    let mut kept = adapter.activities(SequenceConfig::new());

    adapter.ingress("before");
    assert_eq!(next_within(&mut kept).await, Some("before"));

    stop.cancel();
    assert_eq!(next_within(&mut doomed).await, None);

    adapter.ingress("after");
    assert_eq!(next_within(&mut kept).await, Some("after"));
}

#[tokio::test]
async fn test_close_drains_then_ends_and_is_idempotent() {
    let adapter = create_adapter_default::<&str, _>(()).unwrap();
    let mut stream = adapter.activities(SequenceConfig::new());

    adapter.ingress("buffered");
    adapter.close();
    adapter.close();

    assert_eq!(next_within(&mut stream).await, Some("buffered"));
    assert_eq!(next_within(&mut stream).await, None);

    // A stream opened after close sees an empty, already-ended channel only
    // once the adapter closes again; until then it is simply live.
    let mut late = adapter.activities(SequenceConfig::new());
    adapter.ingress("reopened flow");
    adapter.close();
    assert_eq!(next_within(&mut late).await, Some("reopened flow"));
    assert_eq!(next_within(&mut late).await, None);
}

#[tokio::test]
async fn test_activities_made_after_ingress_miss_earlier_items() {
    let adapter = create_adapter_default::<&str, _>(()).unwrap();

    let mut early = adapter.activities(SequenceConfig::new());
    adapter.ingress("first");

    let mut late = adapter.activities(SequenceConfig::new());
    adapter.ingress("second");
    adapter.close();

    assert_eq!(next_within(&mut early).await, Some("first"));
    assert_eq!(next_within(&mut early).await, Some("second"));
    assert_eq!(next_within(&mut late).await, Some("second"));
    assert_eq!(next_within(&mut late).await, None);
}

// ── Egress ──

#[tokio::test]
async fn test_default_egress_always_not_configured() {
    let adapter = create_adapter_default::<&str, _>(()).unwrap();

    assert_eq!(adapter.egress("one").await, Err(EgressError::NotConfigured));
    assert_eq!(adapter.egress("two").await, Err(EgressError::NotConfigured));
}

#[tokio::test]
async fn test_enhancer_supplied_egress_replaces_the_stub() {
    let sent: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let sent_in = Arc::clone(&sent);
    let outbound = EnhanceFn::new(move |next: BuildFn<String>| -> BuildFn<String> {
        let sent_in = Arc::clone(&sent_in);
        Box::new(move |options| {
            let adapter = next(options);
            adapter.with_egress(move |activity: String| {
                let sent_in = Arc::clone(&sent_in);
                Box::pin(async move {
                    sent_in.lock().push(activity);
                    Ok(())
                })
            })
        })
    });

    let adapter = create_adapter::<String, _, _>((), &outbound).unwrap();

    adapter.egress("out there".to_owned()).await.unwrap();
    assert_eq!(*sent.lock(), vec!["out there".to_owned()]);
}

// ── Sealing ──

#[tokio::test]
async fn test_sealed_surface_drives_state_only_through_captured_op() {
    // The sealed type has no set_ready_state method at all; the only way to
    // reach the machine afterwards is an op captured during composition.
    let lifecycle = CaptureLifecycle::new();
    let adapter = create_adapter::<&str, _, _>((), &lifecycle).unwrap();

    lifecycle.op()(ReadyState::Open).unwrap();
    assert_eq!(adapter.ready_state(), ReadyState::Open);
}

#[tokio::test]
async fn test_enhancer_substituting_a_foreign_adapter_fails() {
    let substitute = EnhanceFn::new(|_next: BuildFn<String>| -> BuildFn<String> {
        Box::new(|_options| Buildable::detached())
    });

    let result = create_adapter::<String, _, _>((), &substitute);
    assert!(matches!(result, Err(SealError::ForeignAdapter)));
}

// ── Composition ──

#[tokio::test]
async fn test_composed_chain_transforms_ingress_outermost_first() {
    fn tagging(tag: &'static str) -> Arc<dyn Enhance<String>> {
        EnhanceFn::arc(move |next: BuildFn<String>| -> BuildFn<String> {
            Box::new(move |options| {
                let adapter = next(options);
                let inner = adapter.ingress_op();
                adapter.with_ingress(move |activity: String| inner(format!("{tag}({activity})")))
            })
        })
    }

    let chain = compose(vec![tagging("outer"), tagging("inner")]);
    let adapter = create_adapter::<String, _, _>((), &chain).unwrap();

    let mut stream = adapter.activities(SequenceConfig::new());
    adapter.ingress("x".to_owned());
    adapter.close();

    // The outer enhancer's transform applies first on the way in.
    assert_eq!(
        next_within(&mut stream).await,
        Some("inner(outer(x))".to_owned())
    );
}

#[tokio::test]
async fn test_listeners_registered_during_composition_see_lifecycle() {
    let heard: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let heard_in = Arc::clone(&heard);
    let wiretap = EnhanceFn::arc(move |next: BuildFn<&'static str>| -> BuildFn<&'static str> {
        let heard_in = Arc::clone(&heard_in);
        Box::new(move |options| {
            let adapter = next(options);
            let heard_in = Arc::clone(&heard_in);
            adapter.add_event_listener(
                AdapterEvent::OPEN,
                ListenerFn::arc(move |ev: &AdapterEvent| {
                    heard_in.lock().push(ev.name.to_string());
                }),
            );
            adapter
        })
    });

    let lifecycle = CaptureLifecycle::new();
    let op_slot = Arc::clone(&lifecycle.op);
    let chain: Vec<Arc<dyn Enhance<&'static str>>> = vec![wiretap, Arc::new(lifecycle)];
    let _adapter = create_adapter::<&str, _, _>((), &compose(chain)).unwrap();

    let op = op_slot.lock().clone().expect("op captured during build");
    op(ReadyState::Open).unwrap();

    assert_eq!(*heard.lock(), vec!["open".to_owned()]);
}
