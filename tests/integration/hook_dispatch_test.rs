//! Integration tests for hook dispatch: ordering, short-circuit, errors,
//! tag filtering and concurrent triggers.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::join_all;
use tokio::sync::Notify;

use hearthbase_core::error::ErrorKind;
use hearthbase_hook::{Handler, Hook, TagSet};

use helpers::{OrderEvent, done, fail, handler_fn, push, stop, wrap};

#[tokio::test]
async fn test_secure_tagged_trigger_runs_auth_then_log() {
    let hook: Hook<OrderEvent> = Hook::new();
    hook.bind_fn_with_tags(push("log"), TagSet::new(), 10);
    hook.bind_fn_with_tags(push("auth"), "secure", 0);

    let mut event = OrderEvent::default();
    hook.trigger_tagged(&mut event, "secure", done).await.unwrap();

    assert_eq!(event.order, vec!["auth", "log", "done"]);
}

#[tokio::test]
async fn test_stop_handler_skips_terminal() {
    let hook: Hook<OrderEvent> = Hook::new();
    hook.bind_fn(stop("stop"), 0);

    let mut event = OrderEvent::default();
    hook.trigger(&mut event, done).await.unwrap();

    assert_eq!(event.order, vec!["stop"]);
}

#[tokio::test]
async fn test_distinct_priorities_fire_in_order() {
    let hook: Hook<OrderEvent> = Hook::new();
    hook.bind_fn(push("p5"), 5);
    hook.bind_fn(push("p-3"), -3);
    hook.bind_fn(push("p100"), 100);
    hook.bind_fn(push("p0"), 0);

    let mut event = OrderEvent::default();
    hook.trigger(&mut event, done).await.unwrap();

    assert_eq!(event.order, vec!["p-3", "p0", "p5", "p100", "done"]);
}

#[tokio::test]
async fn test_equal_priorities_keep_bind_order() {
    let hook: Hook<OrderEvent> = Hook::new();
    for label in ["first", "second", "third"] {
        hook.bind_fn(push(label), 7);
    }

    let mut event = OrderEvent::default();
    hook.trigger(&mut event, done).await.unwrap();

    assert_eq!(event.order, vec!["first", "second", "third", "done"]);
}

#[tokio::test]
async fn test_onion_nesting() {
    let hook: Hook<OrderEvent> = Hook::new();
    hook.bind_fn(wrap("outer"), 0);
    hook.bind_fn(wrap("inner"), 1);

    let mut event = OrderEvent::default();
    hook.trigger(&mut event, done).await.unwrap();

    assert_eq!(
        event.order,
        vec!["outer", "inner", "done", "inner:after", "outer:after"]
    );
}

#[tokio::test]
async fn test_short_circuit_in_the_middle() {
    let hook: Hook<OrderEvent> = Hook::new();
    hook.bind_fn(wrap("outer"), 0);
    hook.bind_fn(stop("gate"), 1);
    hook.bind_fn(push("never"), 2);

    let mut event = OrderEvent::default();
    hook.trigger(&mut event, done).await.unwrap();

    assert_eq!(event.order, vec!["outer", "gate", "outer:after"]);
}

#[tokio::test]
async fn test_error_propagates_and_stops_chain() {
    let hook: Hook<OrderEvent> = Hook::new();
    hook.bind_fn(push("before"), 0);
    hook.bind_fn(fail("guard"), 1);
    hook.bind_fn(push("never"), 2);

    let mut event = OrderEvent::default();
    let err = hook.trigger(&mut event, done).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "guard rejected");
    assert_eq!(event.order, vec!["before", "guard"]);
}

#[tokio::test]
async fn test_upsert_replaces_callback() {
    let hook: Hook<OrderEvent> = Hook::new();
    hook.bind(Handler::new("audit", push("v1")));
    hook.bind(Handler::new("audit", push("v2")));
    assert_eq!(hook.len(), 1);

    let mut event = OrderEvent::default();
    hook.trigger(&mut event, done).await.unwrap();

    assert_eq!(event.order, vec!["v2", "done"]);
}

#[tokio::test]
async fn test_unbind_unknown_id_is_noop() {
    let hook: Hook<OrderEvent> = Hook::new();
    hook.bind_fn(push("a"), 0);

    assert!(!hook.unbind(&"missing".into()));
    assert_eq!(hook.len(), 1);
}

#[tokio::test]
async fn test_tag_filter_selects_matching_and_global() {
    let hook: Hook<OrderEvent> = Hook::new();
    hook.bind_fn_with_tags(push("h1"), "a", 2);
    hook.bind_fn_with_tags(push("h2"), "b", 1);
    hook.bind_fn_with_tags(push("h3"), TagSet::new(), 0);

    let mut event = OrderEvent::default();
    hook.trigger_tagged(&mut event, "a", done).await.unwrap();

    assert_eq!(event.order, vec!["h3", "h1", "done"]);
}

#[tokio::test]
async fn test_concurrent_triggers_share_handlers() {
    let hook: Arc<Hook<OrderEvent>> = Arc::new(Hook::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    hook.bind_fn(
        handler_fn(move |e, next| {
            counter.fetch_add(1, Ordering::SeqCst);
            next.proceed(e)
        }),
        0,
    );
    hook.bind_fn(push("tail"), 1);

    let tasks = (0..32).map(|_| {
        let hook = hook.clone();
        tokio::spawn(async move {
            let mut event = OrderEvent::default();
            hook.trigger(&mut event, done).await.map(|_| event.order)
        })
    });

    for result in join_all(tasks).await {
        let order = result.unwrap().unwrap();
        assert_eq!(order, vec!["tail", "done"]);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 32);
}

#[tokio::test]
async fn test_bind_during_trigger_does_not_change_running_chain() {
    let hook: Arc<Hook<OrderEvent>> = Arc::new(Hook::new());
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());

    let (gate_entered, gate_release) = (entered.clone(), release.clone());
    hook.bind_fn(
        handler_fn(move |e, next| {
            let entered = gate_entered.clone();
            let release = gate_release.clone();
            Box::pin(async move {
                e.order.push("gate".to_string());
                entered.notify_one();
                release.notified().await;
                next.proceed(e).await
            })
        }),
        0,
    );

    let running = tokio::spawn({
        let hook = hook.clone();
        async move {
            let mut event = OrderEvent::default();
            hook.trigger(&mut event, done).await.map(|_| event.order)
        }
    });

    entered.notified().await;
    hook.bind_fn(push("late"), 10);
    release.notify_one();

    let order = running.await.unwrap().unwrap();
    assert_eq!(order, vec!["gate", "done"]);

    // the next trigger sees the new handler
    release.notify_one();
    let mut event = OrderEvent::default();
    hook.trigger(&mut event, done).await.unwrap();
    assert_eq!(event.order, vec!["gate", "late", "done"]);
}

#[tokio::test]
async fn test_reset_leaves_terminal_only() {
    let hook: Hook<OrderEvent> = Hook::new();
    hook.bind_fn(push("a"), 0);
    hook.bind_fn(push("b"), 0);
    hook.reset();
    assert!(hook.is_empty());

    let mut event = OrderEvent::default();
    hook.trigger(&mut event, done).await.unwrap();
    assert_eq!(event.order, vec!["done"]);
}
