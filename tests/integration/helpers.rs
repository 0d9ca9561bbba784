//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use hearthbase_core::config::AppConfig;
use hearthbase_core::error::AppError;
use hearthbase_core::result::AppResult;
use hearthbase_core::types::RecordId;
use hearthbase_hook::{BoxFuture, Next};

/// Event that records which layers ran, in order.
#[derive(Debug, Default)]
pub struct OrderEvent {
    pub order: Vec<String>,
}

/// Pins a closure to the handler signature for [`OrderEvent`].
pub fn handler_fn<F>(f: F) -> F
where
    F: for<'e> Fn(&'e mut OrderEvent, Next<'e, OrderEvent>) -> BoxFuture<'e, AppResult<()>>
        + Send
        + Sync
        + 'static,
{
    f
}

/// Handler that appends `label` and continues.
pub fn push(
    label: &'static str,
) -> impl for<'e> Fn(&'e mut OrderEvent, Next<'e, OrderEvent>) -> BoxFuture<'e, AppResult<()>>
+ Send
+ Sync
+ 'static {
    handler_fn(move |e, next| {
        e.order.push(label.to_string());
        next.proceed(e)
    })
}

/// Handler that appends `label` and stops the chain.
pub fn stop(
    label: &'static str,
) -> impl for<'e> Fn(&'e mut OrderEvent, Next<'e, OrderEvent>) -> BoxFuture<'e, AppResult<()>>
+ Send
+ Sync
+ 'static {
    handler_fn(move |e, _next| {
        e.order.push(label.to_string());
        Box::pin(async { Ok(()) })
    })
}

/// Handler that appends `label` before and `label:after` after the rest of
/// the chain.
pub fn wrap(
    label: &'static str,
) -> impl for<'e> Fn(&'e mut OrderEvent, Next<'e, OrderEvent>) -> BoxFuture<'e, AppResult<()>>
+ Send
+ Sync
+ 'static {
    handler_fn(move |e, next| {
        Box::pin(async move {
            e.order.push(label.to_string());
            next.proceed(e).await?;
            e.order.push(format!("{label}:after"));
            Ok(())
        })
    })
}

/// Handler that appends `label` and fails with a validation error.
pub fn fail(
    label: &'static str,
) -> impl for<'e> Fn(&'e mut OrderEvent, Next<'e, OrderEvent>) -> BoxFuture<'e, AppResult<()>>
+ Send
+ Sync
+ 'static {
    handler_fn(move |e, _next| {
        e.order.push(label.to_string());
        Box::pin(async move { Err(AppError::validation(format!("{label} rejected"))) })
    })
}

/// Terminal continuation appending `"done"`.
pub fn done(e: &mut OrderEvent) -> BoxFuture<'_, AppResult<()>> {
    Box::pin(async move {
        e.order.push("done".to_string());
        Ok(())
    })
}

/// Config pointing at a fresh data directory under the system temp dir.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.app.data_dir = scratch_dir().to_string_lossy().into_owned();
    config
}

/// Unique, not yet created directory under the system temp dir.
pub fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("hearthbase-it-{}", RecordId::new()))
}
