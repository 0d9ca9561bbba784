//! Integration tests for record and collection writes routed through hooks.

mod helpers;

use std::sync::{Arc, Mutex};

use serde_json::json;

use hearthbase_app::{App, builtin};
use hearthbase_core::error::{AppError, ErrorKind};
use hearthbase_core::events::Model;
use hearthbase_core::types::{Collection, CollectionKind, Record};

async fn app_with_posts() -> App {
    let app = App::with_memory_store(helpers::test_config());
    builtin::install_audit_log(app.hooks());
    builtin::install_collection_guard(app.hooks(), app.store().clone());
    app.create_collection(Collection::new("posts")).await.unwrap();
    app
}

#[tokio::test]
async fn test_collection_handler_sets_defaults() {
    let app = app_with_posts().await;
    app.create_collection(Collection::new("users")).await.unwrap();
    app.hooks().on_record_create_for("posts").bind_fn(
        |e, next| {
            if e.record.get("status").is_none() {
                e.record.set("status", "draft");
            }
            next.proceed(e)
        },
        0,
    );

    let post = app
        .create_record(Record::new("posts").with_field("title", json!("hello")))
        .await
        .unwrap();
    let user = app.create_record(Record::new("users")).await.unwrap();

    assert_eq!(post.get_string("status"), Some("draft"));
    assert!(user.get("status").is_none());
}

#[tokio::test]
async fn test_collection_id_scoped_handler_vetoes_create() {
    let app = app_with_posts().await;
    let posts = app.store().find_collection("posts").await.unwrap().unwrap();
    app.hooks()
        .on_record_create_for(posts.id.to_string())
        .bind_fn(
            |_, _| Box::pin(async { Err(AppError::aborted("posts are read-only")) }),
            0,
        );

    let err = app.create_record(Record::new("posts")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Aborted);
    assert!(app.store().list_records("posts").await.unwrap().is_empty());

    app.create_collection(Collection::new("users")).await.unwrap();
    app.create_record(Record::new("users")).await.unwrap();
}

#[tokio::test]
async fn test_guard_rejects_missing_collection() {
    let app = app_with_posts().await;
    let failures = Arc::new(Mutex::new(Vec::<String>::new()));
    let seen = failures.clone();
    app.hooks().on_record_after_create_error().bind_fn(
        move |e, next| {
            seen.lock().unwrap().push(e.error.clone().unwrap_or_default());
            next.proceed(e)
        },
        0,
    );

    let err = app.create_record(Record::new("ghosts")).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    let failures = failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].contains("ghosts"));
}

#[tokio::test]
async fn test_guard_rejects_view_collection() {
    let app = app_with_posts().await;
    app.create_collection(Collection::new("stats").with_kind(CollectionKind::View))
        .await
        .unwrap();

    let err = app.create_record(Record::new("stats")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(app.store().list_records("stats").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_veto_keeps_stored_record() {
    let app = app_with_posts().await;
    app.hooks().on_record_validate_for("posts").bind_fn(
        |e, next| {
            let empty = e.record.get_string("title").is_none_or(str::is_empty);
            Box::pin(async move {
                if empty {
                    return Err(AppError::validation("title must not be empty"));
                }
                next.proceed(e).await
            })
        },
        0,
    );

    let created = app
        .create_record(Record::new("posts").with_field("title", "first"))
        .await
        .unwrap();

    let mut blank = created.clone();
    blank.set("title", "");
    let err = app.update_record(blank).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let stored = app
        .store()
        .find_record("posts", &created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.get_string("title"), Some("first"));
}

#[tokio::test]
async fn test_after_proceed_sees_persisted_record() {
    let app = app_with_posts().await;
    let persisted = Arc::new(Mutex::new(None::<bool>));
    let seen = persisted.clone();
    let store = app.store().clone();
    app.hooks().on_record_create().bind_fn(
        move |e, next| {
            let seen = seen.clone();
            let store = store.clone();
            Box::pin(async move {
                let before = store.find_record(e.collection(), &e.record.id).await?;
                assert!(before.is_none());
                next.proceed(e).await?;
                let after = store.find_record(e.collection(), &e.record.id).await?;
                *seen.lock().unwrap() = Some(after.is_some());
                Ok(())
            })
        },
        0,
    );

    app.create_record(Record::new("posts")).await.unwrap();
    assert_eq!(*persisted.lock().unwrap(), Some(true));
}

#[tokio::test]
async fn test_model_hooks_observe_every_write() {
    let app = app_with_posts().await;
    let tables = Arc::new(Mutex::new(Vec::<String>::new()));
    let seen = tables.clone();
    app.hooks().on_model_after_create_success().bind_fn(
        move |e, next| {
            seen.lock().unwrap().push(e.model.table_name().to_string());
            next.proceed(e)
        },
        0,
    );

    app.create_collection(Collection::new("users")).await.unwrap();
    app.create_record(Record::new("users")).await.unwrap();
    app.create_record(Record::new("posts")).await.unwrap();

    assert_eq!(
        *tables.lock().unwrap(),
        vec!["_collections", "users", "posts"]
    );
}

#[tokio::test]
async fn test_execute_handler_can_skip_store_write() {
    let app = app_with_posts().await;
    app.hooks().on_model_create_execute().bind_fn(
        |e, next| {
            if matches!(e.model, Model::Record(_)) {
                return Box::pin(async { Ok(()) });
            }
            next.proceed(e)
        },
        0,
    );

    let record = app.create_record(Record::new("posts")).await.unwrap();

    assert!(
        app.store()
            .find_record("posts", &record.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_delete_collection_cascades() {
    let app = app_with_posts().await;
    app.create_record(Record::new("posts")).await.unwrap();
    app.create_record(Record::new("posts")).await.unwrap();
    assert_eq!(app.store().list_records("posts").await.unwrap().len(), 2);

    let posts = app.store().find_collection("posts").await.unwrap().unwrap();
    app.delete_collection(posts).await.unwrap();

    assert!(app.store().list_records("posts").await.unwrap().is_empty());
    let err = app.create_record(Record::new("posts")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_app_lifecycle_hooks_wrap_actions() {
    let app = App::with_memory_store(helpers::test_config());
    let order = Arc::new(Mutex::new(Vec::<&'static str>::new()));

    let log = order.clone();
    app.hooks().on_bootstrap().bind_fn(
        move |e, next| {
            let log = log.clone();
            Box::pin(async move {
                log.lock().unwrap().push("bootstrap");
                next.proceed(e).await?;
                log.lock().unwrap().push("bootstrapped");
                Ok(())
            })
        },
        0,
    );
    let log = order.clone();
    app.hooks().on_serve().bind_fn(
        move |e, next| {
            let log = log.clone();
            Box::pin(async move {
                log.lock().unwrap().push("serve");
                next.proceed(e).await?;
                log.lock().unwrap().push("stopped");
                Ok(())
            })
        },
        0,
    );
    let log = order.clone();
    app.hooks().on_terminate().bind_fn(
        move |e, next| {
            log.lock().unwrap().push("terminate");
            next.proceed(e)
        },
        0,
    );

    app.bootstrap().await.unwrap();
    assert!(app.is_bootstrapped());
    app.serve(async {}).await.unwrap();
    app.terminate(false).await.unwrap();
    assert!(!app.is_bootstrapped());

    assert_eq!(
        *order.lock().unwrap(),
        vec!["bootstrap", "bootstrapped", "serve", "stopped", "terminate"]
    );
    std::fs::remove_dir_all(&app.config().app.data_dir).ok();
}
