#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for the record lifecycle.

use std::sync::Arc;

use postable::prelude::*;
use postable::{PostError, StoreError};
use postable_test_utils::{RecordingStore, assert, test_document};

#[derive(Debug)]
struct Article {
    record: Record,
}

impl Article {
    fn new(store: Arc<RecordingStore>) -> Self {
        Self {
            record: Record::new(store),
        }
    }
}

impl PostAble for Article {
    fn record(&self) -> &Record {
        &self.record
    }

    fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }
}

fn seeded() -> Arc<RecordingStore> {
    Arc::new(RecordingStore::with_documents([
        test_document("article", "First").with_id(1).build(),
        test_document("article", "Second")
            .with_id(2)
            .published()
            .build(),
        test_document("page", "About").with_id(3).build(),
    ]))
}

#[test]
fn test_create_inserts_draft_and_loads_it() {
    let store = Arc::new(RecordingStore::with_documents([
        test_document("article", "seed").with_id(41).build(),
    ]));
    let mut article = Article::new(store.clone());

    article.initialize_or_load("article", None).unwrap();

    assert_eq!(store.insert_calls(), 1);
    let inserted = store.inserted();
    assert_eq!(inserted[0].0, "article");
    assert_eq!(inserted[0].1.status, Status::Draft);
    assert_eq!(inserted[0].1.title, "");
    assert_eq!(inserted[0].1.body, "Empty.");

    assert_eq!(article.post_id(), Some(42));
    assert_eq!(article.post_type(), "article");
    assert_eq!(article.status(), &Status::Draft);
}

#[test]
fn test_initialize_is_idempotent() {
    let store = Arc::new(RecordingStore::new());
    let mut article = Article::new(store.clone());

    article.initialize_or_load("article", None).unwrap();
    let first = article.post_id();
    article.initialize_or_load("article", None).unwrap();
    article.initialize_or_load("page", Some(99)).unwrap();

    assert_eq!(store.insert_calls(), 1);
    assert_eq!(article.post_id(), first);
    assert_eq!(article.post_type(), "article");
}

#[test]
fn test_idempotence_is_per_instance() {
    let store = Arc::new(RecordingStore::new());
    let mut a = Article::new(store.clone());
    let mut b = Article::new(store.clone());

    a.initialize_or_load("article", None).unwrap();
    b.initialize_or_load("article", None).unwrap();

    assert_eq!(store.insert_calls(), 2);
    assert_ne!(a.post_id(), b.post_id());
}

#[test]
fn test_load_existing_exposes_fields_unchanged() {
    let store = seeded();

    for (id, title, status) in [(1, "First", Status::Draft), (2, "Second", Status::Published)] {
        let mut article = Article::new(store.clone());
        article.initialize_or_load("article", Some(id)).unwrap();
        assert_eq!(article.title(), title);
        assert_eq!(article.status(), &status);
        assert_eq!(article.post().unwrap().status, status);
    }
    assert_eq!(store.insert_calls(), 0);
}

#[test]
fn test_load_then_initialize_does_not_insert() {
    let store = seeded();
    let mut article = Article::new(store.clone());

    article.load_post(1).unwrap();
    assert!(article.record().is_initialized());
    article.initialize_or_load("article", None).unwrap();

    assert_eq!(store.insert_calls(), 0);
    assert_eq!(article.post_id(), Some(1));
    assert_eq!(article.title(), "First");
}

#[test]
fn test_custom_status_and_body_load_unchanged() {
    let store = Arc::new(RecordingStore::with_documents([
        test_document("article", "Queued")
            .with_id(7)
            .with_status("pending")
            .with_body("Awaiting review")
            .build(),
        test_document("article", "Reverted")
            .with_id(8)
            .published()
            .draft()
            .build(),
    ]));

    let mut queued = Article::new(store.clone());
    queued.initialize_or_load("article", Some(7)).unwrap();
    assert_eq!(queued.status().as_str(), "pending");
    assert_eq!(queued.body(), "Awaiting review");

    let mut reverted = Article::new(store);
    reverted.initialize_or_load("article", Some(8)).unwrap();
    assert_eq!(reverted.status(), &Status::Draft);
}

#[test]
fn test_load_missing_id_is_not_found() {
    let store = seeded();
    let mut article = Article::new(store);

    let err = article.initialize_or_load("article", Some(404)).unwrap_err();
    assert::not_found(&err, 404);
    assert!(!article.record().is_initialized());
}

#[test]
fn test_load_type_mismatch_is_not_found() {
    let store = seeded();
    let mut article = Article::new(store);

    let err = article.initialize_or_load("article", Some(3)).unwrap_err();
    assert::not_found(&err, 3);
    match err {
        PostError::RecordNotFound { record_type, .. } => assert_eq!(record_type, "article"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(article.post().is_none());
}

#[test]
fn test_non_positive_ids_never_reach_store() {
    let store = seeded();
    let mut article = Article::new(store.clone());
    article.initialize_or_load("article", Some(1)).unwrap();
    let gets = store.get_calls();

    for id in [0, -1] {
        let err = article.load_post(id).unwrap_err();
        assert::not_found(&err, id);
    }
    assert_eq!(store.get_calls(), gets);
    // A failed reload keeps the previous document.
    assert_eq!(article.post_id(), Some(1));
}

#[test]
fn test_override_predicate_accepts_subtype() {
    let store = seeded();
    let hooks = Hooks::new().with_type_filter(HookScope::host::<Article>(), 0, |verdict, c| {
        verdict || (c.expected == "article" && c.actual == "page")
    });
    let mut article = Article {
        record: Record::new(store).with_hooks(hooks),
    };

    article.initialize_or_load("article", Some(3)).unwrap();
    assert_eq!(article.title(), "About");
    assert_eq!(article.post_type(), "article");
}

#[test]
fn test_set_status_then_save_persists_status() {
    let store = seeded();
    let mut article = Article::new(store.clone());
    article.initialize_or_load("article", Some(1)).unwrap();

    article.set_status("pending").save_post().unwrap();

    let sent = store.last_update().unwrap();
    assert_eq!(sent.status.as_str(), "pending");
    assert_eq!(article.status().as_str(), "pending");
    assert_eq!(store.get_by_id(1).unwrap().status.as_str(), "pending");
}

#[test]
fn test_publish_and_draft_save_immediately() {
    let store = seeded();
    let mut article = Article::new(store.clone());
    article.initialize_or_load("article", Some(1)).unwrap();

    article.publish().unwrap();
    assert_eq!(store.update_calls(), 1);
    assert_eq!(store.last_update().unwrap().status, Status::Published);
    assert!(article.status().is_published());

    article.draft().unwrap();
    assert_eq!(store.update_calls(), 2);
    assert_eq!(store.last_update().unwrap().status, Status::Draft);
    assert_eq!(article.status(), &Status::Draft);
}

#[test]
fn test_set_title_is_not_persisted_until_save() {
    let store = seeded();
    let mut article = Article::new(store.clone());
    article.initialize_or_load("article", Some(1)).unwrap();

    article.set_title("Renamed");
    assert_eq!(store.update_calls(), 0);
    assert_eq!(store.get_by_id(1).unwrap().title, "First");

    article.save_post().unwrap();
    assert_eq!(store.get_by_id(1).unwrap().title, "Renamed");
}

#[test]
fn test_save_failure_keeps_in_memory_state() {
    let store = seeded();
    let mut article = Article::new(store.clone());
    article.initialize_or_load("article", Some(1)).unwrap();

    store.fail_updates(StoreError::new("db_update_error", "Could not update post."));
    article.set_title("Unsaved");
    let err = article.publish().unwrap_err();

    assert::save_failed(&err, "db_update_error");
    assert_eq!(article.title(), "Unsaved");
    assert!(article.status().is_published());
    assert_eq!(store.get_by_id(1).unwrap().title, "First");
}

#[test]
fn test_silent_update_rejection_is_save_failed() {
    let store = seeded();
    let mut article = Article::new(store.clone());
    article.initialize_or_load("article", Some(1)).unwrap();

    store.reject_updates();
    let err = article.draft().unwrap_err();
    assert!(err.store_error().unwrap().is_empty());
    assert!(matches!(err, PostError::SaveFailed { id: 1, .. }));
}

#[test]
fn test_creation_failure_carries_store_error() {
    let store = Arc::new(RecordingStore::new());
    store.fail_inserts(StoreError::new("db_insert_error", "Could not insert post."));
    let mut article = Article::new(store.clone());

    let err = article.initialize_or_load("article", None).unwrap_err();
    assert::creation_failed(&err, "db_insert_error");
    assert_eq!(
        err.store_error().unwrap().messages,
        vec!["Could not insert post.".to_string()]
    );
    assert!(!article.record().is_initialized());

    // The caller may retry once the store recovers.
    store.heal();
    article.initialize_or_load("article", None).unwrap();
    assert!(article.record().is_initialized());
    assert_eq!(store.insert_calls(), 2);
}

#[test]
fn test_zero_id_insert_is_creation_failure() {
    let store = Arc::new(RecordingStore::new());
    store.zero_id_inserts();
    let mut article = Article::new(store.clone());

    let err = article.initialize_or_load("article", None).unwrap_err();
    assert!(matches!(err, PostError::CreationFailed { .. }));
    assert!(err.store_error().unwrap().is_empty());
    assert_eq!(store.get_calls(), 0);
}
