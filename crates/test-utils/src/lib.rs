//! Postable test utilities.
//!
//! Helpers for integration testing: document fixtures, a recording store
//! with failure injection, and assertion helpers for record errors.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use postable::{ContentStore, Document, MemoryStore, NewDocument, PostId, Status, StoreError};
use serde_json::Value as JsonValue;

/// Create a test document with default values.
pub fn test_document(post_type: &str, title: &str) -> TestDocument {
    TestDocument {
        id: 1,
        post_type: post_type.to_string(),
        title: title.to_string(),
        body: "Empty.".to_string(),
        status: Status::Draft,
        fields: HashMap::new(),
    }
}

/// A test document builder for creating fixtures.
#[derive(Debug, Clone)]
pub struct TestDocument {
    pub id: PostId,
    pub post_type: String,
    pub title: String,
    pub body: String,
    pub status: Status,
    pub fields: HashMap<String, JsonValue>,
}

impl TestDocument {
    /// Set a custom ID.
    pub fn with_id(mut self, id: PostId) -> Self {
        self.id = id;
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    /// Set as published.
    pub fn published(mut self) -> Self {
        self.status = Status::Published;
        self
    }

    /// Set as draft.
    pub fn draft(mut self) -> Self {
        self.status = Status::Draft;
        self
    }

    /// Set an arbitrary status.
    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Status::from(status);
        self
    }

    /// Add a single extra field.
    pub fn with_field(mut self, name: &str, value: JsonValue) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    /// Build the document.
    pub fn build(self) -> Document {
        Document {
            id: self.id,
            post_type: self.post_type,
            title: self.title,
            body: self.body,
            status: self.status,
            fields: self.fields,
            created: 0,
            changed: 0,
        }
    }
}

/// What the next failing call should report.
#[derive(Debug, Clone)]
enum Failure {
    Error(StoreError),
    Silent,
}

/// A content store that counts calls and can be told to fail.
///
/// Wraps a [`MemoryStore`]; failures are sticky until cleared.
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    insert_calls: AtomicUsize,
    get_calls: AtomicUsize,
    update_calls: AtomicUsize,
    inserted: Mutex<Vec<(String, NewDocument)>>,
    updated: Mutex<Vec<Document>>,
    insert_failure: Mutex<Option<Failure>>,
    update_failure: Mutex<Option<Failure>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with fixtures.
    pub fn with_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        Self {
            inner: MemoryStore::with_documents(documents),
            ..Self::default()
        }
    }

    /// Make inserts return `error`.
    pub fn fail_inserts(&self, error: StoreError) {
        *self.insert_failure.lock() = Some(Failure::Error(error));
    }

    /// Make inserts return id 0.
    pub fn zero_id_inserts(&self) {
        *self.insert_failure.lock() = Some(Failure::Silent);
    }

    /// Make updates return `error`.
    pub fn fail_updates(&self, error: StoreError) {
        *self.update_failure.lock() = Some(Failure::Error(error));
    }

    /// Make updates return `Ok(false)`.
    pub fn reject_updates(&self) {
        *self.update_failure.lock() = Some(Failure::Silent);
    }

    /// Clear all injected failures.
    pub fn heal(&self) {
        *self.insert_failure.lock() = None;
        *self.update_failure.lock() = None;
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Every insert request received, in order.
    pub fn inserted(&self) -> Vec<(String, NewDocument)> {
        self.inserted.lock().clone()
    }

    /// The most recent document passed to `update`.
    pub fn last_update(&self) -> Option<Document> {
        self.updated.lock().last().cloned()
    }
}

impl ContentStore for RecordingStore {
    fn insert(&self, post_type: &str, document: NewDocument) -> Result<PostId, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.inserted
            .lock()
            .push((post_type.to_string(), document.clone()));

        match self.insert_failure.lock().clone() {
            Some(Failure::Error(e)) => Err(e),
            Some(Failure::Silent) => Ok(0),
            None => self.inner.insert(post_type, document),
        }
    }

    fn get_by_id(&self, id: PostId) -> Option<Document> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_by_id(id)
    }

    fn update(&self, document: &Document) -> Result<bool, StoreError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.updated.lock().push(document.clone());

        match self.update_failure.lock().clone() {
            Some(Failure::Error(e)) => Err(e),
            Some(Failure::Silent) => Ok(false),
            None => self.inner.update(document),
        }
    }

    fn all(&self) -> Vec<Document> {
        self.inner.all()
    }
}

/// Assertion helpers for record errors.
pub mod assert {
    use postable::{PostError, PostId};

    /// Assert that an error is `RecordNotFound` for `id`.
    pub fn not_found(err: &PostError, id: PostId) {
        assert!(
            matches!(err, PostError::RecordNotFound { id: got, .. } if *got == id),
            "Expected RecordNotFound for id {id}, got: {err:?}"
        );
    }

    /// Assert that an error is `SaveFailed` with the given store error code.
    pub fn save_failed(err: &PostError, code: &str) {
        assert!(
            matches!(err, PostError::SaveFailed { source, .. } if source.code == code),
            "Expected SaveFailed with code '{code}', got: {err:?}"
        );
    }

    /// Assert that an error is `CreationFailed` with the given store error code.
    pub fn creation_failed(err: &PostError, code: &str) {
        assert!(
            matches!(err, PostError::CreationFailed { source, .. } if source.code == code),
            "Expected CreationFailed with code '{code}', got: {err:?}"
        );
    }
}
