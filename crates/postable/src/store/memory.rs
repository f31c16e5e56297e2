//! In-process content store.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::debug;

use super::ContentStore;
use crate::error::StoreError;
use crate::types::{Document, NewDocument, PostId};

/// Content store backed by an in-memory map.
///
/// Ids are assigned sequentially starting at 1.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Debug)]
struct MemoryStoreInner {
    documents: BTreeMap<PostId, Document>,
    next_id: PostId,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_documents(Vec::new())
    }

    /// Create a store seeded with existing documents.
    ///
    /// The next assigned id follows the highest seeded id.
    pub fn with_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let documents: BTreeMap<PostId, Document> =
            documents.into_iter().map(|d| (d.id, d)).collect();
        let next_id = documents.keys().next_back().map_or(1, |id| id + 1);

        Self {
            inner: RwLock::new(MemoryStoreInner { documents, next_id }),
        }
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.inner.read().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop a just-inserted document and hand its id back.
    pub(crate) fn discard(&self, id: PostId) {
        let mut inner = self.inner.write();
        inner.documents.remove(&id);
        if inner.next_id == id + 1 {
            inner.next_id = id;
        }
    }

    /// Put back a document exactly as it was before an update.
    pub(crate) fn restore(&self, previous: Document) {
        self.inner.write().documents.insert(previous.id, previous);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for MemoryStore {
    fn insert(&self, post_type: &str, document: NewDocument) -> Result<PostId, StoreError> {
        if post_type.is_empty() {
            return Err(StoreError::new("invalid_post_type", "Invalid post type."));
        }

        let now = chrono::Utc::now().timestamp();
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .documents
            .insert(id, document.into_document(id, post_type, now));

        debug!(id, post_type, "document inserted");
        Ok(id)
    }

    fn get_by_id(&self, id: PostId) -> Option<Document> {
        self.inner.read().documents.get(&id).cloned()
    }

    fn update(&self, document: &Document) -> Result<bool, StoreError> {
        let mut inner = self.inner.write();
        let Some(existing) = inner.documents.get_mut(&document.id) else {
            return Err(StoreError::new("invalid_post", "Invalid post ID."));
        };

        let created = existing.created;
        *existing = document.clone();
        existing.created = created;
        existing.changed = chrono::Utc::now().timestamp();

        debug!(id = document.id, status = %document.status, "document updated");
        Ok(true)
    }

    fn all(&self) -> Vec<Document> {
        self.inner.read().documents.values().cloned().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::Status;

    fn new_doc(title: &str) -> NewDocument {
        NewDocument {
            title: title.to_string(),
            body: "Empty.".to_string(),
            status: Status::Draft,
        }
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        let a = store.insert("article", new_doc("a")).unwrap();
        let b = store.insert("page", new_doc("b")).unwrap();
        assert_eq!((a, b), (1, 2));
        assert_eq!(store.len(), 2);

        let doc = store.get_by_id(b).unwrap();
        assert_eq!(doc.post_type, "page");
        assert_eq!(doc.title, "b");
        assert!(doc.created > 0);
    }

    #[test]
    fn insert_rejects_empty_type() {
        let store = MemoryStore::new();
        let err = store.insert("", new_doc("x")).unwrap_err();
        assert_eq!(err.code, "invalid_post_type");
        assert!(store.is_empty());
    }

    #[test]
    fn seeded_store_continues_after_highest_id() {
        let seed = new_doc("seed").into_document(10, "article", 0);
        let store = MemoryStore::with_documents([seed]);
        assert_eq!(store.insert("article", new_doc("next")).unwrap(), 11);
    }

    #[test]
    fn update_replaces_document_and_keeps_created() {
        let store = MemoryStore::new();
        let id = store.insert("article", new_doc("before")).unwrap();

        let mut doc = store.get_by_id(id).unwrap();
        let created = doc.created;
        doc.title = "after".into();
        doc.status = Status::Published;
        doc.created = 0;

        assert!(store.update(&doc).unwrap());

        let stored = store.get_by_id(id).unwrap();
        assert_eq!(stored.title, "after");
        assert!(stored.is_published());
        assert_eq!(stored.created, created);
    }

    #[test]
    fn update_unknown_id_fails() {
        let store = MemoryStore::new();
        let doc = new_doc("ghost").into_document(99, "article", 0);
        let err = store.update(&doc).unwrap_err();
        assert_eq!(err.code, "invalid_post");
    }

    #[test]
    fn discard_hands_id_back() {
        let store = MemoryStore::new();
        let id = store.insert("article", new_doc("gone")).unwrap();
        store.discard(id);

        assert!(store.get_by_id(id).is_none());
        assert_eq!(store.insert("article", new_doc("next")).unwrap(), id);
    }

    #[test]
    fn all_is_ordered_by_id() {
        let store = MemoryStore::new();
        store.insert("a", new_doc("1")).unwrap();
        store.insert("b", new_doc("2")).unwrap();
        let ids: Vec<_> = store.all().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
