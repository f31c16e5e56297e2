//! Content store abstraction.
//!
//! The record layer only ever talks to a [`ContentStore`]. Implementations
//! own persistence and id assignment; they are expected to make each insert
//! and update atomic on their own.

mod json_file;
mod memory;

pub use json_file::{JsonFileStore, StoreIoError};
pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::types::{Document, NewDocument, PostId};

/// Narrow CRUD interface consumed by records.
pub trait ContentStore: Send + Sync {
    /// Insert a new document of `post_type`, returning its id.
    ///
    /// An id of zero is treated by callers as a failed insert.
    fn insert(&self, post_type: &str, document: NewDocument) -> Result<PostId, StoreError>;

    /// Fetch a document by id.
    fn get_by_id(&self, id: PostId) -> Option<Document>;

    /// Write a document back. `Ok(false)` means the store refused without detail.
    fn update(&self, document: &Document) -> Result<bool, StoreError>;

    /// All stored documents, ordered by id.
    fn all(&self) -> Vec<Document>;
}
