//! The record helper struct.
//!
//! A [`Record`] mirrors one document in a [`ContentStore`]. It is usable on
//! its own, or embedded in a host type that implements
//! [`PostAble`](crate::PostAble).

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{PostError, PostResult, StoreError};
use crate::hooks::{Hooks, LoadEvent, TypeCheck};
use crate::store::ContentStore;
use crate::types::{Document, NewDocument, PostId, Status};

/// Field values written into a freshly inserted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDefaults {
    pub title: String,
    pub body: String,
    pub status: Status,
}

impl Default for RecordDefaults {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: "Empty.".to_string(),
            status: Status::Draft,
        }
    }
}

/// In-memory view of one stored document.
pub struct Record {
    record_type: String,
    status: Status,
    post: Option<Document>,
    initialized: bool,
    store: Arc<dyn ContentStore>,
    hooks: Hooks,
    defaults: RecordDefaults,
}

impl Record {
    /// Create an uninitialized record against `store`.
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self::with_defaults(store, RecordDefaults::default())
    }

    /// Create an uninitialized record with custom insertion defaults.
    pub fn with_defaults(store: Arc<dyn ContentStore>, defaults: RecordDefaults) -> Self {
        Self {
            record_type: String::new(),
            status: defaults.status.clone(),
            post: None,
            initialized: false,
            store,
            hooks: Hooks::new(),
            defaults,
        }
    }

    /// Attach hooks. Replaces any previously attached registry.
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Create a new document or attach an existing one, exactly once.
    ///
    /// Without an `id` a fresh document of `record_type` is inserted and
    /// then loaded. Later calls on an initialized record do nothing, even
    /// with different arguments. A failed attempt leaves the record
    /// uninitialized.
    pub fn initialize_or_load(
        &mut self,
        record_type: &str,
        id: Option<PostId>,
    ) -> PostResult<&mut Self> {
        let Some(id) = self.begin_initialize(record_type, id)? else {
            return Ok(self);
        };
        self.load(id)?;
        Ok(self)
    }

    /// Load document `id` into this record.
    ///
    /// A successful load also counts as initialization, so a later
    /// [`initialize_or_load`](Self::initialize_or_load) is a no-op.
    pub fn load(&mut self, id: PostId) -> PostResult<&mut Self> {
        let host_type = type_name::<Self>();
        self.attach(id, host_type)?;
        self.notify_loaded(host_type, &*self);
        Ok(self)
    }

    /// Push the current payload back to the store.
    pub fn save(&mut self) -> PostResult<&mut Self> {
        let Some(post) = self.post.as_ref() else {
            return Err(PostError::NotLoaded {
                record_type: self.record_type.clone(),
            });
        };

        let id = post.id;
        match self.store.update(post) {
            Ok(true) => Ok(self),
            Ok(false) => Err(PostError::SaveFailed {
                id,
                source: StoreError::empty(),
            }),
            Err(source) => Err(PostError::SaveFailed { id, source }),
        }
    }

    /// Set status to `published` and save.
    pub fn publish(&mut self) -> PostResult<&mut Self> {
        self.set_status(Status::Published).save()
    }

    /// Set status to `draft` and save.
    pub fn draft(&mut self) -> PostResult<&mut Self> {
        self.set_status(Status::Draft).save()
    }

    /// The attached document, if any.
    pub fn post(&self) -> Option<&Document> {
        self.post.as_ref()
    }

    pub fn id(&self) -> Option<PostId> {
        self.post.as_ref().map(|p| p.id)
    }

    pub fn post_type(&self) -> &str {
        &self.record_type
    }

    pub fn title(&self) -> &str {
        self.post.as_ref().map_or("", |p| p.title.as_str())
    }

    pub fn body(&self) -> &str {
        self.post.as_ref().map_or("", |p| p.body.as_str())
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Set the payload title. Not persisted until [`save`](Self::save).
    ///
    /// Has no effect before a document is loaded.
    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        if let Some(post) = self.post.as_mut() {
            post.title = title.into();
        }
        self
    }

    /// Set the payload body. Not persisted until [`save`](Self::save).
    pub fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        if let Some(post) = self.post.as_mut() {
            post.body = body.into();
        }
        self
    }

    /// Set the status on both the record and the payload.
    pub fn set_status(&mut self, status: impl Into<Status>) -> &mut Self {
        let status = status.into();
        if let Some(post) = self.post.as_mut() {
            post.status = status.clone();
        }
        self.status = status;
        self
    }

    /// Read an extra payload field.
    pub fn field<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Option<T> {
        self.post.as_ref().and_then(|p| p.field(name))
    }

    /// Write an extra payload field. Not persisted until [`save`](Self::save).
    pub fn set_field<T: Serialize>(&mut self, name: &str, value: T) -> &mut Self {
        if let Some(post) = self.post.as_mut() {
            post.set_field(name, value);
        }
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_loaded(&self) -> bool {
        self.post.is_some()
    }

    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// Resolve the id to load for an initialization attempt.
    ///
    /// Returns `None` when the record is already initialized. Inserts a new
    /// document when no id was supplied.
    pub(crate) fn begin_initialize(
        &mut self,
        record_type: &str,
        id: Option<PostId>,
    ) -> PostResult<Option<PostId>> {
        if self.initialized {
            return Ok(None);
        }
        self.record_type = record_type.to_string();

        match id {
            Some(id) => Ok(Some(id)),
            None => self.create().map(Some),
        }
    }

    fn create(&self) -> PostResult<PostId> {
        let document = NewDocument {
            title: self.defaults.title.clone(),
            body: self.defaults.body.clone(),
            status: self.status.clone(),
        };

        match self.store.insert(&self.record_type, document) {
            Ok(id) if id > 0 => Ok(id),
            Ok(_) => Err(PostError::CreationFailed {
                record_type: self.record_type.clone(),
                source: StoreError::empty(),
            }),
            Err(source) => Err(PostError::CreationFailed {
                record_type: self.record_type.clone(),
                source,
            }),
        }
    }

    /// Fetch, type-check and attach document `id` on behalf of `host_type`.
    pub(crate) fn attach(&mut self, id: PostId, host_type: &str) -> PostResult<()> {
        let not_found = || PostError::RecordNotFound {
            id,
            record_type: self.record_type.clone(),
        };

        if id <= 0 {
            return Err(not_found());
        }
        let Some(post) = self.store.get_by_id(id) else {
            return Err(not_found());
        };

        let check = TypeCheck {
            expected: &self.record_type,
            actual: &post.post_type,
            host_type,
        };
        if !self.hooks.types_match(&check) {
            return Err(not_found());
        }

        self.status = post.status.clone();
        self.post = Some(post);
        self.initialized = true;
        Ok(())
    }

    pub(crate) fn notify_loaded(&self, host_type: &str, host: &dyn Any) {
        if let Some(document) = self.post.as_ref() {
            self.hooks.notify_loaded(&LoadEvent {
                host_type,
                host,
                document,
            });
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("record_type", &self.record_type)
            .field("status", &self.status)
            .field("post", &self.post)
            .field("initialized", &self.initialized)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
