//! Host-type integration.
//!
//! Any type that embeds a [`Record`] can implement [`PostAble`] by exposing
//! it through two accessors; every lifecycle operation then comes for free.
//! Hooks see the host's own type name and can downcast to the host.
//!
//! ```
//! use std::sync::Arc;
//! use postable::{MemoryStore, PostAble, Record};
//!
//! struct Article {
//!     record: Record,
//! }
//!
//! impl PostAble for Article {
//!     fn record(&self) -> &Record {
//!         &self.record
//!     }
//!
//!     fn record_mut(&mut self) -> &mut Record {
//!         &mut self.record
//!     }
//! }
//!
//! let store = Arc::new(MemoryStore::new());
//! let mut article = Article { record: Record::new(store) };
//! article.initialize_or_load("article", None)?;
//! article.set_title("Hello").publish()?;
//! assert!(article.status().is_published());
//! # Ok::<(), postable::PostError>(())
//! ```

use std::any::type_name;

use serde::{Deserialize, Serialize};

use crate::error::PostResult;
use crate::record::Record;
use crate::types::{Document, PostId, Status};

/// A host type presenting itself as a managed content record.
pub trait PostAble: Sized + 'static {
    /// The embedded record.
    fn record(&self) -> &Record;

    /// The embedded record, mutably.
    fn record_mut(&mut self) -> &mut Record;

    /// Create or attach the backing document, exactly once per instance.
    ///
    /// Call this from the host's constructor. Repeated calls are no-ops.
    fn initialize_or_load(
        &mut self,
        record_type: &str,
        id: Option<PostId>,
    ) -> PostResult<&mut Self> {
        let Some(id) = self.record_mut().begin_initialize(record_type, id)? else {
            return Ok(self);
        };
        self.load_post(id)?;
        Ok(self)
    }

    /// Load document `id`, type-checked against this host.
    ///
    /// A successful load also counts as initialization.
    fn load_post(&mut self, id: PostId) -> PostResult<&mut Self> {
        let host_type = type_name::<Self>();
        self.record_mut().attach(id, host_type)?;

        let this: &Self = &*self;
        this.record().notify_loaded(host_type, this);
        Ok(self)
    }

    fn save_post(&mut self) -> PostResult<&mut Self> {
        self.record_mut().save()?;
        Ok(self)
    }

    /// The attached document. `None` before the first load.
    fn post(&self) -> Option<&Document> {
        self.record().post()
    }

    fn post_id(&self) -> Option<PostId> {
        self.record().id()
    }

    fn post_type(&self) -> &str {
        self.record().post_type()
    }

    fn title(&self) -> &str {
        self.record().title()
    }

    fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.record_mut().set_title(title);
        self
    }

    fn body(&self) -> &str {
        self.record().body()
    }

    fn set_body(&mut self, body: impl Into<String>) -> &mut Self {
        self.record_mut().set_body(body);
        self
    }

    fn status(&self) -> &Status {
        self.record().status()
    }

    fn set_status(&mut self, status: impl Into<Status>) -> &mut Self {
        self.record_mut().set_status(status);
        self
    }

    fn field<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Option<T> {
        self.record().field(name)
    }

    fn set_field<T: Serialize>(&mut self, name: &str, value: T) -> &mut Self {
        self.record_mut().set_field(name, value);
        self
    }

    fn publish(&mut self) -> PostResult<&mut Self> {
        self.record_mut().publish()?;
        Ok(self)
    }

    fn draft(&mut self) -> PostResult<&mut Self> {
        self.record_mut().draft()?;
        Ok(self)
    }
}
