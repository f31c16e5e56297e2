//! Postable
//!
//! Lets any type present itself as a managed content record backed by a
//! content store. The lifecycle is create-or-attach, load, mutate, save,
//! and publish/draft. Extension points are injected as [`Hooks`].

pub mod error;
pub mod hooks;
pub mod post_able;
pub mod record;
pub mod store;
pub mod types;

pub use error::{PostError, PostResult, StoreError};
pub use hooks::{HookScope, Hooks, LoadEvent, TypeCheck};
pub use post_able::PostAble;
pub use record::{Record, RecordDefaults};
pub use store::{ContentStore, JsonFileStore, MemoryStore, StoreIoError};
pub use types::{Document, NewDocument, PostId, Status};

pub mod prelude {
    pub use crate::error::{PostError, PostResult};
    pub use crate::hooks::{HookScope, Hooks};
    pub use crate::post_able::PostAble;
    pub use crate::record::Record;
    pub use crate::store::ContentStore;
    pub use crate::types::{Document, PostId, Status};
}
