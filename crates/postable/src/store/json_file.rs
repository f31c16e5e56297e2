//! Content store persisted to a single JSON file.
//!
//! The whole document set is rewritten after every insert or update. Writes
//! go to a sibling temp file first and are renamed into place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{ContentStore, MemoryStore};
use crate::error::StoreError;
use crate::types::{Document, NewDocument, PostId};

/// Errors opening or writing the backing file.
#[derive(Debug, Error)]
pub enum StoreIoError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<StoreIoError> for StoreError {
    fn from(e: StoreIoError) -> Self {
        StoreError::new("io_error", e.to_string())
    }
}

/// JSON-file backed content store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    documents: MemoryStore,
    // Serializes mutate-then-persist so the file never lags a later write.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreIoError> {
        let path = path.into();

        let documents = match fs::read_to_string(&path) {
            Ok(contents) => {
                let docs: Vec<Document> =
                    serde_json::from_str(&contents).map_err(|source| StoreIoError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                info!(path = %path.display(), count = docs.len(), "loaded document store");
                docs
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "store file missing, starting empty");
                Vec::new()
            }
            Err(source) => return Err(StoreIoError::Io { path, source }),
        };

        Ok(Self {
            path,
            documents: MemoryStore::with_documents(documents),
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreIoError> {
        let docs = self.documents.all();
        let json = serde_json::to_string_pretty(&docs).map_err(|source| StoreIoError::Parse {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| StoreIoError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreIoError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), count = docs.len(), "document store written");
        Ok(())
    }
}

impl ContentStore for JsonFileStore {
    fn insert(&self, post_type: &str, document: NewDocument) -> Result<PostId, StoreError> {
        let _guard = self.write_lock.lock();
        let id = self.documents.insert(post_type, document)?;
        if let Err(e) = self.persist() {
            self.documents.discard(id);
            warn!(id, error = %e, "insert rolled back, document not persisted");
            return Err(e.into());
        }
        Ok(id)
    }

    fn get_by_id(&self, id: PostId) -> Option<Document> {
        self.documents.get_by_id(id)
    }

    fn update(&self, document: &Document) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock();
        let previous = self.documents.get_by_id(document.id);
        if !self.documents.update(document)? {
            return Ok(false);
        }
        if let Err(e) = self.persist() {
            if let Some(previous) = previous {
                self.documents.restore(previous);
            }
            warn!(id = document.id, error = %e, "update rolled back, document not persisted");
            return Err(e.into());
        }
        Ok(true)
    }

    fn all(&self) -> Vec<Document> {
        self.documents.all()
    }
}
