//! Error types for the record lifecycle and content stores.

use std::fmt;

use thiserror::Error;

use crate::types::PostId;

/// Error reported by a content store.
///
/// Carries a machine-readable code plus any number of human-readable
/// messages. An empty error (no code, no messages) stands in for stores
/// that signal failure without detail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreError {
    pub code: String,
    pub messages: Vec<String>,
}

impl StoreError {
    /// Create an error with a code and a single message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            messages: vec![message.into()],
        }
    }

    /// An error with no detail.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append another message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty() && self.messages.is_empty()
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code.is_empty(), self.messages.is_empty()) {
            (true, true) => f.write_str("unknown store error"),
            (false, true) => f.write_str(&self.code),
            (true, false) => f.write_str(&self.messages.join("; ")),
            (false, false) => write!(f, "{}: {}", self.code, self.messages.join("; ")),
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors surfaced by record lifecycle operations.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("failed to create {record_type} record: {source}")]
    CreationFailed {
        record_type: String,
        #[source]
        source: StoreError,
    },

    #[error("incorrect post id [{id}] for record type {record_type}")]
    RecordNotFound { id: PostId, record_type: String },

    #[error("failed to save record {id}: {source}")]
    SaveFailed {
        id: PostId,
        #[source]
        source: StoreError,
    },

    /// A payload operation was attempted before any document was loaded.
    #[error("{record_type} record has not been loaded")]
    NotLoaded { record_type: String },
}

impl PostError {
    /// The store error behind a creation or save failure, if any.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::CreationFailed { source, .. } | Self::SaveFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias using PostError.
pub type PostResult<T> = Result<T, PostError>;
