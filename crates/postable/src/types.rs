//! Core document types.
//!
//! A [`Document`] is the store-owned payload behind a record. The record
//! layer reads and writes `title`, `body` and `status`; everything else in
//! `fields` is carried through untouched.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned document identifier. Valid ids are positive.
pub type PostId = i64;

/// Publication status of a document.
///
/// `Draft` and `Published` are the two states the record layer transitions
/// between on its own. Any other store-recognized value is carried as
/// `Other` and never validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    Draft,
    Published,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Other(s) => s,
        }
    }

    /// Check if this status is `published`.
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        match s {
            "draft" => Self::Draft,
            "published" => Self::Published,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.as_str() {
            "draft" => Self::Draft,
            "published" => Self::Published,
            _ => Self::Other(s),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored content document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Store-assigned identifier.
    pub id: PostId,

    /// Record type machine name (e.g., "article", "page").
    #[serde(rename = "type")]
    pub post_type: String,

    pub title: String,

    pub body: String,

    pub status: Status,

    /// Opaque extra fields the record layer does not interpret.
    #[serde(default)]
    pub fields: HashMap<String, serde_json::Value>,

    /// Unix timestamp when created.
    #[serde(default)]
    pub created: i64,

    /// Unix timestamp when last changed.
    #[serde(default)]
    pub changed: i64,
}

impl Document {
    /// Get a field value as a specific type.
    pub fn field<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Option<T> {
        self.fields
            .get(name)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Set a field value. Values that fail to serialize are dropped.
    pub fn set_field<T: Serialize>(&mut self, name: &str, value: T) {
        if let Ok(v) = serde_json::to_value(value) {
            self.fields.insert(name.to_string(), v);
        }
    }

    /// Check if this document is published.
    pub fn is_published(&self) -> bool {
        self.status.is_published()
    }
}

/// Input for inserting a new document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub title: String,
    pub body: String,
    pub status: Status,
}

impl NewDocument {
    /// Build a document for insertion under `id` with the given type.
    pub fn into_document(self, id: PostId, post_type: &str, now: i64) -> Document {
        Document {
            id,
            post_type: post_type.to_string(),
            title: self.title,
            body: self.body,
            status: self.status,
            fields: HashMap::new(),
            created: now,
            changed: now,
        }
    }
}
