//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail};
use postable::{RecordDefaults, Status};

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON document store (default: ./posts.json).
    pub store_path: PathBuf,

    /// Status written into newly created documents (default: draft).
    pub default_status: Status,

    /// Body written into newly created documents (default: "Empty.").
    pub placeholder_body: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store_path = lookup("POSTABLE_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./posts.json"));

        let default_status = lookup("POSTABLE_DEFAULT_STATUS")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "draft".to_string());
        if default_status.is_empty() {
            bail!("POSTABLE_DEFAULT_STATUS must not be empty");
        }

        let placeholder_body =
            lookup("POSTABLE_PLACEHOLDER_BODY").unwrap_or_else(|| "Empty.".to_string());

        Ok(Self {
            store_path,
            default_status: Status::from(default_status),
            placeholder_body,
        })
    }

    /// Insertion defaults for new records.
    pub fn record_defaults(&self) -> RecordDefaults {
        RecordDefaults {
            title: String::new(),
            body: self.placeholder_body.clone(),
            status: self.default_status.clone(),
        }
    }
}
