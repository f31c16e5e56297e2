//! Hook system for record extension points.
//!
//! Hooks are injected into a record at construction. Two kinds exist:
//!
//! - **Type-match filters** decide whether a loaded document's type is
//!   acceptable for the record. The strict equality result is threaded
//!   through every applicable filter in weight order (lower = earlier).
//! - **Load observers** are notified after a document has been attached.
//!
//! Each hook is either global or scoped to a single host type.

mod registry;

use std::any::Any;

pub use registry::Hooks;

use crate::types::Document;

/// Which hosts a hook applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookScope {
    /// Every host type.
    Global,
    /// Only the host whose type name (as reported by `std::any::type_name`) matches.
    Host(String),
}

impl HookScope {
    /// Scope a hook to host type `T`.
    pub fn host<T: ?Sized>() -> Self {
        Self::Host(std::any::type_name::<T>().to_string())
    }

    pub fn applies_to(&self, host_type: &str) -> bool {
        match self {
            Self::Global => true,
            Self::Host(name) => name == host_type,
        }
    }
}

/// Input to a type-match filter.
#[derive(Debug, Clone, Copy)]
pub struct TypeCheck<'a> {
    /// The record's own type.
    pub expected: &'a str,
    /// The loaded document's declared type.
    pub actual: &'a str,
    /// Type name of the host doing the load.
    pub host_type: &'a str,
}

impl TypeCheck<'_> {
    pub fn is_exact(&self) -> bool {
        self.expected == self.actual
    }
}

/// Payload handed to load observers.
pub struct LoadEvent<'a> {
    /// Type name of the host that finished loading.
    pub host_type: &'a str,
    /// The host itself, for observers that want to downcast.
    pub host: &'a dyn Any,
    /// The document just attached.
    pub document: &'a Document,
}

impl LoadEvent<'_> {
    /// Downcast the host to a concrete type.
    pub fn host_as<T: Any>(&self) -> Option<&T> {
        self.host.downcast_ref::<T>()
    }
}

/// Filter over the running type-match verdict.
pub type TypeFilterFn = dyn Fn(bool, &TypeCheck<'_>) -> bool + Send + Sync;

/// Observer run after a successful load.
pub type LoadObserverFn = dyn Fn(&LoadEvent<'_>) + Send + Sync;
