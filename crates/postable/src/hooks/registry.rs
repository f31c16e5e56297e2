//! Hook registry - holds type-match filters and load observers.
//!
//! Handlers are kept sorted by weight (lower = called first). Handlers with
//! equal weight run in registration order.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::{HookScope, LoadEvent, LoadObserverFn, TypeCheck, TypeFilterFn};

struct HookHandler<F: ?Sized> {
    scope: HookScope,
    weight: i32,
    hook: Arc<F>,
}

impl<F: ?Sized> Clone for HookHandler<F> {
    fn clone(&self) -> Self {
        Self {
            scope: self.scope.clone(),
            weight: self.weight,
            hook: Arc::clone(&self.hook),
        }
    }
}

/// Registry of record hooks.
///
/// Cheap to clone; handlers are shared.
#[derive(Clone, Default)]
pub struct Hooks {
    type_filters: Vec<HookHandler<TypeFilterFn>>,
    load_observers: Vec<HookHandler<LoadObserverFn>>,
}

impl Hooks {
    /// Create an empty registry. Type matching is strict equality.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type-match filter.
    ///
    /// The filter receives the verdict so far and returns the new verdict.
    pub fn with_type_filter<F>(mut self, scope: HookScope, weight: i32, filter: F) -> Self
    where
        F: Fn(bool, &TypeCheck<'_>) -> bool + Send + Sync + 'static,
    {
        self.type_filters.push(HookHandler {
            scope,
            weight,
            hook: Arc::new(filter),
        });
        self.type_filters.sort_by_key(|h| h.weight);
        self
    }

    /// Register a load observer.
    pub fn with_load_observer<F>(mut self, scope: HookScope, weight: i32, observer: F) -> Self
    where
        F: Fn(&LoadEvent<'_>) + Send + Sync + 'static,
    {
        self.load_observers.push(HookHandler {
            scope,
            weight,
            hook: Arc::new(observer),
        });
        self.load_observers.sort_by_key(|h| h.weight);
        self
    }

    /// Decide whether a loaded document's type is acceptable.
    ///
    /// Starts from strict equality and folds every applicable filter over it.
    pub fn types_match(&self, check: &TypeCheck<'_>) -> bool {
        self.type_filters
            .iter()
            .filter(|h| h.scope.applies_to(check.host_type))
            .fold(check.is_exact(), |verdict, h| (h.hook)(verdict, check))
    }

    /// Notify applicable observers that a load completed.
    pub fn notify_loaded(&self, event: &LoadEvent<'_>) {
        let mut notified = 0usize;
        for handler in &self.load_observers {
            if handler.scope.applies_to(event.host_type) {
                (handler.hook)(event);
                notified += 1;
            }
        }

        if notified > 0 {
            debug!(
                host = event.host_type,
                id = event.document.id,
                observers = notified,
                "load observers notified"
            );
        }
    }

    /// Number of registered type-match filters.
    pub fn type_filter_count(&self) -> usize {
        self.type_filters.len()
    }

    /// Number of registered load observers.
    pub fn load_observer_count(&self) -> usize {
        self.load_observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.type_filters.is_empty() && self.load_observers.is_empty()
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("type_filters", &self.type_filters.len())
            .field("load_observers", &self.load_observers.len())
            .finish()
    }
}
