//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::UserStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Constructed once at startup with the store
/// gateway injected; read-only thereafter, so concurrent requests share
/// nothing mutable.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn UserStore>,
}

impl AppState {
    /// Create application state around a store gateway.
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    /// The store gateway.
    #[must_use]
    pub fn store(&self) -> &dyn UserStore {
        self.inner.store.as_ref()
    }
}
