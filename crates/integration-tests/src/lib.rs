//! Integration tests for roster.
//!
//! The tests in `tests/` drive the real router over HTTP: the application is
//! served on an ephemeral port with an in-memory store backend, so the suite
//! needs no running MongoDB. The Mongo backend shares its observable
//! semantics with the in-memory one (asserted by the server's unit tests).
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p roster-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use async_trait::async_trait;

use roster_core::UserId;
use roster_server::db::{MemoryUserStore, StoreError, UserStore};
use roster_server::models::{User, UserDraft, UserPatch};
use roster_server::routes;
use roster_server::state::AppState;

/// A running application instance under test.
pub struct TestApp {
    /// Base URL of the spawned server, e.g. `http://127.0.0.1:49152`.
    pub base_url: String,
    /// HTTP client for driving the API.
    pub client: reqwest::Client,
}

impl TestApp {
    /// Absolute URL for `path` on the spawned server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Serve the application over an in-memory store on an ephemeral port.
///
/// # Panics
///
/// Panics if the listener cannot be bound; tests have no graceful path there.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(Arc::new(MemoryUserStore::new())).await
}

/// Serve the application over an arbitrary store backend.
pub async fn spawn_app_with(store: Arc<dyn UserStore>) -> TestApp {
    let app = routes::app(AppState::new(store));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind ephemeral port");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    TestApp {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
    }
}

/// A store backend that panics on any use.
///
/// Serving the app over this backend proves a request was rejected at the
/// HTTP boundary without ever invoking the store.
pub struct UnreachableStore;

#[async_trait]
impl UserStore for UnreachableStore {
    async fn insert(&self, _draft: UserDraft) -> Result<UserId, StoreError> {
        panic!("store invoked");
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        panic!("store invoked");
    }

    async fn find_by_id(&self, _id: UserId) -> Result<User, StoreError> {
        panic!("store invoked");
    }

    async fn update_by_id(&self, _id: UserId, _patch: UserPatch) -> Result<(), StoreError> {
        panic!("store invoked");
    }

    async fn delete_by_id(&self, _id: UserId) -> Result<(), StoreError> {
        panic!("store invoked");
    }
}
