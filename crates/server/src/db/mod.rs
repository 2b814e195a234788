//! Store gateway for the user collection.
//!
//! The gateway exclusively owns the collection handle; handlers call through
//! the [`UserStore`] trait and never touch the store directly. Two backends
//! exist: [`MongoUserStore`] for production and [`MemoryUserStore`] for tests
//! and development.

pub mod memory;
pub mod mongo;

use std::time::Duration;

use async_trait::async_trait;
use bson::doc;
use mongodb::Client;
use secrecy::ExposeSecret;
use thiserror::Error;
use tokio::time::timeout;

use roster_core::UserId;

use crate::config::ServerConfig;
use crate::models::{User, UserDraft, UserPatch};

pub use memory::MemoryUserStore;
pub use mongo::MongoUserStore;

/// Deadline for a single store operation.
pub(crate) const OP_TIMEOUT: Duration = Duration::from_secs(5);

/// Deadline for the startup connection handshake.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors surfaced by a [`UserStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document matched the identifier (read path only).
    #[error("user not found")]
    NotFound,

    /// A read timed out or the stored data failed to decode.
    #[error("read failed: {0}")]
    Read(String),

    /// A write timed out or was rejected by the store.
    #[error("write failed: {0}")]
    Write(String),

    /// The store could not be reached at startup.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn read(err: impl std::fmt::Display) -> Self {
        Self::Read(err.to_string())
    }

    pub(crate) fn write(err: impl std::fmt::Display) -> Self {
        Self::Write(err.to_string())
    }

    pub(crate) fn read_timeout() -> Self {
        Self::Read(format!("timed out after {OP_TIMEOUT:?}"))
    }

    pub(crate) fn write_timeout() -> Self {
        Self::Write(format!("timed out after {OP_TIMEOUT:?}"))
    }
}

/// Gateway to the user collection.
///
/// Operations are keyed exclusively by [`UserId`]; identifier parsing happens
/// at the HTTP boundary, so a store never sees a malformed key.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user; the store assigns the identifier.
    async fn insert(&self, draft: UserDraft) -> Result<UserId, StoreError>;

    /// Every user in the collection, in no guaranteed order.
    ///
    /// The result is fully materialized before returning; callers never hold
    /// a live cursor.
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    /// The user with `id`, or [`StoreError::NotFound`].
    async fn find_by_id(&self, id: UserId) -> Result<User, StoreError>;

    /// Overwrite the fields present in `patch` on the user with `id`.
    ///
    /// Matching zero documents is not an error.
    async fn update_by_id(&self, id: UserId, patch: UserPatch) -> Result<(), StoreError>;

    /// Delete the user with `id`. Deleting a missing id is not an error.
    async fn delete_by_id(&self, id: UserId) -> Result<(), StoreError>;
}

/// Connect to MongoDB and return the production store gateway.
///
/// Verifies connectivity with a ping so a bad connection string fails here,
/// at startup, rather than on the first request. There is no retry; the
/// caller treats failure as fatal.
///
/// # Errors
///
/// Returns [`StoreError::Unavailable`] if the client cannot be built or the
/// ping does not succeed within the connection deadline.
pub async fn connect(config: &ServerConfig) -> Result<MongoUserStore, StoreError> {
    let client = timeout(
        CONNECT_TIMEOUT,
        Client::with_uri_str(config.mongodb_uri.expose_secret()),
    )
    .await
    .map_err(|_| StoreError::Unavailable(format!("connect timed out after {CONNECT_TIMEOUT:?}")))?
    .map_err(|e| StoreError::Unavailable(e.to_string()))?;

    let database = client.database(&config.database);
    timeout(CONNECT_TIMEOUT, database.run_command(doc! { "ping": 1 }))
        .await
        .map_err(|_| StoreError::Unavailable(format!("ping timed out after {CONNECT_TIMEOUT:?}")))?
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

    tracing::info!(
        database = %config.database,
        collection = %config.collection,
        "connected to MongoDB"
    );

    Ok(MongoUserStore::new(&database, &config.collection))
}
