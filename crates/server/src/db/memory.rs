//! In-memory store backend.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use roster_core::UserId;

use super::{StoreError, UserStore};
use crate::models::{User, UserDraft, UserPatch};

/// Thread-safe, in-memory store gateway for tests and development.
///
/// Mirrors the observable semantics of [`super::MongoUserStore`], including
/// update and delete treating a missing id as success.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<BTreeMap<UserId, User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, draft: UserDraft) -> Result<UserId, StoreError> {
        let id = UserId::generate();
        self.users.write().await.insert(id, draft.into_user(id));
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_by_id(&self, id: UserId, mut patch: UserPatch) -> Result<(), StoreError> {
        patch.strip_reserved();
        // Updating a missing id reports success, same as the Mongo backend.
        if let Some(user) = self.users.write().await.get_mut(&id) {
            patch.apply_to(user);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), StoreError> {
        // Deleting a missing id reports success.
        self.users.write().await.remove(&id);
        Ok(())
    }
}
