//! MongoDB-backed store gateway.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, doc};
use futures_util::TryStreamExt;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::timeout;

use roster_core::UserId;

use super::{OP_TIMEOUT, StoreError, UserStore};
use crate::models::{User, UserDraft, UserPatch};

/// A user document in the store's record encoding.
///
/// The only difference from the wire shape is the key: the store addresses
/// documents by a native `_id` ObjectId, while the wire uses hex strings.
#[derive(Debug, Serialize, Deserialize)]
struct UserRecord {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: UserId::from(record.id),
            name: record.name,
            email: record.email,
            extra: record.extra,
        }
    }
}

/// Production store gateway over a MongoDB collection.
///
/// Every operation runs under the 5-second deadline. A timed-out call stops waiting
/// and reports failure; the driver offers no way to cancel the server-side
/// operation, which may still complete.
#[derive(Debug, Clone)]
pub struct MongoUserStore {
    users: Collection<UserRecord>,
}

impl MongoUserStore {
    /// Create the gateway over `collection` in `database`.
    #[must_use]
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            users: database.collection(collection),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, mut draft: UserDraft) -> Result<UserId, StoreError> {
        draft.strip_reserved();

        // Insert without an `_id` so the store assigns one.
        let drafts = self.users.clone_with_type::<UserDraft>();
        let result = timeout(OP_TIMEOUT, drafts.insert_one(&draft))
            .await
            .map_err(|_| StoreError::write_timeout())?
            .map_err(StoreError::write)?;

        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(UserId::from(oid)),
            other => Err(StoreError::Write(format!(
                "store returned a non-ObjectId key: {other}"
            ))),
        }
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        // One deadline covers both the query and draining the cursor; decode
        // failures surface while materializing.
        let records: Vec<UserRecord> = timeout(OP_TIMEOUT, async {
            let cursor = self.users.find(doc! {}).await?;
            cursor.try_collect().await
        })
        .await
        .map_err(|_| StoreError::read_timeout())?
        .map_err(StoreError::read)?;

        Ok(records.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, StoreError> {
        let record = timeout(
            OP_TIMEOUT,
            self.users.find_one(doc! { "_id": id.as_object_id() }),
        )
        .await
        .map_err(|_| StoreError::read_timeout())?
        .map_err(StoreError::read)?;

        record.map(User::from).ok_or(StoreError::NotFound)
    }

    async fn update_by_id(&self, id: UserId, mut patch: UserPatch) -> Result<(), StoreError> {
        patch.strip_reserved();

        // The store rejects an empty `$set`; a zero-field update is a no-op.
        if patch.is_empty() {
            return Ok(());
        }
        let fields = bson::to_document(&patch).map_err(StoreError::write)?;

        // Matching zero documents is deliberately not an error.
        timeout(
            OP_TIMEOUT,
            self.users
                .update_one(doc! { "_id": id.as_object_id() }, doc! { "$set": fields }),
        )
        .await
        .map_err(|_| StoreError::write_timeout())?
        .map_err(StoreError::write)?;

        Ok(())
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), StoreError> {
        // Deleting a missing id is deliberately not an error.
        timeout(
            OP_TIMEOUT,
            self.users.delete_one(doc! { "_id": id.as_object_id() }),
        )
        .await
        .map_err(|_| StoreError::write_timeout())?
        .map_err(StoreError::write)?;

        Ok(())
    }
}
