//! Repository for the users collection.

use mongodb::bson::doc;
use mongodb::{Collection, Database};

use super::{RepositoryError, UpsertOutcome, inserted_id_hex, parse_object_id};
use crate::models::{User, UserProfile};

const COLLECTION: &str = "users";

/// Repository for user records.
pub struct UserRepository<'a> {
    db: &'a Database,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.collection(COLLECTION)
    }

    /// Look up a user's profile by id; the id itself is projected out.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidId` for a malformed id and
    /// `RepositoryError::Database` if the query fails.
    pub async fn profile_by_id(&self, id: &str) -> Result<Option<UserProfile>, RepositoryError> {
        let oid = parse_object_id(id)?;
        let coll: Collection<UserProfile> = self.db.collection(COLLECTION);
        Ok(coll
            .find_one(doc! { "_id": oid })
            .projection(doc! { "_id": 0, "displayName": 1, "email": 1, "photoURL": 1 })
            .await?)
    }

    /// Insert a new user, returning the store-assigned id. No uniqueness
    /// check on email happens at this layer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, user: &User) -> Result<String, RepositoryError> {
        let result = self.collection().insert_one(user).await?;
        Ok(inserted_id_hex(&result.inserted_id))
    }

    /// Replace a user's fields wholesale, keyed by id. An update to a
    /// nonexistent id silently creates the record; callers accept that.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidId` for a malformed id,
    /// `RepositoryError::Serialization` if the record cannot be mapped, and
    /// `RepositoryError::Database` if the update fails.
    pub async fn upsert(&self, id: &str, user: &User) -> Result<UpsertOutcome, RepositoryError> {
        let oid = parse_object_id(id)?;
        let fields = mongodb::bson::to_document(user)?;
        let result = self
            .collection()
            .update_one(doc! { "_id": oid }, doc! { "$set": fields })
            .upsert(true)
            .await?;
        Ok(result.into())
    }
}
