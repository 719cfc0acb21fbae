//! Repository for the foods collection.

use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Database};

use super::{RepositoryError, UpsertOutcome, inserted_id_hex, parse_object_id};
use crate::models::{Food, MyFood, TopFood};
use crate::query::{FoodPage, PageParams};

const COLLECTION: &str = "foods";

/// Repository for food records.
pub struct FoodRepository<'a> {
    db: &'a Database,
}

impl<'a> FoodRepository<'a> {
    /// Create a new food repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Food> {
        self.db.collection(COLLECTION)
    }

    /// One page of foods in the store's natural order.
    ///
    /// Skip/limit are pushed down to the store; the reported total is the
    /// store's cheap approximate count of the whole collection, not a live
    /// count of the page's window.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn find_page(&self, params: PageParams) -> Result<FoodPage<Food>, RepositoryError> {
        let coll = self.collection();
        let total_count = coll.estimated_document_count().await?;
        let items = coll
            .find(doc! {})
            .skip(params.skip())
            .limit(i64::try_from(params.limit).unwrap_or(i64::MAX))
            .await?
            .try_collect()
            .await?;
        Ok(FoodPage { total_count, items })
    }

    /// The entire collection, for the in-memory search filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<Food>, RepositoryError> {
        Ok(self.collection().find(doc! {}).await?.try_collect().await?)
    }

    /// Up to `count` foods by descending `sell_count`, projected down to the
    /// listing fields. Tie order among equal counts is whatever the store
    /// yields: stable, but unordered among ties.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_top(&self, count: u64) -> Result<Vec<TopFood>, RepositoryError> {
        // A store-side limit of zero means "no limit"; a request for zero
        // items must answer an empty list.
        if count == 0 {
            return Ok(Vec::new());
        }
        let coll: Collection<TopFood> = self.db.collection(COLLECTION);
        Ok(coll
            .find(doc! {})
            .sort(doc! { "sell_count": -1 })
            .projection(doc! { "name": 1, "image": 1, "category": 1, "price": 1, "sell_count": 1 })
            .limit(i64::try_from(count).unwrap_or(i64::MAX))
            .await?
            .try_collect()
            .await?)
    }

    /// The entire collection projected down to the owner-listing fields.
    /// The ownership filter itself runs in memory at the call site.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all_with_creator(&self) -> Result<Vec<MyFood>, RepositoryError> {
        let coll: Collection<MyFood> = self.db.collection(COLLECTION);
        Ok(coll
            .find(doc! {})
            .projection(doc! { "name": 1, "size": 1, "image": 1, "price": 1, "creator": 1 })
            .await?
            .try_collect()
            .await?)
    }

    /// Look up a single food by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidId` for a malformed id and
    /// `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Food>, RepositoryError> {
        let oid = parse_object_id(id)?;
        Ok(self.collection().find_one(doc! { "_id": oid }).await?)
    }

    /// Insert a new food, returning the store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, food: &Food) -> Result<String, RepositoryError> {
        let result = self.collection().insert_one(food).await?;
        Ok(inserted_id_hex(&result.inserted_id))
    }

    /// Replace a food's fields wholesale, creating the record if the id does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidId` for a malformed id,
    /// `RepositoryError::Serialization` if the record cannot be mapped, and
    /// `RepositoryError::Database` if the update fails.
    pub async fn upsert(&self, id: &str, food: &Food) -> Result<UpsertOutcome, RepositoryError> {
        let oid = parse_object_id(id)?;
        let fields = mongodb::bson::to_document(food)?;
        let result = self
            .collection()
            .update_one(doc! { "_id": oid }, doc! { "$set": fields })
            .upsert(true)
            .await?;
        Ok(result.into())
    }
}
