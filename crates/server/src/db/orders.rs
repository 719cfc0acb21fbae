//! Repository for the orders collection.

use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::{Collection, Database};

use super::{RepositoryError, inserted_id_hex, parse_object_id};
use crate::models::Order;

const COLLECTION: &str = "orders";

/// Repository for purchase records.
pub struct OrderRepository<'a> {
    db: &'a Database,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Order> {
        self.db.collection(COLLECTION)
    }

    /// All orders with an exact `customer_email` match.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_customer_email(&self, email: &str) -> Result<Vec<Order>, RepositoryError> {
        Ok(self
            .collection()
            .find(doc! { "customer_email": email })
            .await?
            .try_collect()
            .await?)
    }

    /// Look up a single order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidId` for a malformed id and
    /// `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Order>, RepositoryError> {
        let oid = parse_object_id(id)?;
        Ok(self.collection().find_one(doc! { "_id": oid }).await?)
    }

    /// Insert an order payload verbatim, returning the store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, order: Document) -> Result<String, RepositoryError> {
        let coll: Collection<Document> = self.db.collection(COLLECTION);
        let result = coll.insert_one(order).await?;
        Ok(inserted_id_hex(&result.inserted_id))
    }

    /// Delete an order by id, conditioned on the owning customer email,
    /// returning how many records were removed.
    ///
    /// The ownership condition lives in the delete filter itself so the
    /// record cannot change hands between a read and the delete.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidId` for a malformed id and
    /// `RepositoryError::Database` if the delete fails.
    pub async fn delete_owned(
        &self,
        id: &str,
        customer_email: &str,
    ) -> Result<u64, RepositoryError> {
        let oid = parse_object_id(id)?;
        let result = self
            .collection()
            .delete_one(owned_order_filter(oid, customer_email))
            .await?;
        Ok(result.deleted_count)
    }
}

/// Filter matching an order only when both its id and owner line up.
fn owned_order_filter(id: mongodb::bson::oid::ObjectId, customer_email: &str) -> Document {
    doc! { "_id": id, "customer_email": customer_email }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_owned_delete_filter_requires_id_and_owner() {
        let oid = ObjectId::new();
        let filter = owned_order_filter(oid, "a@x.com");
        assert_eq!(filter.get_object_id("_id").unwrap(), oid);
        assert_eq!(filter.get_str("customer_email").unwrap(), "a@x.com");
        assert_eq!(filter.len(), 2);
    }
}
