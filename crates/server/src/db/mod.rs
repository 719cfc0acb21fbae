//! Record store access for the foods, users and orders collections.
//!
//! The database is a plain document store reached through repository
//! structs, one per collection. The connection is opened once at process
//! start and the handle is shared through [`crate::state::AppState`];
//! concurrent-write consistency is entirely the store's concern, since no
//! handler performs more than one mutating call.

pub mod foods;
pub mod orders;
pub mod users;

pub use foods::FoodRepository;
pub use orders::OrderRepository;
pub use users::UserRepository;

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, doc};
use mongodb::results::UpdateResult;
use mongodb::{Client, Database};
use secrecy::ExposeSecret;
use serde::Serialize;
use thiserror::Error;

use crate::config::AppConfig;

/// Record store errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Driver-level failure (connectivity, query execution).
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A record could not be mapped to a document.
    #[error("serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),

    /// The caller supplied something that is not a record id.
    #[error("invalid record id: {0:?}")]
    InvalidId(String),
}

/// Connect to the store and verify it is reachable.
///
/// # Errors
///
/// Returns `mongodb::error::Error` if the URL is malformed or the initial
/// ping fails.
pub async fn connect(config: &AppConfig) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(config.database_url.expose_secret()).await?;
    let db = client.database(&config.database_name);
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(db)
}

/// Parse a caller-supplied record id.
///
/// # Errors
///
/// Returns `RepositoryError::InvalidId` if the text is not a valid id.
pub fn parse_object_id(id: &str) -> Result<ObjectId, RepositoryError> {
    ObjectId::parse_str(id).map_err(|_| RepositoryError::InvalidId(id.to_string()))
}

/// Render a store-assigned id as its hex form for API responses.
#[must_use]
pub fn inserted_id_hex(id: &Bson) -> String {
    id.as_object_id()
        .map_or_else(|| id.to_string(), |oid| oid.to_hex())
}

/// Outcome of an upsert-update, reported back to the client.
#[derive(Debug, Clone, Serialize)]
pub struct UpsertOutcome {
    #[serde(rename = "matchedCount")]
    pub matched_count: u64,
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
    #[serde(rename = "upsertedId", skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<String>,
}

impl From<UpdateResult> for UpsertOutcome {
    fn from(result: UpdateResult) -> Self {
        Self {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.as_ref().map(inserted_id_hex),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id_valid() {
        let oid = ObjectId::new();
        assert_eq!(parse_object_id(&oid.to_hex()).unwrap(), oid);
    }

    #[test]
    fn test_parse_object_id_rejects_garbage() {
        assert!(matches!(
            parse_object_id("not-an-id"),
            Err(RepositoryError::InvalidId(_))
        ));
    }

    #[test]
    fn test_inserted_id_hex() {
        let oid = ObjectId::new();
        assert_eq!(inserted_id_hex(&Bson::ObjectId(oid)), oid.to_hex());
    }

    #[test]
    fn test_upsert_outcome_serialization() {
        let outcome = UpsertOutcome {
            matched_count: 1,
            modified_count: 1,
            upserted_id: None,
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["matchedCount"], 1);
        assert!(value.get("upsertedId").is_none());
    }
}
