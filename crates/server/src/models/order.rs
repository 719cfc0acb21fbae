//! Purchase records.

use mongodb::bson::Document;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::serialize_opt_object_id;

/// A purchase record from the orders collection.
///
/// Beyond `customer_email`, the order payload is client-defined and passed
/// through verbatim; no link integrity is enforced between `customer_email`
/// and a user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_object_id"
    )]
    pub id: Option<ObjectId>,
    pub customer_email: String,
    #[serde(flatten)]
    pub details: Document,
}
