//! Persisted record types for the foods, users and orders collections.

pub mod food;
pub mod order;
pub mod user;

pub use food::{Creator, Food, MyFood, TopFood};
pub use order::Order;
pub use user::{User, UserProfile};

use mongodb::bson::oid::ObjectId;
use serde::Serializer;

/// Serialize an optional `ObjectId` as its 24-char hex form.
///
/// BSON object ids would otherwise serialize to JSON as `{"$oid": "..."}`,
/// which is not what API clients expect.
pub fn serialize_opt_object_id<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(oid) => serializer.serialize_str(&oid.to_hex()),
        None => serializer.serialize_none(),
    }
}
