//! Food item records.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::serialize_opt_object_id;

/// A food item as stored in the foods collection.
///
/// The same shape is accepted as the insert/update request body, in which
/// case `id` is absent and the store assigns one. Updates replace fields
/// wholesale via upsert keyed by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_object_id"
    )]
    pub id: Option<ObjectId>,
    pub name: String,
    pub image: String,
    pub category: String,
    pub price: f64,
    pub size: String,
    /// Monotonically non-decreasing via purchase activity; not enforced here.
    #[serde(default)]
    pub sell_count: i64,
    pub creator: Creator,
}

/// Embedded sub-record identifying who added a food item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
}

/// Projected shape returned by the top-foods listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopFood {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_object_id"
    )]
    pub id: Option<ObjectId>,
    pub name: String,
    pub image: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub sell_count: i64,
}

/// Projected shape returned by the owner-scoped listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyFood {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_object_id"
    )]
    pub id: Option<ObjectId>,
    pub name: String,
    pub size: String,
    pub image: String,
    pub price: f64,
    pub creator: Creator,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_food_id_serializes_as_hex() {
        let oid = ObjectId::new();
        let food = Food {
            id: Some(oid),
            name: "Pizza".to_string(),
            image: "pizza.png".to_string(),
            category: "Italian".to_string(),
            price: 12.5,
            size: "large".to_string(),
            sell_count: 5,
            creator: Creator {
                name: Some("Ada".to_string()),
                email: "ada@example.com".to_string(),
            },
        };

        let value = serde_json::to_value(&food).unwrap();
        assert_eq!(value["_id"], json!(oid.to_hex()));
        assert_eq!(value["sell_count"], json!(5));
    }

    #[test]
    fn test_food_body_without_id_or_sell_count() {
        let food: Food = serde_json::from_value(json!({
            "name": "Ramen",
            "image": "ramen.png",
            "category": "Japanese",
            "price": 9.0,
            "size": "regular",
            "creator": {"email": "ada@example.com"}
        }))
        .unwrap();

        assert!(food.id.is_none());
        assert_eq!(food.sell_count, 0);
        assert!(food.creator.name.is_none());

        // An absent id must not serialize at all, so the store assigns one.
        let value = serde_json::to_value(&food).unwrap();
        assert!(value.get("_id").is_none());
    }
}
