//! User records.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::serialize_opt_object_id;

/// A user as stored in the users collection.
///
/// Also the insert/update request body shape; `id` is store-assigned.
/// No uniqueness is enforced on `email` at this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_object_id"
    )]
    pub id: Option<ObjectId>,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub email: String,
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Profile shape returned by the user lookup; the id is projected out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub email: String,
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_field_names() {
        let user: User = serde_json::from_value(json!({
            "displayName": "Ada",
            "email": "ada@example.com",
            "photoURL": "https://example.com/ada.png"
        }))
        .unwrap();
        assert_eq!(user.display_name, "Ada");

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("displayName").is_some());
        assert!(value.get("photoURL").is_some());
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn test_profile_has_no_id_field() {
        let profile = UserProfile {
            display_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            photo_url: None,
        };
        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("_id").is_none());
        assert!(value.get("photoURL").is_none());
    }
}
