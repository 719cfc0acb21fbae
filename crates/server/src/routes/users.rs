//! User route handlers.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::db::UpsertOutcome;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::state::AppState;

/// User id query parameter.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    #[serde(default, rename = "uId")]
    pub u_id: String,
}

/// Profile lookup by id. A miss answers an empty object; the stored id is
/// projected out of the response.
#[instrument(skip(state))]
pub async fn profile(
    State(state): State<AppState>,
    Query(q): Query<UserIdQuery>,
) -> Result<Json<Value>> {
    let profile = state.users().profile_by_id(&q.u_id).await?;
    let value = match profile {
        Some(profile) => {
            serde_json::to_value(profile).map_err(|e| AppError::Internal(e.to_string()))?
        }
        None => json!({}),
    };
    Ok(Json(value))
}

/// Insert a new user record.
#[instrument(skip(state, user), fields(email = %user.email))]
pub async fn create(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> Result<Json<Value>> {
    let inserted_id = state.users().insert(&user).await?;
    Ok(Json(json!({ "insertedId": inserted_id })))
}

/// Upsert-update a user's fields wholesale, keyed by id. A nonexistent id
/// silently creates the record.
#[instrument(skip(state, user))]
pub async fn update(
    State(state): State<AppState>,
    Query(q): Query<UserIdQuery>,
    Json(user): Json<User>,
) -> Result<Json<UpsertOutcome>> {
    let outcome = state.users().upsert(&q.u_id, &user).await?;
    Ok(Json(outcome))
}
