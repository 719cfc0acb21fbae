//! Order route handlers.
//!
//! All three operations are identity-scoped and therefore guarded: the
//! history read and the insert check the requested/submitted customer email
//! against the session claim, and the delete checks the stored record's
//! customer email before removing it.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Order;
use crate::services::auth::{AuthError, ensure_owner};
use crate::state::AppState;

/// Customer email query parameter.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub email: String,
}

/// Order id query parameter.
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub id: String,
}

/// Orders belonging to the authenticated customer.
#[instrument(skip(state, claims), fields(email = %q.email))]
pub async fn history(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Query(q): Query<HistoryQuery>,
) -> Result<Json<Vec<Order>>> {
    ensure_owner(&claims, &q.email)?;
    let orders = state.orders().find_by_customer_email(&q.email).await?;
    Ok(Json(orders))
}

/// Insert an order. The payload passes through verbatim, but its
/// `customer_email` must match the session claim.
#[instrument(skip(state, claims, body))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    let customer_email = body
        .get("customer_email")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::BadRequest("customer_email is required".to_string()))?;
    ensure_owner(&claims, customer_email)?;

    let document =
        mongodb::bson::to_document(&body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let inserted_id = state.orders().insert(document).await?;
    Ok(Json(json!({ "insertedId": inserted_id })))
}

/// Delete one of the authenticated customer's orders by id.
///
/// A miss reports zero deletions rather than 404, matching the lookup-miss
/// contract elsewhere. The read only distinguishes miss from forbidden; the
/// delete itself is conditioned on ownership in the store filter.
#[instrument(skip(state, claims))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Query(q): Query<DeleteQuery>,
) -> Result<Json<Value>> {
    let Some(order) = state.orders().find_by_id(&q.id).await? else {
        return Ok(Json(json!({ "deletedCount": 0 })));
    };
    if order.customer_email != claims.email {
        return Err(AuthError::Forbidden.into());
    }

    let deleted_count = state.orders().delete_owned(&q.id, &claims.email).await?;
    Ok(Json(json!({ "deletedCount": deleted_count })))
}
