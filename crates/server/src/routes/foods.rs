//! Food route handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::db::UpsertOutcome;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Food, MyFood, TopFood};
use crate::query::{self, FoodPage, PageParams};
use crate::services::auth::ensure_owner;
use crate::state::AppState;

/// Pagination query parameters. Accepted as text and parsed explicitly so
/// non-numeric input becomes a 400, not a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: String,
    #[serde(default)]
    pub limit: String,
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub page: String,
    #[serde(default)]
    pub limit: String,
    #[serde(default, rename = "searchText")]
    pub search_text: String,
}

/// Top-foods query parameters.
#[derive(Debug, Deserialize)]
pub struct TopQuery {
    #[serde(default, rename = "foodCount")]
    pub food_count: String,
}

/// Owner-scoped listing query parameters.
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    #[serde(default)]
    pub email: String,
}

/// Update query parameters.
#[derive(Debug, Deserialize)]
pub struct UpdateQuery {
    #[serde(default)]
    pub id: String,
}

/// Paginated food listing in the store's natural order.
#[instrument(skip(state))]
pub async fn all_foods(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Result<Json<FoodPage<Food>>> {
    let params = PageParams::parse(&q.page, &q.limit)?;
    let page = state.foods().find_page(params).await?;
    Ok(Json(page))
}

/// Paginated food listing filtered by a case-insensitive name substring.
///
/// An empty `searchText` behaves exactly like `all-foods`: skip/limit go to
/// the store and the total is the approximate global count. A non-empty
/// search pulls the whole collection, filters in memory, and reports the
/// exact filtered count. Both counts are load-bearing for clients.
#[instrument(skip(state), fields(search = %q.search_text))]
pub async fn searched_foods(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<FoodPage<Food>>> {
    let params = PageParams::parse(&q.page, &q.limit)?;

    if q.search_text.is_empty() {
        let page = state.foods().find_page(params).await?;
        return Ok(Json(page));
    }

    let all = state.foods().find_all().await?;
    let filtered: Vec<Food> = all
        .into_iter()
        .filter(|food| query::name_matches(&food.name, &q.search_text))
        .collect();
    Ok(Json(query::paginate(filtered, params)))
}

/// Single food lookup. A miss answers an empty object rather than 404; the
/// client contract treats absence as ordinary data.
#[instrument(skip(state))]
pub async fn single_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let food = state.foods().find_by_id(&id).await?;
    let value = match food {
        Some(food) => serde_json::to_value(food).map_err(|e| AppError::Internal(e.to_string()))?,
        None => json!({}),
    };
    Ok(Json(value))
}

/// Top N foods by descending sell count.
#[instrument(skip(state))]
pub async fn top_foods(
    State(state): State<AppState>,
    Query(q): Query<TopQuery>,
) -> Result<Json<Vec<TopFood>>> {
    let count = query::parse_count("foodCount", &q.food_count)?;
    let foods = state.foods().find_top(count).await?;
    Ok(Json(foods))
}

/// Insert a new food record.
#[instrument(skip(state, food), fields(name = %food.name))]
pub async fn add_new(
    State(state): State<AppState>,
    Json(food): Json<Food>,
) -> Result<Json<Value>> {
    let inserted_id = state.foods().insert(&food).await?;
    Ok(Json(json!({ "insertedId": inserted_id })))
}

/// Owner-scoped listing: foods whose creator email matches the
/// authenticated identity. Guard first, then the ownership check against
/// the caller-supplied email parameter.
#[instrument(skip(state, claims), fields(email = %q.email))]
pub async fn my_foods(
    State(state): State<AppState>,
    RequireAuth(claims): RequireAuth,
    Query(q): Query<OwnerQuery>,
) -> Result<Json<Vec<MyFood>>> {
    ensure_owner(&claims, &q.email)?;

    let all = state.foods().find_all_with_creator().await?;
    let mine: Vec<MyFood> = all
        .into_iter()
        .filter(|food| food.creator.email == claims.email)
        .collect();
    Ok(Json(mine))
}

/// Upsert-update a food's fields wholesale, keyed by id.
#[instrument(skip(state, food))]
pub async fn update_food(
    State(state): State<AppState>,
    Query(q): Query<UpdateQuery>,
    Json(food): Json<Food>,
) -> Result<Json<UpsertOutcome>> {
    let outcome = state.foods().upsert(&q.id, &food).await?;
    Ok(Json(outcome))
}
