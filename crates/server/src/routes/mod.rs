//! HTTP route handlers.
//!
//! # Route Structure (nested under `/api/v1`)
//!
//! ```text
//! GET    /                      - Liveness banner
//!
//! # Session
//! POST   /token                 - Issue session cookie for an email
//! POST   /logout                - Clear the session cookie
//!
//! # Users
//! GET    /user?uId=             - Profile lookup (id projected out)
//! POST   /user                  - Insert user
//! PATCH  /user?uId=             - Upsert-update user
//!
//! # Foods
//! GET    /all-foods?page=&limit=                       - Paginated listing
//! GET    /all-searched-foods?page=&limit=&searchText=  - Filtered listing
//! GET    /single-food/{id}      - Single food, or {} on a miss
//! GET    /top-foods?foodCount=  - Top N by sell_count
//! POST   /add-new               - Insert food
//! GET    /my-foods?email=       - Owner-scoped listing (guarded)
//! PATCH  /update-food?id=       - Upsert-update food
//!
//! # Orders (all guarded)
//! GET    /order-history?email=  - Orders by customer email
//! POST   /order-history         - Insert order
//! DELETE /delete-order?id=      - Delete own order
//! ```

pub mod auth;
pub mod foods;
pub mod orders;
pub mod users;

use axum::Router;
use axum::routing::{delete, get, patch, post};

use crate::state::AppState;

/// Liveness message, served at the API root and at `/`.
pub async fn liveness() -> &'static str {
    "Foodbuzz is online..."
}

/// Create the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness))
        .route("/token", post(auth::issue_token))
        .route("/logout", post(auth::logout))
        .route(
            "/user",
            get(users::profile).post(users::create).patch(users::update),
        )
        .route("/all-foods", get(foods::all_foods))
        .route("/all-searched-foods", get(foods::searched_foods))
        .route("/single-food/{id}", get(foods::single_food))
        .route("/top-foods", get(foods::top_foods))
        .route("/add-new", post(foods::add_new))
        .route("/my-foods", get(foods::my_foods))
        .route("/update-food", patch(foods::update_food))
        .route("/order-history", get(orders::history).post(orders::create))
        .route("/delete-order", delete(orders::remove))
}
