//! Session route handlers: token issuance and logout.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::Result;
use crate::services::{auth, cookies};
use crate::state::AppState;

/// Longest session lifetime a client may ask for: one day.
const MAX_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Token request body.
#[derive(Debug, Deserialize)]
pub struct IssueTokenRequest {
    pub email: String,
    /// Optional lifetime override, clamped to [1, 86400] seconds.
    #[serde(default)]
    pub ttl_secs: Option<i64>,
}

/// Issue a session token for the supplied identity and attach it as the
/// session cookie.
#[instrument(skip(state, jar, body), fields(email = %body.email))]
pub async fn issue_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<IssueTokenRequest>,
) -> Result<(CookieJar, Json<Value>)> {
    let config = state.config();
    let ttl = body
        .ttl_secs
        .unwrap_or(config.token_ttl_secs)
        .clamp(1, MAX_TOKEN_TTL_SECS);

    let token = auth::issue(&config.jwt_secret, &body.email, ttl)?;
    let jar = jar.add(cookies::session_cookie(&token, ttl, config.environment));

    tracing::debug!(ttl_secs = ttl, "session token issued");
    Ok((jar, Json(json!({ "success": true }))))
}

/// Clear the session cookie. Tokens are stateless, so this only instructs
/// the client to discard its copy.
#[instrument(skip(state, jar))]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = jar.add(cookies::clear_session_cookie(state.config().environment));
    (jar, Json(json!({ "success": true })))
}
