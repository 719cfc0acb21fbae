//! Session cookie construction.
//!
//! The token rides in an httpOnly cookie named `token`. Attribute choice
//! depends on the deployment environment: production serves the frontend
//! from a different origin, so the cookie must be `Secure; SameSite=None`;
//! local development runs over plain HTTP and uses `SameSite=Strict`.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::config::Environment;

/// Cookie name for the session token.
pub const SESSION_COOKIE: &str = "token";

/// Build the httpOnly session cookie carrying `token`.
#[must_use]
pub fn session_cookie(token: &str, max_age_secs: i64, environment: Environment) -> Cookie<'static> {
    base_cookie(token.to_string(), Duration::seconds(max_age_secs), environment)
}

/// Build an immediately-expired cookie instructing the client to discard
/// its session token.
#[must_use]
pub fn clear_session_cookie(environment: Environment) -> Cookie<'static> {
    base_cookie(String::new(), Duration::ZERO, environment)
}

fn base_cookie(value: String, max_age: Duration, environment: Environment) -> Cookie<'static> {
    let same_site = if environment.is_production() {
        SameSite::None
    } else {
        SameSite::Strict
    };
    Cookie::build((SESSION_COOKIE.to_string(), value))
        .http_only(true)
        .secure(environment.is_production())
        .same_site(same_site)
        .path("/".to_string())
        .max_age(max_age)
        .build()
}
