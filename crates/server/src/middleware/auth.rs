//! Authorization guard.
//!
//! Provides the extractor that gates identity-scoped routes on a valid
//! session cookie. Handlers combine it with
//! [`crate::services::auth::ensure_owner`] so that a valid session for the
//! wrong identity answers 403, not 401 — every route that exposes
//! identity-scoped data performs both checks, in that order.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use crate::error::AppError;
use crate::services::auth::{self, AuthError, Claims};
use crate::services::cookies::SESSION_COOKIE;
use crate::state::AppState;

/// Extractor that requires a valid session token.
///
/// Rejects with 401 before the handler runs if the cookie is absent or the
/// token does not verify. On success the decoded claims are handed to the
/// handler.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(claims): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", claims.email)
/// }
/// ```
pub struct RequireAuth(pub Claims);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(SESSION_COOKIE).ok_or(AuthError::MissingToken)?;
        let claims = auth::verify(&state.config().jwt_secret, cookie.value())?;
        Ok(Self(claims))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;
    use axum::http::header::COOKIE;
    use mongodb::Client;
    use mongodb::options::{ClientOptions, ServerAddress};
    use secrecy::SecretString;

    use crate::config::{AppConfig, Environment};

    /// State with a lazily-connecting store handle; the extractor never
    /// touches the store, only the config.
    fn test_state() -> AppState {
        let config = AppConfig {
            database_url: SecretString::from("mongodb://localhost:27017"),
            database_name: "foodbuzz-test".to_string(),
            host: "127.0.0.1".parse().unwrap(),
            port: 5000,
            jwt_secret: SecretString::from("test-signing-secret-0123456789abcdef"),
            environment: Environment::Development,
            allowed_origins: Vec::new(),
            token_ttl_secs: 3600,
            request_timeout_secs: 15,
        };
        let options = ClientOptions::builder()
            .hosts(vec![ServerAddress::Tcp {
                host: "localhost".to_string(),
                port: Some(27017),
            }])
            .build();
        let client = Client::with_options(options).unwrap();
        let db = client.database(&config.database_name);
        AppState::new(config, db)
    }

    fn parts_with_cookie(cookie: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/v1/my-foods");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_missing_cookie_is_rejected() {
        let state = test_state();
        let mut parts = parts_with_cookie(None);
        let result = RequireAuth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(
            result,
            Err(AppError::Auth(AuthError::MissingToken))
        ));
    }

    #[tokio::test]
    async fn test_wrong_cookie_name_is_rejected() {
        let state = test_state();
        let mut parts = parts_with_cookie(Some("session=abc"));
        let result = RequireAuth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(
            result,
            Err(AppError::Auth(AuthError::MissingToken))
        ));
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let state = test_state();
        let mut parts = parts_with_cookie(Some("token=not-a-token"));
        let result = RequireAuth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(
            result,
            Err(AppError::Auth(AuthError::InvalidOrExpired))
        ));
    }

    #[tokio::test]
    async fn test_valid_cookie_yields_claims() {
        let state = test_state();
        let token = auth::issue(&state.config().jwt_secret, "a@x.com", 3600).unwrap();
        let mut parts = parts_with_cookie(Some(&format!("{SESSION_COOKIE}={token}")));
        let RequireAuth(claims) = RequireAuth::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(claims.email, "a@x.com");
    }
}
