//! Session token issuance and verification.
//!
//! Tokens are stateless HS256 JWTs carrying an email claim and an expiry.
//! Nothing is persisted server-side, so "logout" is purely the client
//! discarding its cookie; there is no revocation list.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authentication failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No session cookie on the request.
    #[error("missing session token")]
    MissingToken,
    /// Signature did not verify, or the token expired.
    #[error("invalid or expired session token")]
    InvalidOrExpired,
    /// Valid session, but for a different identity than requested.
    #[error("identity mismatch")]
    Forbidden,
    /// Token could not be signed. Should not happen with a well-formed
    /// secret, which config validation guarantees at startup.
    #[error("failed to sign session token")]
    Signing,
}

/// Identity claim carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issue a signed session token for `email`, expiring `ttl_secs` from now.
///
/// # Errors
///
/// Returns `AuthError::Signing` if encoding fails.
pub fn issue(secret: &SecretString, email: &str, ttl_secs: i64) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        email: email.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|_| AuthError::Signing)
}

/// Verify a session token, returning its claims.
///
/// # Errors
///
/// Returns `AuthError::InvalidOrExpired` for any signature or expiry
/// failure; callers get no further detail.
pub fn verify(secret: &SecretString, token: &str) -> Result<Claims, AuthError> {
    let key = DecodingKey::from_secret(secret.expose_secret().as_bytes());
    let mut validation = Validation::default();
    validation.leeway = 0;
    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidOrExpired)
}

/// Ownership check: the authenticated identity must match the identity the
/// caller is asking about.
///
/// # Errors
///
/// Returns `AuthError::Forbidden` on mismatch. Distinct from the 401 class:
/// the session itself is valid, it just belongs to someone else.
pub fn ensure_owner(claims: &Claims, email: &str) -> Result<(), AuthError> {
    if claims.email == email {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("test-signing-secret-0123456789abcdef")
    }

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let token = issue(&secret(), "a@x.com", 3600).unwrap();
        let claims = verify(&secret(), &token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let token = issue(&secret(), "a@x.com", 3600).unwrap();
        // Flip the last signature character.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert!(matches!(
            verify(&secret(), &tampered),
            Err(AuthError::InvalidOrExpired)
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = issue(&secret(), "a@x.com", 3600).unwrap();
        let other = SecretString::from("another-signing-secret-0123456789ab");
        assert!(matches!(
            verify(&other, &token),
            Err(AuthError::InvalidOrExpired)
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // Encode an already-expired claim directly; verify uses zero leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            email: "a@x.com".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret().expose_secret().as_bytes()),
        )
        .unwrap();
        assert!(matches!(
            verify(&secret(), &token),
            Err(AuthError::InvalidOrExpired)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(matches!(
            verify(&secret(), "not-a-token"),
            Err(AuthError::InvalidOrExpired)
        ));
    }

    #[test]
    fn test_ensure_owner_matches() {
        let claims = Claims {
            email: "a@x.com".to_string(),
            iat: 0,
            exp: 0,
        };
        assert!(ensure_owner(&claims, "a@x.com").is_ok());
        assert!(matches!(
            ensure_owner(&claims, "b@x.com"),
            Err(AuthError::Forbidden)
        ));
    }
}
