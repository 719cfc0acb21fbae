//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FOODBUZZ_DATABASE_URL` - `MongoDB` connection string (falls back to `DATABASE_URL`)
//! - `FOODBUZZ_JWT_SECRET` - Token signing secret (min 32 chars)
//!
//! ## Optional
//! - `FOODBUZZ_HOST` - Bind address (default: 127.0.0.1)
//! - `FOODBUZZ_PORT` - Listen port (default: 5000)
//! - `FOODBUZZ_DATABASE_NAME` - Database name (default: foodbuzz)
//! - `FOODBUZZ_ENV` - `development` or `production` (default: development)
//! - `FOODBUZZ_ALLOWED_ORIGINS` - Comma-separated CORS origin list
//! - `FOODBUZZ_TOKEN_TTL_SECS` - Default session token lifetime (default: 3600)
//! - `FOODBUZZ_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 15)

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Default CORS origin for local frontend development.
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Deployment environment, controlling session cookie attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::InvalidEnvVar(
                "FOODBUZZ_ENV".to_string(),
                format!("expected development or production, got {other}"),
            )),
        }
    }

    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `MongoDB` connection URL (contains credentials)
    pub database_url: SecretString,
    /// Database name holding the foods/users/orders collections
    pub database_name: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Session token signing secret
    pub jwt_secret: SecretString,
    /// Deployment environment
    pub environment: Environment,
    /// Origins allowed to call the API with credentials
    pub allowed_origins: Vec<String>,
    /// Default session token lifetime in seconds
    pub token_ttl_secs: i64,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the signing secret is too short.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("FOODBUZZ_DATABASE_URL")?;
        let database_name = get_env_or_default("FOODBUZZ_DATABASE_NAME", "foodbuzz");
        let host = get_env_or_default("FOODBUZZ_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("FOODBUZZ_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("FOODBUZZ_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("FOODBUZZ_PORT".to_string(), e.to_string()))?;

        let jwt_secret = SecretString::from(get_required_env("FOODBUZZ_JWT_SECRET")?);
        validate_jwt_secret(&jwt_secret, "FOODBUZZ_JWT_SECRET")?;

        let environment = Environment::parse(&get_env_or_default("FOODBUZZ_ENV", "development"))?;
        let allowed_origins = parse_origins(&get_env_or_default(
            "FOODBUZZ_ALLOWED_ORIGINS",
            DEFAULT_ALLOWED_ORIGIN,
        ));
        let token_ttl_secs = get_env_or_default("FOODBUZZ_TOKEN_TTL_SECS", "3600")
            .parse::<i64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("FOODBUZZ_TOKEN_TTL_SECS".to_string(), e.to_string())
            })?;
        let request_timeout_secs = get_env_or_default("FOODBUZZ_REQUEST_TIMEOUT_SECS", "15")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "FOODBUZZ_REQUEST_TIMEOUT_SECS".to_string(),
                    e.to_string(),
                )
            })?;

        Ok(Self {
            database_url,
            database_name,
            host,
            port,
            jwt_secret,
            environment,
            allowed_origins,
            token_ttl_secs,
            request_timeout_secs,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Split a comma-separated origin list, dropping empty entries.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Validate that the signing secret meets minimum length requirements.
fn validate_jwt_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_JWT_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!(
            Environment::parse("production").unwrap(),
            Environment::Production
        );
        assert_eq!(
            Environment::parse("development").unwrap(),
            Environment::Development
        );
        assert!(Environment::parse("staging").is_err());
    }

    #[test]
    fn test_parse_origins_splits_and_trims() {
        let origins = parse_origins("http://a.example, http://b.example ,");
        assert_eq!(origins, vec!["http://a.example", "http://b.example"]);
    }

    #[test]
    fn test_parse_origins_empty() {
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_validate_jwt_secret_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_jwt_secret(&secret, "TEST_SECRET").is_err());
    }

    #[test]
    fn test_validate_jwt_secret_valid_length() {
        let secret = SecretString::from("x".repeat(32));
        assert!(validate_jwt_secret(&secret, "TEST_SECRET").is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            database_url: SecretString::from("mongodb://localhost:27017"),
            database_name: "foodbuzz".to_string(),
            host: "127.0.0.1".parse().unwrap(),
            port: 5000,
            jwt_secret: SecretString::from("x".repeat(32)),
            environment: Environment::Development,
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
            token_ttl_secs: 3600,
            request_timeout_secs: 15,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 5000);
    }
}
