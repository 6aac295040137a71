//! Auth-related types and configuration.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// The signed-in account behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

/// Auth configuration loaded from environment
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_duration_days: i64,
    pub cookie_name: String,
    /// Add `Secure` to the auth cookie.
    pub secure_cookies: bool,
}

impl AuthConfig {
    /// Load auth configuration from environment variables.
    ///
    /// Required env vars:
    /// - `JWT_SECRET`: Secret key for signing JWTs
    ///
    /// Optional:
    /// - `TOKEN_DURATION_DAYS`: token lifetime, default 7
    /// - `RUST_ENV`: `production` marks cookies `Secure`
    pub fn from_env() -> Result<Self> {
        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET cannot be empty");
        }

        let token_duration_days = match std::env::var("TOKEN_DURATION_DAYS") {
            Ok(days) => days
                .parse()
                .context("TOKEN_DURATION_DAYS must be a whole number of days")?,
            Err(_) => 7,
        };

        Ok(Self {
            jwt_secret,
            token_duration_days,
            cookie_name: "auth_token".to_string(),
            secure_cookies: std::env::var("RUST_ENV").unwrap_or_default() == "production",
        })
    }
}
