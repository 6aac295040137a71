use anyhow::{Context, Result};
use std::env;

use crate::auth::types::AuthConfig;

#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Postgres connection string. Without one the server keeps everything
    /// in memory.
    pub database_url: Option<String>,
    pub database_tls: bool,
    pub frontend_dir: String,
    pub cors_allowed_origins: Option<String>,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from the environment (after `.env` is applied).
    ///
    /// - `PORT` (default 3000)
    /// - `DATABASE_URL` (optional)
    /// - `DATABASE_TLS` (`true` to connect with rustls)
    /// - `FRONTEND_DIR` (default `crates/frontend/dist`)
    /// - `CORS_ALLOWED_ORIGINS` (comma separated, optional)
    /// - plus everything [`AuthConfig::from_env`] reads
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            database_tls: env::var("DATABASE_TLS")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
            frontend_dir: env::var("FRONTEND_DIR")
                .unwrap_or_else(|_| "crates/frontend/dist".to_string()),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS").ok(),
            auth: AuthConfig::from_env()?,
        })
    }
}
