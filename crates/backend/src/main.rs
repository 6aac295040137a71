use axum::http::{header, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod config;
mod db;
pub mod error;
mod handlers;
mod models;
pub mod repository;
mod routes;
mod schema;

use auth::types::AuthConfig;
use config::AppConfig;
use repository::{EventRepository, MemoryRepository, PgRepository, UserRepository};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub events: Arc<dyn EventRepository>,
    pub auth_config: AuthConfig,
}

impl AppState {
    pub fn postgres(pool: db::DbPool, auth_config: AuthConfig) -> Self {
        let repo = Arc::new(PgRepository::new(pool));
        Self {
            users: repo.clone(),
            events: repo,
            auth_config,
        }
    }

    pub fn in_memory(auth_config: AuthConfig) -> Self {
        let repo = Arc::new(MemoryRepository::new());
        Self {
            users: repo.clone(),
            events: repo,
            auth_config,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let state = match &config.database_url {
        Some(url) => {
            let pool = db::establish_connection_pool(url, config.database_tls)?;
            tracing::info!("Using Postgres event store (tls: {})", config.database_tls);
            AppState::postgres(pool, config.auth.clone())
        }
        None => {
            tracing::warn!("DATABASE_URL not set, events are kept in memory only");
            AppState::in_memory(config.auth.clone())
        }
    };

    let app = routes::router(state)
        .layer(build_cors_layer(config.cors_allowed_origins.as_deref()))
        .layer(TraceLayer::new_for_http());

    // Serve static frontend files if the directory exists
    let frontend_dir = &config.frontend_dir;
    let app = if std::path::Path::new(frontend_dir).exists() {
        tracing::info!("Serving frontend from {}", frontend_dir);
        let index_path = format!("{}/index.html", frontend_dir);
        let serve_dir = ServeDir::new(frontend_dir).not_found_service(ServeFile::new(&index_path));
        app.fallback_service(serve_dir)
    } else {
        tracing::info!(
            "Frontend directory not found at {}, serving API only",
            frontend_dir
        );
        app
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build CORS layer from `CORS_ALLOWED_ORIGINS`.
///
/// If set, only those origins are allowed (with credentials so the auth
/// cookie is sent). If not set, defaults to permissive CORS (for development
/// only).
fn build_cors_layer(allowed_origins: Option<&str>) -> CorsLayer {
    match allowed_origins {
        Some(origins) => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                tracing::warn!(
                    "CORS_ALLOWED_ORIGINS is set but empty, using permissive CORS (not recommended for production)"
                );
                CorsLayer::permissive()
            } else {
                tracing::info!("CORS configured for origins: {:?}", origins);
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods([
                        Method::GET,
                        Method::POST,
                        Method::PUT,
                        Method::DELETE,
                        Method::OPTIONS,
                    ])
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                    .allow_credentials(true)
            }
        }
        None => {
            tracing::warn!(
                "CORS_ALLOWED_ORIGINS not set, using permissive CORS (not recommended for production)"
            );
            CorsLayer::permissive()
        }
    }
}
