use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::auth;
use crate::handlers;
use crate::AppState;

/// API routes. CORS, tracing and static files are layered on in `main`.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route(
            "/event",
            get(handlers::list_events).post(handlers::add_event),
        )
        .route(
            "/event/:event_id",
            put(handlers::update_event).delete(handlers::delete_event),
        )
        .route("/me", get(auth::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    let api = Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/signout", post(auth::signout))
        .merge(protected);

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api)
        .with_state(state)
}
