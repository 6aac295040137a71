//! Authentication HTTP handlers.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use calendar_core::api::{AccountResponse, CredentialsRequest, MessageResponse, SigninResponse};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

use super::{
    build_auth_cookie, clear_auth_cookie, jwt,
    password::{hash_password_blocking, verify_password_blocking, UNKNOWN_USER_HASH},
    types::AuthUser,
};

/// Create an account with a salted password hash.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let password_hash = hash_password_blocking(payload.password).await?;

    match state.users.create(&payload.username, &password_hash).await? {
        Some(user) => {
            tracing::info!("Created account {} ({})", user.username, user.id);
            Ok(Json(MessageResponse::new("user signed up successfully")))
        }
        None => {
            tracing::warn!("Signup for existing username {}", payload.username);
            Err(ApiError::Conflict("username already taken".to_string()))
        }
    }
}

/// Check credentials and issue a token.
///
/// The token is returned in the body for API clients and also set as an
/// `HttpOnly` cookie for the browser.
pub async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> ApiResult<Response> {
    let invalid = || ApiError::unauthorized("Invalid username or password");

    let user = match state.users.find_by_username(&payload.username).await? {
        Some(user) => user,
        None => {
            tracing::info!("Signin for unknown username {}", payload.username);
            verify_password_blocking(payload.password, UNKNOWN_USER_HASH.to_string()).await;
            return Err(invalid());
        }
    };

    if !verify_password_blocking(payload.password, user.password_hash.clone()).await {
        tracing::info!("Signin with wrong password for {}", user.username);
        return Err(invalid());
    }

    let auth_user = AuthUser {
        id: user.id,
        username: user.username,
    };
    let token = jwt::issue_token(&state.auth_config, &auth_user)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Failed to create token: {}", e)))?;
    let cookie = build_auth_cookie(&state.auth_config, &token);

    tracing::info!("Successful signin for {}", auth_user.username);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(SigninResponse {
            message: "user signed in successfully".to_string(),
            token,
        }),
    )
        .into_response())
}

/// Clear the auth cookie. Bearer tokens stay valid until they expire.
pub async fn signout(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::SET_COOKIE, clear_auth_cookie(&state.auth_config))],
        Json(MessageResponse::new("user signed out")),
    )
}

/// Get current authenticated user info.
pub async fn me(Extension(user): Extension<AuthUser>) -> Json<AccountResponse> {
    Json(AccountResponse {
        id: user.id,
        username: user.username,
    })
}
