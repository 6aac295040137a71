use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    Extension,
};
use calendar_core::api::{CreatedResponse, EventPayload, MessageResponse, StoredEvent};
use uuid::Uuid;

use crate::auth::types::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

// Event handlers
pub async fn list_events(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<StoredEvent>>> {
    let events = state.events.list_for_owner(user.id).await?;
    Ok(Json(events))
}

pub async fn add_event(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<EventPayload>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let event = state.events.create(user.id, payload).await?;
    tracing::debug!("{} added event {} ({})", user.username, event.id, event.title);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Event added successfully".to_string(),
            id: event.id,
        }),
    ))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<EventPayload>,
) -> ApiResult<Json<MessageResponse>> {
    match state.events.update(event_id, payload).await? {
        Some(event) => {
            tracing::debug!("Updated event {}", event.id);
            Ok(Json(MessageResponse::new("Event updated successfully")))
        }
        None => Err(ApiError::not_found(format!("Event {}", event_id))),
    }
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.events.delete(event_id).await? {
        return Err(ApiError::not_found(format!("Event {}", event_id)));
    }

    tracing::debug!("Deleted event {}", event_id);
    Ok(Json(MessageResponse::new("Event deleted successfully")))
}
