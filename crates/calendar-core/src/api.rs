//! Request and response bodies exchanged with the backend.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::{combine, format_wall_time};
use crate::event::{CalendarEvent, EventDraft, DEFAULT_COLOR};

/// Body of `POST /api/v1/event` and `PUT /api/v1/event/:eventId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(rename = "allDay", default)]
    pub all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("invalid start time {0:?}")]
    StartTime(String),
    #[error("invalid end time {0:?}")]
    EndTime(String),
}

impl EventPayload {
    /// Build the wire body from a client-side draft.
    pub fn from_draft(draft: &EventDraft) -> Result<Self, PayloadError> {
        let start = combine(draft.date, &draft.start_time)
            .ok_or_else(|| PayloadError::StartTime(draft.start_time.clone()))?;
        let end = combine(draft.date, &draft.end_time)
            .ok_or_else(|| PayloadError::EndTime(draft.end_time.clone()))?;

        Ok(EventPayload {
            title: draft.title.clone(),
            description: draft.description.clone(),
            start,
            end,
            all_day: false,
            location: draft.location.clone(),
            color: Some(draft.color.clone()),
        })
    }
}

/// An event as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(rename = "allDay")]
    pub all_day: bool,
    pub location: Option<String>,
    pub color: Option<String>,
    #[serde(rename = "createdBy")]
    pub created_by: Uuid,
}

impl From<StoredEvent> for CalendarEvent {
    fn from(stored: StoredEvent) -> Self {
        CalendarEvent {
            id: stored.id.to_string(),
            title: stored.title,
            description: stored.description,
            date: stored.start.date(),
            start_time: format_wall_time(stored.start.time()),
            end_time: format_wall_time(stored.end.time()),
            location: stored.location,
            color: stored.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        }
    }
}

/// Body of `POST /api/v1/signup` and `POST /api/v1/signin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

/// Returned by event creation so the client can re-key its local copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigninResponse {
    pub message: String,
    pub token: String,
}

/// The signed-in account, as returned by `GET /api/v1/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
}

/// API error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
            details: None,
        }
    }
}
