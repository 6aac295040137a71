// Database models for Diesel
use calendar_core::api::{EventPayload, StoredEvent};
use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// A stored account. `password_hash` is an Argon2 PHC string.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EventRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub all_day: bool,
    pub location: Option<String>,
    pub color: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventRow> for StoredEvent {
    fn from(row: EventRow) -> Self {
        StoredEvent {
            id: row.id,
            title: row.title,
            description: row.description,
            start: row.start_at,
            end: row.end_at,
            all_day: row.all_day,
            location: row.location,
            color: row.color,
            created_by: row.created_by,
        }
    }
}

/// Insertable struct for new events
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::events)]
pub struct NewEvent<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub all_day: bool,
    pub location: Option<&'a str>,
    pub color: Option<&'a str>,
    pub created_by: Uuid,
}

impl<'a> NewEvent<'a> {
    pub fn from_payload(payload: &'a EventPayload, owner: Uuid) -> Self {
        NewEvent {
            title: &payload.title,
            description: payload.description.as_deref(),
            start_at: payload.start,
            end_at: payload.end,
            all_day: payload.all_day,
            location: payload.location.as_deref(),
            color: payload.color.as_deref(),
            created_by: owner,
        }
    }
}

/// Full replacement of an event's editable columns. `None` clears a column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::events)]
#[diesel(treat_none_as_null = true)]
pub struct EventChanges<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub all_day: bool,
    pub location: Option<&'a str>,
    pub color: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> EventChanges<'a> {
    pub fn from_payload(payload: &'a EventPayload) -> Self {
        EventChanges {
            title: &payload.title,
            description: payload.description.as_deref(),
            start_at: payload.start,
            end_at: payload.end,
            all_day: payload.all_day,
            location: payload.location.as_deref(),
            color: payload.color.as_deref(),
            updated_at: Utc::now(),
        }
    }
}
