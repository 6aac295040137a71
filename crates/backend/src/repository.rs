//! Repository traits for accounts and events.
//!
//! Handlers only see these traits. [`PgRepository`] stores into Postgres via
//! the [`crate::db`] operations; [`MemoryRepository`] keeps everything in
//! process and is used when no `DATABASE_URL` is configured.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use calendar_core::api::{EventPayload, StoredEvent};
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::{self, DbPool};
use crate::models::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new account. Returns `None` if the username is taken.
    async fn create(&self, username: &str, password_hash: &str) -> Result<Option<User>>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Events created by `owner`, ordered by start.
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<StoredEvent>>;

    async fn create(&self, owner: Uuid, payload: EventPayload) -> Result<StoredEvent>;

    /// Replace an event's fields. Returns `None` if the id is unknown.
    async fn update(&self, id: Uuid, payload: EventPayload) -> Result<Option<StoredEvent>>;

    /// Returns `false` if the id is unknown.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Postgres-backed repository
#[derive(Clone)]
pub struct PgRepository {
    pool: DbPool,
}

impl PgRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgRepository {
    async fn create(&self, username: &str, password_hash: &str) -> Result<Option<User>> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::users::create(&mut conn, username, password_hash).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::users::find_by_username(&mut conn, username).await
    }
}

#[async_trait]
impl EventRepository for PgRepository {
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<StoredEvent>> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::events::list_for_owner(&mut conn, owner).await
    }

    async fn create(&self, owner: Uuid, payload: EventPayload) -> Result<StoredEvent> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::events::create(&mut conn, owner, &payload).await
    }

    async fn update(&self, id: Uuid, payload: EventPayload) -> Result<Option<StoredEvent>> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::events::update(&mut conn, id, &payload).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut conn = db::get_conn(&self.pool).await?;
        db::events::delete(&mut conn, id).await
    }
}

/// In-process repository. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryRepository {
    users: RwLock<HashMap<String, User>>,
    events: RwLock<Vec<(StoredEvent, chrono::DateTime<Utc>)>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryRepository {
    async fn create(&self, username: &str, password_hash: &str) -> Result<Option<User>> {
        let mut users = self.users.write().await;
        if users.contains_key(username) {
            return Ok(None);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.insert(username.to_string(), user.clone());
        Ok(Some(user))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.get(username).cloned())
    }
}

#[async_trait]
impl EventRepository for MemoryRepository {
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<StoredEvent>> {
        let events = self.events.read().await;
        let mut owned: Vec<_> = events
            .iter()
            .filter(|(event, _)| event.created_by == owner)
            .collect();
        owned.sort_by_key(|(event, created_at)| (event.start, *created_at));
        Ok(owned.into_iter().map(|(event, _)| event.clone()).collect())
    }

    async fn create(&self, owner: Uuid, payload: EventPayload) -> Result<StoredEvent> {
        let event = StoredEvent {
            id: Uuid::new_v4(),
            title: payload.title,
            description: payload.description,
            start: payload.start,
            end: payload.end,
            all_day: payload.all_day,
            location: payload.location,
            color: payload.color,
            created_by: owner,
        };
        self.events.write().await.push((event.clone(), Utc::now()));
        Ok(event)
    }

    async fn update(&self, id: Uuid, payload: EventPayload) -> Result<Option<StoredEvent>> {
        let mut events = self.events.write().await;
        let Some((event, _)) = events.iter_mut().find(|(event, _)| event.id == id) else {
            return Ok(None);
        };

        event.title = payload.title;
        event.description = payload.description;
        event.start = payload.start;
        event.end = payload.end;
        event.all_day = payload.all_day;
        event.location = payload.location;
        event.color = payload.color;
        Ok(Some(event.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut events = self.events.write().await;
        let before = events.len();
        events.retain(|(event, _)| event.id != id);
        Ok(events.len() < before)
    }
}
