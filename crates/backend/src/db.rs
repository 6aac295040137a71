use calendar_core::api::{EventPayload, StoredEvent};
use diesel::prelude::*;
use diesel_async::{
    pooled_connection::{
        deadpool::{Object, Pool},
        AsyncDieselConnectionManager, ManagerConfig,
    },
    AsyncPgConnection, RunQueryDsl,
};
use uuid::Uuid;

use crate::models::{EventChanges, EventRow, NewEvent, NewUser, User};

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection = Object<AsyncPgConnection>;

async fn establish_tls_connection(config: String) -> diesel::ConnectionResult<AsyncPgConnection> {
    // Set up rustls TLS configuration
    let root_store =
        rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();
    let tls = tokio_postgres_rustls::MakeRustlsConnect::new(tls_config);

    // Parse the connection string and connect with TLS
    let (client, connection) = tokio_postgres::connect(&config, tls)
        .await
        .map_err(|e| diesel::ConnectionError::BadConnection(e.to_string()))?;

    // Spawn the connection task
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("Connection error: {}", e);
        }
    });

    AsyncPgConnection::try_from(client).await
}

/// Build the connection pool. Connections are opened lazily.
pub fn establish_connection_pool(database_url: &str, use_tls: bool) -> anyhow::Result<DbPool> {
    let config = if use_tls {
        let mut manager_config = ManagerConfig::default();
        manager_config.custom_setup =
            Box::new(|url| Box::pin(establish_tls_connection(url.to_string())));
        AsyncDieselConnectionManager::<AsyncPgConnection>::new_with_config(
            database_url,
            manager_config,
        )
    } else {
        AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url)
    };

    let pool = Pool::builder(config).max_size(10).build()?;

    Ok(pool)
}

pub async fn get_conn(pool: &DbPool) -> anyhow::Result<DbConnection> {
    pool.get()
        .await
        .map_err(|e| anyhow::anyhow!("Database connection unavailable: {}", e))
}

// User database operations
pub mod users {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    /// Insert a user; `None` when the username is already taken.
    pub async fn create(
        conn: &mut AsyncPgConnection,
        username_val: &str,
        password_hash_val: &str,
    ) -> anyhow::Result<Option<User>> {
        use crate::schema::users::dsl::*;

        let result = diesel::insert_into(users)
            .values(&NewUser {
                username: username_val,
                password_hash: password_hash_val,
            })
            .returning(User::as_returning())
            .get_result::<User>(conn)
            .await;

        match result {
            Ok(user) => Ok(Some(user)),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_username(
        conn: &mut AsyncPgConnection,
        username_val: &str,
    ) -> anyhow::Result<Option<User>> {
        use crate::schema::users::dsl::*;

        let user = users
            .filter(username.eq(username_val))
            .select(User::as_select())
            .first::<User>(conn)
            .await
            .optional()?;

        Ok(user)
    }
}

// Event database operations
pub mod events {
    use super::*;

    pub async fn list_for_owner(
        conn: &mut AsyncPgConnection,
        owner: Uuid,
    ) -> anyhow::Result<Vec<StoredEvent>> {
        use crate::schema::events::dsl::*;

        let rows = events
            .filter(created_by.eq(owner))
            .order_by((start_at.asc(), created_at.asc()))
            .select(EventRow::as_select())
            .load::<EventRow>(conn)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn create(
        conn: &mut AsyncPgConnection,
        owner: Uuid,
        payload: &EventPayload,
    ) -> anyhow::Result<StoredEvent> {
        use crate::schema::events::dsl::*;

        let row = diesel::insert_into(events)
            .values(&NewEvent::from_payload(payload, owner))
            .returning(EventRow::as_returning())
            .get_result::<EventRow>(conn)
            .await?;

        Ok(row.into())
    }

    /// Overwrite an event; `None` when no event has that id.
    pub async fn update(
        conn: &mut AsyncPgConnection,
        event_id: Uuid,
        payload: &EventPayload,
    ) -> anyhow::Result<Option<StoredEvent>> {
        use crate::schema::events::dsl::*;

        let row = diesel::update(events.filter(id.eq(event_id)))
            .set(&EventChanges::from_payload(payload))
            .returning(EventRow::as_returning())
            .get_result::<EventRow>(conn)
            .await
            .optional()?;

        Ok(row.map(Into::into))
    }

    /// Returns whether a row was removed.
    pub async fn delete(conn: &mut AsyncPgConnection, event_id: Uuid) -> anyhow::Result<bool> {
        use crate::schema::events::dsl::*;

        let deleted = diesel::delete(events.filter(id.eq(event_id)))
            .execute(conn)
            .await?;

        Ok(deleted > 0)
    }
}
