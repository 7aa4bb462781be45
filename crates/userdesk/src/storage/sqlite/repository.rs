//! SQLite repository implementation.
//!
//! Implements `userdesk_core::storage::UserRepository` over a connection owned
//! by the caller's [`DbSession`](super::DbSession).

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use userdesk_core::storage::{RepositoryError, Result, UserRepository};
use userdesk_core::user::{User, UserDraft, UserId};

use super::conversions::row_to_user;
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based user repository bound to one open connection.
#[derive(Clone)]
pub struct SqliteUserRepository {
    conn: Connection,
}

impl SqliteUserRepository {
    /// Bind a repository to an already open connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    async fn select_users(&self, sql: &'static str, term: Option<String>) -> Result<Vec<User>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
                let rows = match &term {
                    Some(term) => stmt.query_map([term], row_to_user),
                    None => stmt.query_map([], row_to_user),
                }
                .map_err(wrap_err)?;

                let mut users = Vec::new();
                for row_result in rows {
                    users.push(row_result.map_err(wrap_err)?);
                }
                Ok(users)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User"))
    }

    async fn insert(&self, draft: &UserDraft) -> Result<UserId> {
        let name = draft.name.clone();
        let email = draft.email.clone();

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_USER, rusqlite::params![name, email])
                    .map_err(wrap_err)?;
                Ok(UserId(conn.last_insert_rowid()))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User"))
    }

    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<UserId> {
        let name = draft.name.clone();
        let email = draft.email.clone();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::UPDATE_USER, rusqlite::params![id.get(), name, email])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(id)
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", id.to_string()))
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn get_content(&self) -> Result<Vec<User>> {
        self.select_users(schema::SELECT_USERS, None).await
    }

    async fn get_by_term(&self, term: &str) -> Result<Vec<User>> {
        if term.is_empty() {
            return Err(RepositoryError::InvalidData(
                "search term must not be empty".to_string(),
            ));
        }

        self.select_users(schema::SELECT_USERS_BY_TERM, Some(term.to_string()))
            .await
    }

    async fn find(&self, id: UserId) -> Result<Option<User>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_USER_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id.get()], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", id.to_string()))
    }

    async fn save(&self, draft: &UserDraft) -> Result<UserId> {
        match draft.id {
            Some(id) => self.update(id, draft).await,
            None => self.insert(draft).await,
        }
    }

    async fn destroy(&self, id: UserId) -> Result<()> {
        self.conn
            .call(move |conn| {
                conn.execute(schema::DELETE_USER, [id.get()])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", id.to_string()))
    }
}
