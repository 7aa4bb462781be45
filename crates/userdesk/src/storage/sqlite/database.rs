//! Per-request connection handling.

use std::path::{Path, PathBuf};

use tokio_rusqlite::Connection;

use userdesk_core::storage::{RepositoryError, Result};

use super::error::map_tokio_rusqlite_error;
use super::repository::SqliteUserRepository;
use super::schema;

/// Location of the SQLite database.
///
/// Cloning is cheap; no connection is held until [`Database::open`] is called.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a fresh connection and binds a repository to it.
    pub async fn open(&self) -> Result<DbSession> {
        let connection = Connection::open(&self.path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        tracing::trace!(path = %self.path.display(), "Opened database connection");

        Ok(DbSession {
            repository: SqliteUserRepository::new(connection.clone()),
            connection,
        })
    }

    /// Creates the schema if it does not exist yet.
    pub async fn migrate(&self) -> Result<()> {
        let session = self.open().await?;
        session.execute_batch(schema::CREATE_TABLES).await?;
        session.close().await
    }
}

/// A repository together with the connection it runs on.
///
/// Dropping the session closes the connection, so it is released on every
/// exit path of a handler. A transaction still open at that point is rolled
/// back by SQLite.
pub struct DbSession {
    pub repository: SqliteUserRepository,
    pub connection: Connection,
}

impl DbSession {
    async fn execute_batch(&self, sql: &'static str) -> Result<()> {
        self.connection
            .call(move |conn| {
                conn.execute_batch(sql)
                    .map_err(tokio_rusqlite::Error::Rusqlite)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Transaction"))
    }

    /// Starts an explicit write transaction.
    pub async fn begin(&self) -> Result<()> {
        self.execute_batch(schema::BEGIN).await
    }

    pub async fn commit(&self) -> Result<()> {
        self.execute_batch(schema::COMMIT).await
    }

    pub async fn rollback(&self) -> Result<()> {
        self.execute_batch(schema::ROLLBACK).await
    }

    /// Closes the connection and reports any error raised while closing.
    pub async fn close(self) -> Result<()> {
        let Self {
            repository,
            connection,
        } = self;
        drop(repository);

        connection
            .close()
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Connection"))
    }
}
