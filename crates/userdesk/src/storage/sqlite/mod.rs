//! SQLite storage backend implementation.
//!
//! Uses `rusqlite` for the synchronous driver and `tokio-rusqlite` to run each
//! call on the connection's own thread.

mod conversions;
mod database;
mod error;
mod repository;
mod schema;

pub use database::{Database, DbSession};
pub(crate) use repository::SqliteUserRepository;
