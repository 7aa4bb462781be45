//! Storage backend implementation.
//!
//! Implements the repository trait defined in `userdesk_core::storage` on top
//! of SQLite. Every request opens its own connection through [`Database::open`]
//! and releases it when the returned [`DbSession`] is dropped.

pub mod sqlite;

pub use sqlite::{Database, DbSession};
