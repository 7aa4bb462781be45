//! Application state shared by all request handlers.
//!
//! The state holds no connection and no mutable data: each handler opens its
//! own database session through [`Database::open`].

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::{config::Config, storage::Database};

/// Shared application state, cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Where the users table lives.
    pub database: Database,
    /// Signing key for the flash cookie, derived from the configured secret.
    pub cookie_key: Key,
}

impl AppState {
    /// Build the state from a validated configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            database: Database::new(config.database_path.clone()),
            cookie_key: Key::derive_from(config.secret_key.as_bytes()),
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

// ============================================================================
// Test support
// ============================================================================
