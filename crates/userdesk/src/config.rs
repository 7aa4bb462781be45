use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

/// Minimum length of the secret used to sign flash cookies.
pub const MIN_SECRET_KEY_LEN: usize = 32;

/// userdesk - Manage user records from the browser
#[derive(Parser, Debug, Clone)]
#[command(name = "userdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    pub port: u16,

    /// SQLite database location (`path`, `sqlite://path` or `sqlite:path`)
    #[arg(long, default_value = "userdesk.db", env = "DATABASE_URL")]
    pub database_url: String,

    /// Secret used to sign session cookies
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,
}

/// Errors raised while validating the startup configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SECRET_KEY must be at least 32 bytes long (got {0})")]
    SecretKeyTooShort(usize),
    #[error("DATABASE_URL must not be empty")]
    EmptyDatabaseUrl,
    #[error("Unsupported DATABASE_URL scheme: {0} (only sqlite is supported)")]
    UnsupportedDatabaseUrl(String),
}

/// Application configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Filesystem path of the SQLite database.
    pub database_path: PathBuf,
    pub secret_key: String,
}

impl Config {
    /// Validate the parsed command line into a configuration.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let secret_len = cli.secret_key.len();
        if secret_len < MIN_SECRET_KEY_LEN {
            return Err(ConfigError::SecretKeyTooShort(secret_len));
        }

        Ok(Self {
            database_path: parse_database_url(&cli.database_url)?,
            host: cli.host,
            port: cli.port,
            secret_key: cli.secret_key,
        })
    }

    /// Address the server binds to when no listener is handed over.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Resolve a database connection string to a SQLite file path.
pub fn parse_database_url(url: &str) -> Result<PathBuf, ConfigError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ConfigError::EmptyDatabaseUrl);
    }

    let path = if let Some(rest) = url.strip_prefix("sqlite://") {
        rest
    } else if let Some(rest) = url.strip_prefix("sqlite:") {
        rest
    } else if let Some((scheme, _)) = url.split_once("://") {
        return Err(ConfigError::UnsupportedDatabaseUrl(scheme.to_string()));
    } else {
        url
    };

    if path.is_empty() {
        return Err(ConfigError::EmptyDatabaseUrl);
    }

    Ok(PathBuf::from(path))
}
