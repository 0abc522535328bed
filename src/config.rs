//! Runtime configuration loaded from environment variables.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

/// Errors during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable is set but does not parse as the expected type.
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// PostgreSQL connection parameters, assembled from the `DB_*` variables.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,     // DB_HOST, default "localhost"
    pub port: u16,        // DB_PORT, default 5432
    pub user: String,     // DB_USER, default "postgres"
    pub password: String, // DB_PASSWORD, default empty
    pub name: String,     // DB_NAME, default "postgres"
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: string_var("DB_HOST", "localhost"),
            port: parse_var("DB_PORT", 5432)?,
            user: string_var("DB_USER", "postgres"),
            password: string_var("DB_PASSWORD", ""),
            name: string_var("DB_NAME", "postgres"),
        })
    }

    /// Connection options for the configured database. TLS is off; the
    /// service expects to sit next to its database.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(PgSslMode::Disable)
    }
}

/// Top-level runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    /// HTTP listen port (`PORT`, default 3000). The server binds 0.0.0.0.
    pub port: u16,
}

impl AppConfig {
    /// Read configuration from the process environment. Missing variables
    /// fall back to defaults; present-but-unparseable ones are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database: DatabaseConfig::from_env()?,
            port: parse_var("PORT", 3000)?,
        })
    }
}

fn string_var(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value: raw }),
        Err(_) => Ok(default),
    }
}
