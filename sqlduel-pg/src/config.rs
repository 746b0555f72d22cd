//! Database Connection Configuration
//!
//! Explicit connection parameters for the measured database, injected into
//! the reward engine at construction. Configuration is loaded from
//! environment variables with sensible defaults for a local development
//! instance; it can also be deserialized from a config file.

use std::str::FromStr;

use postgres::{Client, NoTls};
use serde::{Deserialize, Serialize};

use crate::error::RewardResult;

/// Transport security mode for the database connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SslMode {
    /// Never use TLS.
    Disable,
    /// Use TLS if the server supports it.
    Prefer,
    /// Require TLS.
    Require,
}

impl FromStr for SslMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disable" => Ok(SslMode::Disable),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            other => Err(format!("unknown sslmode: {other}")),
        }
    }
}

impl From<SslMode> for postgres::config::SslMode {
    fn from(mode: SslMode) -> Self {
        match mode {
            SslMode::Disable => postgres::config::SslMode::Disable,
            SslMode::Prefer => postgres::config::SslMode::Prefer,
            SslMode::Require => postgres::config::SslMode::Require,
        }
    }
}

/// Connection parameters for the database under tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Transport security mode
    pub sslmode: SslMode,
    /// Application name reported to the server
    pub application_name: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5432,
            dbname: "sqlduel".to_string(),
            user: "sqlduel".to_string(),
            password: String::new(),
            sslmode: SslMode::Disable,
            application_name: "sqlduel".to_string(),
        }
    }
}

impl DbConfig {
    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLDUEL_DB_HOST`: PostgreSQL host (default: 127.0.0.1)
    /// - `SQLDUEL_DB_PORT`: PostgreSQL port (default: 5432)
    /// - `SQLDUEL_DB_NAME`: Database name (default: sqlduel)
    /// - `SQLDUEL_DB_USER`: Database user (default: sqlduel)
    /// - `SQLDUEL_DB_PASSWORD`: Database password (default: empty)
    /// - `SQLDUEL_DB_SSLMODE`: disable | prefer | require (default: disable)
    /// - `SQLDUEL_DB_APPLICATION_NAME`: Reported application name
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SQLDUEL_DB_HOST").unwrap_or(defaults.host),
            port: std::env::var("SQLDUEL_DB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            dbname: std::env::var("SQLDUEL_DB_NAME").unwrap_or(defaults.dbname),
            user: std::env::var("SQLDUEL_DB_USER").unwrap_or(defaults.user),
            password: std::env::var("SQLDUEL_DB_PASSWORD").unwrap_or(defaults.password),
            sslmode: std::env::var("SQLDUEL_DB_SSLMODE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.sslmode),
            application_name: std::env::var("SQLDUEL_DB_APPLICATION_NAME")
                .unwrap_or(defaults.application_name),
        }
    }

    /// Render the client configuration for this connection.
    pub fn pg_config(&self) -> postgres::Config {
        let mut config = postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .dbname(&self.dbname)
            .user(&self.user)
            .ssl_mode(self.sslmode.into())
            .application_name(&self.application_name);
        if !self.password.is_empty() {
            config.password(&self.password);
        }
        config
    }

    /// Open a blocking connection to the configured database.
    pub fn connect(&self) -> RewardResult<Client> {
        Ok(self.pg_config().connect(NoTls)?)
    }
}

// =============================================================================
// TESTS
// =============================================================================
