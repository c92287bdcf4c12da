/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration from
 * environment variables, with defaults suitable for local development.
 *
 * # Variables
 *
 * | Variable                  | Default                               |
 * |---------------------------|---------------------------------------|
 * | `MONGODB_URI`             | `mongodb://localhost:27017/nyaymitra` |
 * | `MONGODB_CONNECT_RETRIES` | `5`                                   |
 * | `MONGODB_RETRY_DELAY_MS`  | `5000`                                |
 * | `FORCE_EXIT_ON_DB_CLOSE`  | unset (`true` enables)                |
 * | `APP_ENV`                 | `development`                         |
 * | `SERVER_PORT`             | `3000`                                |
 *
 * # Error Handling
 *
 * Unset or empty variables fall back to their defaults. A value that is set
 * but cannot be parsed is a `ConfigError`.
 */

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::database::{DatabaseSettings, DEFAULT_DATABASE_URI, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ENVIRONMENT: &str = "development";
const PRODUCTION: &str = "production";

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric variable holds something that is not a number
    #[error("Invalid value for {key}: '{value}' is not a valid number")]
    InvalidNumber {
        /// Environment variable name
        key: &'static str,
        /// The rejected value
        value: String,
    },
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP listen port
    pub port: u16,
    /// Deployment environment name (`development`, `production`, ...)
    pub environment: String,
    /// Exit the process once the database connection is closed on shutdown
    ///
    /// Ignored in production.
    pub force_exit_on_close: bool,
    /// Database bootstrap settings
    pub database: DatabaseSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            force_exit_on_close: false,
            database: DatabaseSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    ///
    /// Call `dotenv::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Example
    ///
    /// ```rust
    /// use nyaymitra::backend::server::ServerConfig;
    ///
    /// let config = ServerConfig::from_lookup(|key| match key {
    ///     "MONGODB_CONNECT_RETRIES" => Some("2".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.database.max_retries, 2);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let uri = value("MONGODB_URI").unwrap_or_else(|| DEFAULT_DATABASE_URI.to_string());
        let max_retries = parse_number(value("MONGODB_CONNECT_RETRIES"), "MONGODB_CONNECT_RETRIES")?
            .unwrap_or(DEFAULT_MAX_RETRIES);
        let retry_delay = parse_number::<u64>(value("MONGODB_RETRY_DELAY_MS"), "MONGODB_RETRY_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RETRY_DELAY);
        let port = parse_number(value("SERVER_PORT"), "SERVER_PORT")?.unwrap_or(DEFAULT_PORT);

        let environment = value("APP_ENV").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        let force_exit_on_close = value("FORCE_EXIT_ON_DB_CLOSE").as_deref() == Some("true");

        Ok(Self {
            port,
            environment,
            force_exit_on_close,
            database: DatabaseSettings {
                uri,
                max_retries,
                retry_delay,
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == PRODUCTION
    }

    /// Whether the supervisor should exit right after closing the database
    pub fn should_exit_after_close(&self) -> bool {
        self.force_exit_on_close && !self.is_production()
    }
}

fn parse_number<T: FromStr>(value: Option<String>, key: &'static str) -> Result<Option<T>, ConfigError> {
    value
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| ConfigError::InvalidNumber { key, value: v.clone() })
        })
        .transpose()
}
