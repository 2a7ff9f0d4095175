//! Runtime configuration read from the environment.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use axum_extra::extract::cookie::Key;
use tracing::warn;

use crate::error::AppError;
use crate::session::SessionSettings;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Maximum pool connections.
    pub max_connections: u32,
    /// Deadline for every store and catalog operation.
    pub store_timeout: Duration,
    /// Catalog refresh period; `None` disables periodic refresh.
    pub catalog_refresh: Option<Duration>,
    /// JSON file used to seed the products table at startup.
    pub products_file: Option<PathBuf>,
    /// Cookie session settings.
    pub sessions: SessionSettings,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns a variable's value
    /// or `None` when it is unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// value does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| AppError::Config("DATABASE_URL environment variable must be set".into()))?;

        let refresh_secs: u64 = parse_or(&lookup, "CATALOG_REFRESH_SECS", 300)?;
        let session_key = match lookup("SESSION_SECRET") {
            Some(secret) => Key::try_from(secret.as_bytes()).map_err(|e| {
                AppError::Config(format!("SESSION_SECRET must be at least 64 bytes: {e}"))
            })?,
            None => {
                warn!(
                    "SESSION_SECRET not set; session cookies are only valid until this process exits"
                );
                Key::generate()
            }
        };

        Ok(Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            store_timeout: Duration::from_millis(parse_or(&lookup, "STORE_TIMEOUT_MS", 2000)?),
            catalog_refresh: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
            products_file: lookup("PRODUCTS_FILE").map(PathBuf::from),
            sessions: SessionSettings::new(
                session_key,
                parse_or(&lookup, "SESSION_COOKIE_SECURE", false)?,
            ),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid: {e}"))),
        None => Ok(default),
    }
}
