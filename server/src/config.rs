//! Startup configuration read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `127.0.0.1` |
//! | `PORT` | `3000` |
//! | `TODO_LOGGER_LEVEL` | `INFO` |
//! | `REQUEST_LOGGER_LEVEL` | `INFO` |

use thiserror::Error;
use todo_core::{LogLevel, LogRegistry};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}")]
    InvalidPort(String),

    #[error("invalid {var} {value:?}: expected DEBUG, INFO or ERROR")]
    InvalidLevel { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub todo_level: LogLevel,
    pub request_level: LogLevel,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            todo_level: LogLevel::Info,
            request_level: LogLevel::Info,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source; unset keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };
        let level = |var: &'static str, default: LogLevel| match lookup(var) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidLevel { var, value }),
            None => Ok(default),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            todo_level: level("TODO_LOGGER_LEVEL", defaults.todo_level)?,
            request_level: level("REQUEST_LOGGER_LEVEL", defaults.request_level)?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn log_registry(&self) -> LogRegistry {
        LogRegistry::new(self.todo_level, self.request_level)
    }
}
