//! Runtime-adjustable severity thresholds for the service's log channels.
//!
//! # Design
//! The channel set is closed: `todo-logger` for domain events and
//! `request-logger` for request telemetry. Each channel's threshold is a
//! single `AtomicU8`, so a level change is visible to the very next record
//! without any lock on the logging path. The registry knows nothing about a
//! logging framework; the server's subscriber asks `is_enabled` before a
//! record is formatted.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::LogControlError;

/// A named log stream with its own threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Todo,
    Request,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Todo, Channel::Request];

    /// Logger name, also used as the tracing target for the channel.
    pub const fn name(self) -> &'static str {
        match self {
            Channel::Todo => "todo-logger",
            Channel::Request => "request-logger",
        }
    }

    pub fn from_name(name: &str) -> Option<Channel> {
        Channel::ALL.into_iter().find(|c| c.name() == name)
    }

    const fn index(self) -> usize {
        match self {
            Channel::Todo => 0,
            Channel::Request => 1,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Minimum severity a channel lets through. Ordered `Debug < Info < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Error = 2,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
        }
    }

    fn from_u8(raw: u8) -> LogLevel {
        match raw {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            _ => LogLevel::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(LogControlError::InvalidLevel),
        }
    }
}

/// Process-wide thresholds, one per `Channel`.
#[derive(Debug)]
pub struct LogRegistry {
    levels: [AtomicU8; 2],
}

impl Default for LogRegistry {
    fn default() -> Self {
        Self::new(LogLevel::Info, LogLevel::Info)
    }
}

impl LogRegistry {
    pub fn new(todo: LogLevel, request: LogLevel) -> Self {
        let registry = Self {
            levels: [AtomicU8::new(0), AtomicU8::new(0)],
        };
        registry.set(Channel::Todo, todo);
        registry.set(Channel::Request, request);
        registry
    }

    pub fn level(&self, channel: Channel) -> LogLevel {
        LogLevel::from_u8(self.levels[channel.index()].load(Ordering::Acquire))
    }

    pub fn set(&self, channel: Channel, level: LogLevel) {
        self.levels[channel.index()].store(level as u8, Ordering::Release);
    }

    /// Current threshold of the logger called `name`.
    pub fn get_level(&self, name: &str) -> Result<LogLevel, LogControlError> {
        let channel = Channel::from_name(name).ok_or(LogControlError::UnknownLogger)?;
        Ok(self.level(channel))
    }

    /// Change the threshold of logger `name` and return the level now in force.
    ///
    /// The name is validated before the level.
    pub fn set_level(&self, name: &str, level: &str) -> Result<LogLevel, LogControlError> {
        let channel = Channel::from_name(name).ok_or(LogControlError::UnknownLogger)?;
        let level: LogLevel = level.parse()?;
        self.set(channel, level);
        Ok(level)
    }

    /// Whether a record of `severity` on `channel` should be emitted.
    pub fn is_enabled(&self, channel: Channel, severity: LogLevel) -> bool {
        severity >= self.level(channel)
    }

    /// Map a log target back to its channel, if it names one.
    pub fn channel_for_target(target: &str) -> Option<Channel> {
        Channel::from_name(target)
    }
}
