//! Server configuration.

use std::{env, fmt, str::FromStr};

use anyhow::Context;

/// Backing store selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Process-lifetime maps, lost on restart.
    Memory,
    /// SQLite database at `DATABASE_URL`.
    Sqlite,
}

impl FromStr for StorageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StorageKind::Memory),
            "sqlite" => Ok(StorageKind::Sqlite),
            other => anyhow::bail!("unknown storage kind {other:?}, expected memory or sqlite"),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Memory => write!(f, "memory"),
            StorageKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Which store to run on.
    pub storage: StorageKind,
    /// Database URL, used with SQLite storage.
    pub database_url: String,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("FILMORATE_SERVER_PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("FILMORATE_SERVER_PORT is not a valid port: {port:?}"))?,
            None => 8080,
        };

        let storage = match lookup("FILMORATE_STORAGE") {
            Some(kind) => kind.parse().context("invalid FILMORATE_STORAGE")?,
            None => StorageKind::Sqlite,
        };

        Ok(Self {
            host: lookup("FILMORATE_SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            storage,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite:filmorate.db?mode=rwc".to_string()),
            log_level: lookup("FILMORATE_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
