//! Configuration management for the Contacts API.
//!
//! Settings come from environment variables, with an optional `.env` file
//! loaded first.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

/// Which contact store backs the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// SQLite database file
    Sqlite,
    /// Process-local store, lost on exit
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            _ => Err("Must be one of: sqlite, memory".to_string()),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite => f.write_str("sqlite"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Configuration for the Contacts API server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind (default: 0.0.0.0)
    pub host: IpAddr,

    /// Port to listen on (default: 8080)
    pub port: u16,

    /// Store backend (default: sqlite)
    pub store: StoreKind,

    /// SQLite database path (default: "contacts.db")
    pub database_path: String,

    /// Log filter used when `RUST_LOG` is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `CONTACTS_API_HOST`: Bind address (default: 0.0.0.0)
    /// - `CONTACTS_API_PORT`: Listen port (default: 8080)
    /// - `CONTACTS_STORE`: `sqlite` or `memory` (default: sqlite)
    /// - `CONTACTS_DATABASE_PATH`: SQLite file (default: contacts.db)
    /// - `LOG_LEVEL`: Logging filter (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = match env::var("CONTACTS_API_HOST") {
            Ok(val) => val.trim().parse::<IpAddr>().map_err(|_| ConfigError::InvalidValue {
                var: "CONTACTS_API_HOST".to_string(),
                reason: format!("Must be an IP address, got: {}", val),
            })?,
            Err(_) => defaults.host,
        };

        let port = Self::parse_env_u16("CONTACTS_API_PORT", defaults.port)?;

        let store = match env::var("CONTACTS_STORE") {
            Ok(val) => val
                .parse::<StoreKind>()
                .map_err(|reason| ConfigError::InvalidValue {
                    var: "CONTACTS_STORE".to_string(),
                    reason,
                })?,
            Err(_) => defaults.store,
        };

        let database_path =
            env::var("CONTACTS_DATABASE_PATH").unwrap_or(defaults.database_path);

        if store == StoreKind::Sqlite && database_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "CONTACTS_DATABASE_PATH".to_string(),
                reason: "Cannot be empty when CONTACTS_STORE=sqlite".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            host,
            port,
            store,
            database_path,
            log_level,
        })
    }

    /// The socket address the server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Parse an environment variable as u16 with a default value.
    fn parse_env_u16(var_name: &str, default: u16) -> ConfigResult<u16> {
        match env::var(var_name) {
            Ok(val) => val.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a number between 0-65535, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            store: StoreKind::Sqlite,
            database_path: "contacts.db".to_string(),
            log_level: "info".to_string(),
        }
    }
}
