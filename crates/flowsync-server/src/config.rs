//! Server configuration read from environment variables.
//!
//! - `FLOWSYNC_STORE`: `sqlite` (default) or `memory`
//! - `FLOWSYNC_DB_PATH`: SQLite database file path (default: "flowsync.db")
//! - `FLOWSYNC_COLLECTION`: document collection name (default: "reactflow_data")
//! - `PORT`: listen port (default: 5000); the server binds all interfaces
//!
//! Unparseable values fall back to the default with a warning.

use std::str::FromStr;

use flowsync_storage::{FlowStore, InMemoryStore, SqliteStore, StorageError, DEFAULT_COLLECTION};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DB_PATH: &str = "flowsync.db";

/// Which [`FlowStore`] backend the server opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" | "in-memory" | "inmemory" => Ok(StoreBackend::Memory),
            other => Err(format!(
                "unknown store backend '{}', expected sqlite or memory",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub backend: StoreBackend,
    pub db_path: String,
    pub collection: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            backend: StoreBackend::Sqlite,
            db_path: DEFAULT_DB_PATH.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = ServerConfig::default();

        let backend = match lookup("FLOWSYNC_STORE") {
            Some(raw) => raw.parse::<StoreBackend>().unwrap_or_else(|err| {
                tracing::warn!("{}; using sqlite", err);
                defaults.backend
            }),
            None => defaults.backend,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("invalid PORT '{}'; using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        ServerConfig {
            backend,
            db_path: lookup("FLOWSYNC_DB_PATH")
                .filter(|p| !p.is_empty())
                .unwrap_or(defaults.db_path),
            collection: lookup("FLOWSYNC_COLLECTION")
                .filter(|c| !c.is_empty())
                .unwrap_or(defaults.collection),
            port,
        }
    }

    /// Address the HTTP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Opens the configured backend.
    pub fn open_store(&self) -> Result<Box<dyn FlowStore>, StorageError> {
        match self.backend {
            StoreBackend::Sqlite => {
                let store = SqliteStore::new(&self.db_path)?.with_collection(&self.collection);
                Ok(Box::new(store))
            }
            StoreBackend::Memory => Ok(Box::new(InMemoryStore::new())),
        }
    }
}
