//! Application state with the shared [`FlowService`].
//!
//! The store is opened once by the process entry point and injected here.
//! When opening fails the state is built without a service and every data
//! route answers with [`ApiError::StoreUnavailable`] for the lifetime of the
//! process.
//!
//! `SqliteStore` holds a `rusqlite::Connection`, which is `!Sync`, so the
//! service sits behind `tokio::sync::Mutex`. Each store call runs inside one
//! lock scope.

use std::sync::Arc;

use tokio::sync::Mutex;

use flowsync_storage::InMemoryStore;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::service::FlowService;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// `None` when the store could not be opened at startup.
    service: Option<Arc<Mutex<FlowService>>>,
}

impl AppState {
    /// Creates a state around an already-built service.
    pub fn new(service: FlowService) -> Self {
        AppState {
            service: Some(Arc::new(Mutex::new(service))),
        }
    }

    /// Creates a degraded state with no store.
    pub fn unavailable() -> Self {
        AppState { service: None }
    }

    /// Opens the store described by `config`, degrading on failure.
    pub fn from_config(config: &ServerConfig) -> Self {
        match config.open_store() {
            Ok(store) => {
                tracing::info!(backend = ?config.backend, "document store initialized");
                AppState::new(FlowService::new(store))
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to initialize document store");
                AppState::unavailable()
            }
        }
    }

    /// Creates a state backed by an [`InMemoryStore`] (for testing).
    pub fn in_memory() -> Self {
        AppState::new(FlowService::new(Box::new(InMemoryStore::new())))
    }

    /// Whether the store opened successfully.
    pub fn store_connected(&self) -> bool {
        self.service.is_some()
    }

    /// The shared service, or [`ApiError::StoreUnavailable`].
    pub fn service(&self) -> Result<&Arc<Mutex<FlowService>>, ApiError> {
        self.service.as_ref().ok_or(ApiError::StoreUnavailable)
    }
}
