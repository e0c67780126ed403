//! Application state management for the climate API.
//!
//! This module defines the shared state that is passed to all handlers.
//! Nothing in it is mutable after startup; the store handle is a pool.

use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::config::Config;
use crate::store::ClimateStore;

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Read-only database handle
    pub store: ClimateStore,
    /// Unique id of this server instance
    pub server_id: String,
    /// When the state was created
    pub started_at: Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, store: ClimateStore) -> Self {
        Self {
            config,
            store,
            server_id: Uuid::new_v4().to_string(),
            started_at: Instant::now(),
        }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config, store: ClimateStore) -> Arc<Self> {
        Arc::new(Self::new(config, store))
    }
}
