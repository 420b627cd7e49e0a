//! Application state container
//!
//! This module defines the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::Settings;
use crate::db::{create_price_store, PriceStore};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
///
/// Cheaply cloneable; the price store is built once and shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Price catalog storage
    pub store: Arc<dyn PriceStore>,

    /// Application start time (for uptime calculation)
    pub start_time: Instant,
}

impl AppState {
    /// Create a new application state with the configured storage backend
    pub async fn new(settings: Settings) -> anyhow::Result<Self> {
        let settings = Arc::new(settings);
        let store = create_price_store(settings.clone()).await;

        tracing::info!(
            storage = %settings.storage_backend,
            table = %settings.fragrance_table,
            "Application state initialized successfully"
        );

        Ok(Self::with_store(settings, store))
    }

    /// Create state around an existing store
    pub fn with_store(settings: Arc<Settings>, store: Arc<dyn PriceStore>) -> Self {
        Self {
            settings,
            store,
            start_time: Instant::now(),
        }
    }

    /// Get the application uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
