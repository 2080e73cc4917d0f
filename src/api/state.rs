//! Application State
//!
//! Shared state accessible by all API handlers. Nothing here is mutated after
//! startup, so handlers share it through an `Arc` without locking.

use crate::callbacks::Registry;
use crate::config::Config;
use crate::data::{Datasets, IntegrityReport};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Datasets loaded once at startup
    pub datasets: Arc<Datasets>,
    /// Callbacks the browser runtime can invoke
    pub registry: Arc<Registry>,
    pub config: Arc<Config>,
    /// Load-time invariant check, reported by the health endpoints
    pub integrity: Arc<IntegrityReport>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(datasets: Datasets, config: Config) -> Self {
        let integrity = datasets.integrity_report();
        for issue in &integrity.issues {
            tracing::warn!(
                city = ?issue.city,
                dataset = %issue.dataset,
                "{}",
                issue.message
            );
        }

        Self {
            datasets: Arc::new(datasets),
            registry: Arc::new(Registry::new()),
            config: Arc::new(config),
            integrity: Arc::new(integrity),
            start_time: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
