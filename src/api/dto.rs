//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::callbacks::Outputs;
use crate::city::{City, TabId};
use crate::view::Node;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Callback response: every output the request produced, keyed by `id.prop`
#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub outputs: Outputs,
}

/// `?city=` on the entry point
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub city: Option<String>,
}

/// `?city=&tab=` on the layout endpoint
#[derive(Debug, Default, Deserialize)]
pub struct LayoutQuery {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub tab: Option<String>,
}

/// View tree of one page
#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub city: City,
    pub tab: TabId,
    pub layout: Node,
}

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy or degraded
    pub status: String,
    /// Violated data invariants found at load
    pub data_issues: usize,
    /// Non-fatal data warnings
    pub data_warnings: usize,
    /// Registered callbacks
    pub callbacks: usize,
    pub started_at: DateTime<Utc>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
