//! Callback RPC
//!
//! - POST /_callback - Run the callbacks affected by a property change

use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;

use crate::api::dto::CallbackResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::callbacks::CallbackRequest;

/// POST /_callback
///
/// Callbacks are synchronous and some read outlet layers from disk, so the
/// dispatch runs on the blocking pool.
pub async fn dispatch(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CallbackRequest>,
) -> ApiResult<Json<CallbackResponse>> {
    let start = Instant::now();
    let trigger = request.trigger.clone();
    let datasets = Arc::clone(&state.datasets);
    let registry = Arc::clone(&state.registry);

    let outputs = tokio::task::spawn_blocking(move || registry.dispatch(&datasets, request))
        .await
        .map_err(|e| ApiError::Internal(format!("Callback task failed: {}", e)))??;

    tracing::info!(
        trigger = trigger.as_deref().unwrap_or("<initial>"),
        outputs = outputs.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Callback dispatched"
    );

    Ok(Json(CallbackResponse { outputs }))
}
