use axum::{extract::State, http::StatusCode};

use crate::{AppState, View};

/// Health check endpoint
///
/// Returns "ok" if the service is running.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness check endpoint
///
/// Returns "ready" once the author view mapping is registered.
pub async fn readiness(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    state
        .query
        .registry()
        .lookup(View::AuthorDto, View::Author)
        .map_err(|e| {
            tracing::warn!(error = %e, "Not ready");
            StatusCode::SERVICE_UNAVAILABLE
        })?;

    Ok("ready")
}
