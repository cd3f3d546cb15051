//! Simulated network latency.

use std::sync::Arc;
use std::time::Duration;

use attendance_store::AttendanceStore;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// Delays each request by the configured latency before handling it.
pub async fn latency_middleware<S: AttendanceStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    request: Request,
    next: Next,
) -> Response {
    let delay = state.config.simulated_latency_ms;
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    next.run(request).await
}
