//! Rollcall server
//!
//! Teachers open rooms for a subject and hand out a short room code.
//! Students join with the code, which marks them present for the day, and
//! both sides can review attendance percentages and per-day history.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod services;
pub mod state;

use std::sync::Arc;

use attendance_store::AttendanceStore;
use auth::{JwtConfig, JwtManager};
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::state::{AppState, create_shared_state};

/// Creates the application router with all routes configured.
pub fn create_app<S: AttendanceStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::create_router(state.clone())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::latency_middleware::<S>,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Creates the application state with the given configuration and store.
///
/// Without a configured secret a random one is generated, so tokens do not
/// survive a restart.
pub fn create_state<S: AttendanceStore>(config: Config, store: S) -> Arc<AppState<S>> {
    let secret = match &config.jwt_secret {
        Some(secret) => secret.clone(),
        None => {
            tracing::warn!(
                "ROLLCALL_JWT_SECRET not set; using a random secret, tokens will not survive a restart"
            );
            auth::generate_secret()
        }
    };

    let jwt_config = JwtConfig::new(secret).with_expiration_hours(config.jwt_expiration_hours);

    create_shared_state(config, store, JwtManager::new(jwt_config))
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
