//! Application state.

use std::sync::Arc;

use attendance_store::AttendanceStore;
use auth::{JwtManager, RevokedTokens};

use crate::config::Config;

/// Shared application state.
pub struct AppState<S: AttendanceStore> {
    /// Server configuration.
    pub config: Config,
    /// User, room and attendance store.
    pub store: S,
    /// Issues and validates access tokens.
    pub jwt_manager: JwtManager,
    /// Tokens invalidated by logout.
    pub revoked_tokens: RevokedTokens,
}

impl<S: AttendanceStore> AppState<S> {
    /// Creates new application state.
    pub fn new(config: Config, store: S, jwt_manager: JwtManager) -> Self {
        Self {
            config,
            store,
            jwt_manager,
            revoked_tokens: RevokedTokens::new(),
        }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from config and store.
pub fn create_shared_state<S: AttendanceStore>(
    config: Config,
    store: S,
    jwt_manager: JwtManager,
) -> SharedState<S> {
    Arc::new(AppState::new(config, store, jwt_manager))
}
