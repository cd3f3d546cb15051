//! API endpoints.

pub mod attendance;
pub mod auth;
pub mod convert;
pub mod dashboard;
pub mod room;
pub mod subject;
pub mod user;

use std::sync::Arc;

use attendance_store::AttendanceStore;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::middleware::{auth_middleware, optional_auth_middleware};
use crate::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<S: AttendanceStore + 'static>(
    state: Arc<AppState<S>>,
) -> Router<Arc<AppState<S>>> {
    let protected = Router::new()
        // Session endpoints
        .route("/api/auth/me", get(auth::get_current_user))
        .route("/api/auth/logout", post(auth::logout))
        // Subject endpoints
        .route("/api/subject/list", get(subject::list_subjects))
        .route("/api/subject/get", post(subject::get_subject))
        .route("/api/subject/find", post(subject::find_subject))
        // User endpoints
        .route("/api/user/list", post(user::list_users))
        // Room endpoints
        .route("/api/room/create", post(room::create_room))
        .route("/api/room/list", post(room::list_rooms))
        .route("/api/room/get", post(room::get_room))
        .route("/api/room/get-by-code", post(room::get_room_by_code))
        .route("/api/room/join", post(room::join_room))
        .route("/api/room/attendance", post(room::get_room_attendance))
        // Attendance endpoints
        .route("/api/attendance/mark", post(attendance::mark_attendance))
        .route("/api/attendance/list", post(attendance::list_attendance))
        .route("/api/attendance/percentage", post(attendance::get_percentage))
        .route("/api/attendance/history", post(attendance::get_history))
        // Dashboards
        .route("/student", get(dashboard::student_dashboard))
        .route("/teacher", get(dashboard::teacher_dashboard))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware::<S>));

    let index = Router::new()
        .route("/", get(dashboard::index))
        .route_layer(from_fn_with_state(state, optional_auth_middleware::<S>));

    Router::new()
        // Auth endpoints
        .route("/login", get(auth::login_info).post(auth::login))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        // Health check
        .route("/health", get(health_check))
        .merge(index)
        .merge(protected)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
