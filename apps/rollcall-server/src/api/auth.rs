//! Authentication API endpoints.

use std::sync::Arc;

use api_protocol::{requests::*, responses::*};
use attendance_store::AttendanceStore;
use auth::Claims;
use axum::{Extension, Json, extract::State};
use entities::{Credential, User};

use super::convert::{entity_to_api_user, to_entity_role};
use crate::error::{ServerError, ServerResult};
use crate::extract::ApiJson;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;

/// Returns the trimmed value, or an error naming the missing field.
fn required<'a>(value: &'a str, field: &str) -> ServerResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServerError::InvalidRequest(format!("{field} is required")));
    }
    Ok(value)
}

fn issue_token<S: AttendanceStore>(state: &AppState<S>, user: &User) -> ServerResult<AuthResponse> {
    let token = state.jwt_manager.generate_token(user)?;

    Ok(AuthResponse {
        token,
        expires_in: state.jwt_manager.expiration_seconds()?,
        user: entity_to_api_user(user),
    })
}

/// Tells anonymous visitors how to log in.
pub async fn login_info() -> Json<LoginInfoResponse> {
    Json(LoginInfoResponse {
        message: "POST an email and password to log in".to_string(),
        login_endpoint: "/api/auth/login".to_string(),
        register_endpoint: "/api/auth/register".to_string(),
    })
}

/// Logs in with email and password.
///
/// The email is matched ignoring case and surrounding whitespace.
pub async fn login<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ServerResult<Json<AuthResponse>> {
    let email = required(&request.email, "Email")?;
    let password = required(&request.password, "Password")?;

    let user = state
        .store
        .get_user_by_email(email)
        .await?
        .ok_or(ServerError::InvalidCredentials)?;

    let credential = state
        .store
        .get_credential(user.id)
        .await?
        .ok_or(ServerError::InvalidCredentials)?;

    if !auth::verify_password(password, &credential.password_hash)? {
        tracing::info!(user_id = %user.id, "Login rejected");
        return Err(ServerError::InvalidCredentials);
    }

    tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

    Ok(Json(issue_token(&state, &user)?))
}

/// Registers a new account and logs it in.
pub async fn register<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> ServerResult<Json<AuthResponse>> {
    let name = required(&request.name, "Name")?;
    let email = required(&request.email, "Email")?;
    let password = required(&request.password, "Password")?;

    let user = User::new(name, email, to_entity_role(request.role));
    let user = state.store.create_user(user).await?;
    state
        .store
        .set_credential(Credential::new(user.id, auth::hash_password(password)?))
        .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "User registered");

    Ok(Json(issue_token(&state, &user)?))
}

/// Gets the current authenticated user.
pub async fn get_current_user<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ServerResult<Json<GetCurrentUserResponse>> {
    let db_user = state
        .store
        .get_user(user.id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    Ok(Json(GetCurrentUserResponse {
        user: entity_to_api_user(&db_user),
    }))
}

/// Logs out by revoking the presented token.
pub async fn logout<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(claims): Extension<Claims>,
) -> ServerResult<Json<LogoutResponse>> {
    state.revoked_tokens.revoke(&claims)?;
    let expired = state.revoked_tokens.cleanup_expired()?;

    tracing::info!(user_id = %claims.sub, pruned = expired, "User logged out");

    Ok(Json(LogoutResponse { success: true }))
}
