//! Authentication middleware.

use std::sync::Arc;

use attendance_store::AttendanceStore;
use auth::{AuthError, Claims};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use entities::UserRole;
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Authenticated user information.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User ID.
    pub id: Uuid,
    /// User email.
    pub email: String,
    /// User display name.
    pub name: String,
    /// Teacher or student.
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// Fails with 403 unless the user is a teacher.
    pub fn require_teacher(&self) -> ServerResult<()> {
        if self.role.is_teacher() {
            Ok(())
        } else {
            Err(ServerError::PermissionDenied(
                "Only teachers can do this".to_string(),
            ))
        }
    }

    /// Fails with 403 unless the user is a student.
    pub fn require_student(&self) -> ServerResult<()> {
        if self.role.is_student() {
            Ok(())
        } else {
            Err(ServerError::PermissionDenied(
                "Only students can do this".to_string(),
            ))
        }
    }
}

impl TryFrom<Claims> for AuthenticatedUser {
    type Error = AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: claims.user_id()?,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        })
    }
}

/// Extracts the JWT token from the Authorization header.
fn extract_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Validates a token and rejects it if it was revoked.
fn authenticate<S: AttendanceStore>(
    state: &AppState<S>,
    token: &str,
) -> Result<(AuthenticatedUser, Claims), AuthError> {
    let claims = state.jwt_manager.validate_token(token)?;
    if state.revoked_tokens.is_revoked(&claims)? {
        return Err(AuthError::TokenRevoked);
    }
    let user = AuthenticatedUser::try_from(claims.clone())?;
    Ok((user, claims))
}

/// Authentication middleware.
///
/// Validates the bearer token and stores the [`AuthenticatedUser`] and its
/// [`Claims`] in the request extensions. Requests without a valid token are
/// rejected with 401.
pub async fn auth_middleware<S: AttendanceStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_token(&request) else {
        return ServerError::AuthenticationRequired.into_response();
    };

    match authenticate(&*state, token) {
        Ok((user, claims)) => {
            request.extensions_mut().insert(user);
            request.extensions_mut().insert(claims);
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected access token");
            return ServerError::Auth(e).into_response();
        }
    }

    next.run(request).await
}

/// Optional authentication middleware.
///
/// Works like [`auth_middleware`] but lets requests without a valid token
/// through anonymously.
pub async fn optional_auth_middleware<S: AttendanceStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_token(&request) {
        if let Ok((user, claims)) = authenticate(&*state, token) {
            request.extensions_mut().insert(user);
            request.extensions_mut().insert(claims);
        }
    }

    next.run(request).await
}
