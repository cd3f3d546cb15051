//! User directory endpoints.

use std::sync::Arc;

use api_protocol::{requests::*, responses::*};
use attendance_store::{AttendanceStore, UserFilter};
use axum::{Extension, Json, extract::State};

use super::convert::{entity_to_api_user, to_entity_role};
use crate::error::ServerResult;
use crate::extract::ApiJson;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;

/// Lists users. Teachers only.
pub async fn list_users<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<ListUsersRequest>,
) -> ServerResult<Json<ListUsersResponse>> {
    user.require_teacher()?;

    let filter = UserFilter {
        role: request.role.map(to_entity_role),
        limit: request.limit,
        offset: request.offset,
    };

    let (users, total) = state.store.list_users(filter).await?;

    Ok(Json(ListUsersResponse {
        users: users.iter().map(entity_to_api_user).collect(),
        total_count: total,
    }))
}
