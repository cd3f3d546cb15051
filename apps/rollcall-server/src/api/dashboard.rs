//! Dashboards and the role-based index redirect.

use std::sync::Arc;

use api_protocol::{StudentRoomSummary, TeacherRoomSummary, responses::*};
use attendance_store::{
    AttendanceFilter, AttendanceStore, RoomFilter,
    summary::{AttendanceTally, RoomSummary},
};
use axum::{Extension, Json, extract::State, response::Redirect};
use entities::UserRole;

use super::convert::{entity_to_api_room, entity_to_api_user, room_subject};
use crate::error::{ServerError, ServerResult};
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;

/// Sends the visitor to their dashboard, or to the login page.
pub async fn index(user: Option<Extension<AuthenticatedUser>>) -> Redirect {
    match user.map(|Extension(user)| user.role) {
        Some(UserRole::Teacher) => Redirect::to("/teacher"),
        Some(UserRole::Student) => Redirect::to("/student"),
        None => Redirect::to("/login"),
    }
}

/// Student dashboard: overall percentage and every attended room.
pub async fn student_dashboard<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ServerResult<Json<StudentDashboardResponse>> {
    user.require_student()?;

    let db_user = state
        .store
        .get_user(user.id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    let (records, _) = state
        .store
        .list_attendance(AttendanceFilter {
            student_id: Some(user.id),
            ..Default::default()
        })
        .await?;
    let (rooms, _) = state
        .store
        .list_rooms(RoomFilter {
            attended_by: Some(user.id),
            ..Default::default()
        })
        .await?;

    let rooms = rooms
        .iter()
        .map(|room| {
            let tally = AttendanceTally::from_records(records.iter().filter(|r| r.room_id == room.id));
            StudentRoomSummary {
                room: entity_to_api_room(room),
                subject: room_subject(room),
                percentage: tally.percentage(),
            }
        })
        .collect();

    Ok(Json(StudentDashboardResponse {
        user: entity_to_api_user(&db_user),
        overall_percentage: AttendanceTally::from_records(&records).percentage(),
        rooms,
    }))
}

/// Teacher dashboard: owned rooms with student and session counts.
pub async fn teacher_dashboard<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ServerResult<Json<TeacherDashboardResponse>> {
    user.require_teacher()?;

    let db_user = state
        .store
        .get_user(user.id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    let (rooms, _) = state
        .store
        .list_rooms(RoomFilter {
            teacher_id: Some(user.id),
            ..Default::default()
        })
        .await?;

    let mut summaries = Vec::with_capacity(rooms.len());
    for room in &rooms {
        let (records, _) = state
            .store
            .list_attendance(AttendanceFilter {
                room_id: Some(room.id),
                ..Default::default()
            })
            .await?;
        let summary = RoomSummary::from_records(&records);

        summaries.push(TeacherRoomSummary {
            room: entity_to_api_room(room),
            subject: room_subject(room),
            student_count: summary.unique_student_count,
            session_count: summary.session_count,
        });
    }

    Ok(Json(TeacherDashboardResponse {
        user: entity_to_api_user(&db_user),
        rooms: summaries,
    }))
}
