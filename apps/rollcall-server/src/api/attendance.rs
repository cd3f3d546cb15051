//! Attendance API endpoints.

use std::sync::Arc;

use api_protocol::{HistoryDay, requests::*, responses::*};
use attendance_store::{
    AttendanceFilter, AttendanceMark, AttendanceStore, summary::AttendanceTally,
};
use axum::{Extension, Json, extract::State};
use entities::UserRole;
use uuid::Uuid;

use super::convert::{
    entity_to_api_record, entity_to_api_room, parse_id, room_subject, to_api_outcome,
    to_api_status, to_entity_status,
};
use super::room::{load_room, require_owner};
use crate::error::{ServerError, ServerResult};
use crate::extract::ApiJson;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;

/// Records a caller may read.
///
/// Students see only their own records. Teachers see records of one room
/// they own, optionally narrowed to one student.
#[derive(Debug, Clone, Copy)]
struct ReadScope {
    room_id: Option<Uuid>,
    student_id: Option<Uuid>,
}

async fn read_scope<S: AttendanceStore>(
    state: &AppState<S>,
    user: &AuthenticatedUser,
    room_id: Option<&str>,
    student_id: Option<&str>,
) -> ServerResult<ReadScope> {
    let room = match room_id {
        Some(id) => Some(load_room(state, parse_id(id, "room_id")?).await?),
        None => None,
    };
    let student_id = student_id.map(|id| parse_id(id, "student_id")).transpose()?;

    match user.role {
        UserRole::Student => {
            if student_id.is_some_and(|id| id != user.id) {
                return Err(ServerError::PermissionDenied(
                    "Students can only view their own attendance".to_string(),
                ));
            }
            Ok(ReadScope {
                room_id: room.map(|r| r.id),
                student_id: Some(user.id),
            })
        }
        UserRole::Teacher => {
            let room = room
                .ok_or_else(|| ServerError::InvalidRequest("room_id is required".to_string()))?;
            require_owner(user, &room)?;
            Ok(ReadScope {
                room_id: Some(room.id),
                student_id,
            })
        }
    }
}

/// Marks attendance for today.
///
/// Students mark themselves; the owning teacher may mark any student in the
/// room. Marking again on the same day replaces the status.
pub async fn mark_attendance<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<MarkAttendanceRequest>,
) -> ServerResult<Json<MarkAttendanceResponse>> {
    let room_id = parse_id(&request.room_id, "room_id")?;
    let room = load_room(&state, room_id).await?;
    let requested = request
        .student_id
        .as_deref()
        .map(|id| parse_id(id, "student_id"))
        .transpose()?;

    let student_id = match user.role {
        UserRole::Student => match requested {
            Some(id) if id != user.id => {
                return Err(ServerError::PermissionDenied(
                    "Students can only mark their own attendance".to_string(),
                ));
            }
            _ => user.id,
        },
        UserRole::Teacher => {
            require_owner(&user, &room)?;
            let id = requested
                .ok_or_else(|| ServerError::InvalidRequest("student_id is required".to_string()))?;
            let student = state
                .store
                .get_user(id)
                .await?
                .ok_or_else(|| ServerError::NotFound("Student not found".to_string()))?;
            if !student.role.is_student() {
                return Err(ServerError::InvalidRequest(
                    "Attendance can only be marked for students".to_string(),
                ));
            }
            student.id
        }
    };

    let marked = state
        .store
        .mark_attendance(AttendanceMark::now(
            room.id,
            student_id,
            to_entity_status(request.status),
        ))
        .await?;

    tracing::info!(
        room_id = %room.id,
        student_id = %student_id,
        marked_by = %user.id,
        status = ?marked.record.status,
        outcome = ?marked.outcome,
        "Attendance marked"
    );

    Ok(Json(MarkAttendanceResponse {
        record: entity_to_api_record(&marked.record),
        outcome: to_api_outcome(marked.outcome),
    }))
}

/// Lists attendance records, newest first.
pub async fn list_attendance<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<ListAttendanceRequest>,
) -> ServerResult<Json<ListAttendanceResponse>> {
    let scope = read_scope(
        &state,
        &user,
        request.room_id.as_deref(),
        request.student_id.as_deref(),
    )
    .await?;

    let (records, total) = state
        .store
        .list_attendance(AttendanceFilter {
            room_id: scope.room_id,
            student_id: scope.student_id,
            limit: request.limit,
            offset: request.offset,
            ..Default::default()
        })
        .await?;

    Ok(Json(ListAttendanceResponse {
        records: records.iter().map(entity_to_api_record).collect(),
        total_count: total,
    }))
}

/// Computes the present percentage over the caller's readable records.
pub async fn get_percentage<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<GetAttendancePercentageRequest>,
) -> ServerResult<Json<AttendancePercentageResponse>> {
    let scope = read_scope(
        &state,
        &user,
        request.room_id.as_deref(),
        request.student_id.as_deref(),
    )
    .await?;

    let (records, _) = state
        .store
        .list_attendance(AttendanceFilter {
            room_id: scope.room_id,
            student_id: scope.student_id,
            ..Default::default()
        })
        .await?;
    let tally = AttendanceTally::from_records(&records);

    Ok(Json(AttendancePercentageResponse {
        percentage: tally.percentage(),
        present_count: tally.present,
        total_count: tally.total,
    }))
}

/// Per-day history of the calling student in one room.
pub async fn get_history<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<GetAttendanceHistoryRequest>,
) -> ServerResult<Json<AttendanceHistoryResponse>> {
    user.require_student()?;

    let room_id = parse_id(&request.room_id, "room_id")?;
    let room = load_room(&state, room_id).await?;

    let (records, _) = state
        .store
        .list_attendance(AttendanceFilter {
            room_id: Some(room.id),
            student_id: Some(user.id),
            ..Default::default()
        })
        .await?;

    let percentage = AttendanceTally::from_records(&records).percentage();
    let days = records
        .iter()
        .map(|record| HistoryDay {
            date: record.day(),
            status: to_api_status(record.status),
            marked_at: record.date,
        })
        .collect();

    Ok(Json(AttendanceHistoryResponse {
        subject: room_subject(&room),
        room: entity_to_api_room(&room),
        percentage,
        days,
    }))
}
