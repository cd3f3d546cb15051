//! Room API endpoints.

use std::sync::Arc;

use api_protocol::{
    DayStatus, RoomStats, SessionEntry, SessionReport, requests::*, responses::*,
};
use attendance_store::{
    AttendanceFilter, AttendanceMark, AttendanceStore, RoomFilter, UserFilter,
    summary::{RoomSummary, group_by_day},
};
use axum::{Extension, Json, extract::State};
use entities::{AttendanceStatus, Room, RoomCode, Subject, UserRole};
use uuid::Uuid;

use super::convert::{
    entity_to_api_record, entity_to_api_room, entity_to_api_user, parse_id, room_subject,
    to_api_outcome, to_api_status,
};
use crate::error::{ServerError, ServerResult};
use crate::extract::ApiJson;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;

/// Generated codes are retried this many times on collision.
const MAX_CODE_ATTEMPTS: usize = 8;

/// Loads a room or fails with 404.
pub(crate) async fn load_room<S: AttendanceStore>(state: &AppState<S>, id: Uuid) -> ServerResult<Room> {
    state
        .store
        .get_room(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Room not found".to_string()))
}

/// Fails with 403 unless the user is the teacher who owns the room.
pub(crate) fn require_owner(user: &AuthenticatedUser, room: &Room) -> ServerResult<()> {
    user.require_teacher()?;
    if !room.is_owned_by(user.id) {
        return Err(ServerError::PermissionDenied(
            "Room belongs to another teacher".to_string(),
        ));
    }
    Ok(())
}

fn normalized_code(input: &str) -> ServerResult<RoomCode> {
    let code = RoomCode::normalize(input);
    if code.is_empty() {
        return Err(ServerError::InvalidRequest("Room code is required".to_string()));
    }
    Ok(code)
}

/// Creates a room with a generated code. Teachers only.
pub async fn create_room<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<CreateRoomRequest>,
) -> ServerResult<Json<CreateRoomResponse>> {
    user.require_teacher()?;

    let name = request.name.trim();
    if name.is_empty() {
        return Err(ServerError::InvalidRequest("Room name is required".to_string()));
    }
    let subject = Subject::find(request.subject_id.trim())
        .ok_or_else(|| ServerError::InvalidRequest("Unknown subject".to_string()))?;

    for attempt in 1..=MAX_CODE_ATTEMPTS {
        let room = Room::new(name, subject.id.clone(), user.id);
        match state.store.create_room(room).await {
            Ok(room) => {
                tracing::info!(
                    room_id = %room.id,
                    room_code = %room.room_code,
                    teacher_id = %user.id,
                    "Room created"
                );
                return Ok(Json(CreateRoomResponse {
                    room: entity_to_api_room(&room),
                }));
            }
            Err(e) if e.is_already_exists() => {
                tracing::debug!(attempt, "Room code collision, regenerating");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(ServerError::Internal(
        "Could not allocate a unique room code".to_string(),
    ))
}

/// Lists the caller's rooms: owned rooms for teachers, attended rooms for
/// students.
pub async fn list_rooms<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<ListRoomsRequest>,
) -> ServerResult<Json<ListRoomsResponse>> {
    let mut filter = RoomFilter {
        limit: request.limit,
        offset: request.offset,
        ..Default::default()
    };
    match user.role {
        UserRole::Teacher => filter.teacher_id = Some(user.id),
        UserRole::Student => filter.attended_by = Some(user.id),
    }

    let (rooms, total) = state.store.list_rooms(filter).await?;

    Ok(Json(ListRoomsResponse {
        rooms: rooms.iter().map(entity_to_api_room).collect(),
        total_count: total,
    }))
}

/// Gets a room by ID.
pub async fn get_room<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    ApiJson(request): ApiJson<GetRoomRequest>,
) -> ServerResult<Json<GetRoomResponse>> {
    let room_id = parse_id(&request.room_id, "room_id")?;
    let room = load_room(&state, room_id).await?;

    Ok(Json(GetRoomResponse {
        room: entity_to_api_room(&room),
    }))
}

/// Gets a room by its join code.
pub async fn get_room_by_code<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    ApiJson(request): ApiJson<GetRoomByCodeRequest>,
) -> ServerResult<Json<GetRoomResponse>> {
    let code = normalized_code(&request.room_code)?;
    let room = state
        .store
        .get_room_by_code(&code)
        .await?
        .ok_or_else(|| ServerError::NotFound("Invalid room code".to_string()))?;

    Ok(Json(GetRoomResponse {
        room: entity_to_api_room(&room),
    }))
}

/// Joins a room by code, marking the student present for today.
pub async fn join_room<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<JoinRoomRequest>,
) -> ServerResult<Json<JoinRoomResponse>> {
    user.require_student()?;

    let code = normalized_code(&request.room_code)?;
    let room = state
        .store
        .get_room_by_code(&code)
        .await?
        .ok_or_else(|| ServerError::NotFound("Invalid room code".to_string()))?;

    let marked = state
        .store
        .mark_attendance(AttendanceMark::now(room.id, user.id, AttendanceStatus::Present))
        .await?;

    tracing::info!(
        room_id = %room.id,
        student_id = %user.id,
        outcome = ?marked.outcome,
        "Student joined room"
    );

    Ok(Json(JoinRoomResponse {
        room: entity_to_api_room(&room),
        record: entity_to_api_record(&marked.record),
        outcome: to_api_outcome(marked.outcome),
    }))
}

/// Builds the attendance report of a room. Owning teacher only.
///
/// Every registered student appears in every session; students without a
/// record that day are reported as `not_marked`.
pub async fn get_room_attendance<S: AttendanceStore>(
    State(state): State<Arc<AppState<S>>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<GetRoomAttendanceRequest>,
) -> ServerResult<Json<RoomAttendanceResponse>> {
    let room_id = parse_id(&request.room_id, "room_id")?;
    let room = load_room(&state, room_id).await?;
    require_owner(&user, &room)?;

    let (records, _) = state
        .store
        .list_attendance(AttendanceFilter {
            room_id: Some(room.id),
            ..Default::default()
        })
        .await?;
    let (students, _) = state
        .store
        .list_users(UserFilter {
            role: Some(UserRole::Student),
            ..Default::default()
        })
        .await?;

    let summary = RoomSummary::from_records(&records);

    let sessions = group_by_day(records)
        .into_iter()
        .map(|session| SessionReport {
            date: session.day,
            entries: students
                .iter()
                .map(|student| {
                    let record = session.record_for(student.id);
                    SessionEntry {
                        student: entity_to_api_user(student),
                        status: record.map_or(DayStatus::NotMarked, |r| {
                            DayStatus::from(to_api_status(r.status))
                        }),
                        marked_at: record.map(|r| r.date),
                    }
                })
                .collect(),
        })
        .collect();

    Ok(Json(RoomAttendanceResponse {
        subject: room_subject(&room),
        stats: RoomStats {
            created_at: room.created_at,
            unique_student_count: summary.unique_student_count,
            session_count: summary.session_count,
            present_count: summary.tally.present,
            total_count: summary.tally.total,
            percentage: summary.tally.percentage(),
        },
        room: entity_to_api_room(&room),
        sessions,
    }))
}
