//! Conversions from entities to wire types.

use attendance_store::MarkOutcome as StoreMarkOutcome;
use uuid::Uuid;

use crate::error::{ServerError, ServerResult};

/// Converts an entity role to its wire form.
pub fn to_api_role(role: entities::UserRole) -> api_protocol::UserRole {
    match role {
        entities::UserRole::Teacher => api_protocol::UserRole::Teacher,
        entities::UserRole::Student => api_protocol::UserRole::Student,
    }
}

/// Converts a wire role to the entity role.
pub fn to_entity_role(role: api_protocol::UserRole) -> entities::UserRole {
    match role {
        api_protocol::UserRole::Teacher => entities::UserRole::Teacher,
        api_protocol::UserRole::Student => entities::UserRole::Student,
    }
}

/// Converts an entity status to its wire form.
pub fn to_api_status(status: entities::AttendanceStatus) -> api_protocol::AttendanceStatus {
    match status {
        entities::AttendanceStatus::Present => api_protocol::AttendanceStatus::Present,
        entities::AttendanceStatus::Absent => api_protocol::AttendanceStatus::Absent,
    }
}

/// Converts a wire status to the entity status.
pub fn to_entity_status(status: api_protocol::AttendanceStatus) -> entities::AttendanceStatus {
    match status {
        api_protocol::AttendanceStatus::Present => entities::AttendanceStatus::Present,
        api_protocol::AttendanceStatus::Absent => entities::AttendanceStatus::Absent,
    }
}

pub fn to_api_outcome(outcome: StoreMarkOutcome) -> api_protocol::MarkOutcome {
    match outcome {
        StoreMarkOutcome::Created => api_protocol::MarkOutcome::Created,
        StoreMarkOutcome::Updated => api_protocol::MarkOutcome::Updated,
    }
}

/// Converts an entity user to the wire user.
pub fn entity_to_api_user(user: &entities::User) -> api_protocol::User {
    api_protocol::User {
        id: user.id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: to_api_role(user.role),
        created_at: user.created_at,
    }
}

pub fn entity_to_api_subject(subject: &entities::Subject) -> api_protocol::Subject {
    api_protocol::Subject {
        id: subject.id.clone(),
        name: subject.name.clone(),
        code: subject.code.clone(),
    }
}

/// Converts an entity room to the wire room.
pub fn entity_to_api_room(room: &entities::Room) -> api_protocol::Room {
    api_protocol::Room {
        id: room.id.to_string(),
        name: room.name.clone(),
        subject_id: room.subject_id.clone(),
        teacher_id: room.teacher_id.to_string(),
        room_code: room.room_code.to_string(),
        created_at: room.created_at,
    }
}

/// Converts an entity attendance record to the wire record.
pub fn entity_to_api_record(record: &entities::AttendanceRecord) -> api_protocol::AttendanceRecord {
    api_protocol::AttendanceRecord {
        id: record.id.to_string(),
        room_id: record.room_id.to_string(),
        student_id: record.student_id.to_string(),
        date: record.date,
        status: to_api_status(record.status),
    }
}

/// Looks up a room's subject in the catalog and converts it.
pub fn room_subject(room: &entities::Room) -> Option<api_protocol::Subject> {
    entities::Subject::find(&room.subject_id).map(|s| entity_to_api_subject(&s))
}

/// Parses an ID from a request field.
pub fn parse_id(value: &str, field: &str) -> ServerResult<Uuid> {
    value
        .trim()
        .parse()
        .map_err(|_| ServerError::InvalidRequest(format!("Invalid {field}")))
}
