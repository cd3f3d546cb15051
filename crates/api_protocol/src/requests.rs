//! Request bodies.

use serde::{Deserialize, Serialize};

use crate::types::*;

// ============================================================================
// Auth Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
}

// ============================================================================
// Subject Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSubjectRequest {
    pub subject_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindSubjectRequest {
    pub name: String,
}

// ============================================================================
// User Requests
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUsersRequest {
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

// ============================================================================
// Room Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subject_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRoomsRequest {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRoomRequest {
    pub room_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRoomByCodeRequest {
    pub room_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomRequest {
    pub room_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRoomAttendanceRequest {
    pub room_id: String,
}

// ============================================================================
// Attendance Requests
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAttendanceRequest {
    pub room_id: String,
    /// Defaults to the caller.
    #[serde(default)]
    pub student_id: Option<String>,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAttendanceRequest {
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetAttendancePercentageRequest {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub room_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAttendanceHistoryRequest {
    pub room_id: String,
}
