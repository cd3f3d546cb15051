//! Response bodies.

use serde::{Deserialize, Serialize};

use crate::types::*;

// ============================================================================
// Auth Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    /// Seconds until the token expires.
    pub expires_in: u64,
    pub user: User,
}

/// Describes how to log in, for clients that land on `GET /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInfoResponse {
    pub message: String,
    pub login_endpoint: String,
    pub register_endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetCurrentUserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
}

// ============================================================================
// Subject Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSubjectsResponse {
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSubjectResponse {
    pub subject: Subject,
}

// ============================================================================
// User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
    pub total_count: u32,
}

// ============================================================================
// Room Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room: Room,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRoomsResponse {
    pub rooms: Vec<Room>,
    pub total_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRoomResponse {
    pub room: Room,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomResponse {
    pub room: Room,
    pub record: AttendanceRecord,
    pub outcome: MarkOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomAttendanceResponse {
    pub room: Room,
    pub subject: Option<Subject>,
    pub stats: RoomStats,
    /// Newest day first.
    pub sessions: Vec<SessionReport>,
}

// ============================================================================
// Attendance Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAttendanceResponse {
    pub record: AttendanceRecord,
    pub outcome: MarkOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAttendanceResponse {
    pub records: Vec<AttendanceRecord>,
    pub total_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendancePercentageResponse {
    pub percentage: u32,
    pub present_count: u32,
    pub total_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceHistoryResponse {
    pub room: Room,
    pub subject: Option<Subject>,
    pub percentage: u32,
    /// Newest day first.
    pub days: Vec<HistoryDay>,
}

// ============================================================================
// Dashboard Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentDashboardResponse {
    pub user: User,
    pub overall_percentage: u32,
    pub rooms: Vec<StudentRoomSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherDashboardResponse {
    pub user: User,
    pub rooms: Vec<TeacherRoomSummary>,
}
