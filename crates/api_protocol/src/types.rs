//! Shared wire types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// User role. Registration defaults to `Student`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Teacher,
    #[default]
    Student,
}

/// Attendance status as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// Status of a student on a day in a report.
///
/// `NotMarked` is reported for students with no record that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Present,
    Absent,
    NotMarked,
}

impl From<AttendanceStatus> for DayStatus {
    fn from(status: AttendanceStatus) -> Self {
        match status {
            AttendanceStatus::Present => DayStatus::Present,
            AttendanceStatus::Absent => DayStatus::Absent,
        }
    }
}

/// Whether marking attendance inserted a new record or replaced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkOutcome {
    Created,
    Updated,
}

/// User.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Subject from the fixed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub code: String,
}

/// Room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub subject_id: String,
    pub teacher_id: String,
    pub room_code: String,
    pub created_at: DateTime<Utc>,
}

/// Attendance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    pub room_id: String,
    pub student_id: String,
    pub date: DateTime<Utc>,
    pub status: AttendanceStatus,
}

/// Headline numbers for a room report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomStats {
    pub created_at: DateTime<Utc>,
    pub unique_student_count: u32,
    pub session_count: u32,
    pub present_count: u32,
    pub total_count: u32,
    pub percentage: u32,
}

/// One student's row in a session of a room report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub student: User,
    pub status: DayStatus,
    /// Time of the record, absent for `not_marked`.
    pub marked_at: Option<DateTime<Utc>>,
}

/// One day of a room report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub date: NaiveDate,
    pub entries: Vec<SessionEntry>,
}

/// One day of a student's history in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryDay {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub marked_at: DateTime<Utc>,
}

/// A room on the student dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRoomSummary {
    pub room: Room,
    pub subject: Option<Subject>,
    pub percentage: u32,
}

/// A room on the teacher dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherRoomSummary {
    pub room: Room,
    pub subject: Option<Subject>,
    pub student_count: u32,
    pub session_count: u32,
}
