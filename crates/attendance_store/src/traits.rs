//! Store trait definitions.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use entities::{
    AttendanceRecord, AttendanceStatus, Credential, Room, RoomCode, User, UserRole,
};
use uuid::Uuid;

use crate::StoreResult;

/// Filter options for listing users.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Filter by role.
    pub role: Option<UserRole>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

/// Filter options for listing rooms.
#[derive(Debug, Clone, Default)]
pub struct RoomFilter {
    /// Filter by owning teacher.
    pub teacher_id: Option<Uuid>,
    /// Only rooms in which this student has at least one attendance record.
    pub attended_by: Option<Uuid>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

/// Filter options for listing attendance records.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    /// Filter by room.
    pub room_id: Option<Uuid>,
    /// Filter by student.
    pub student_id: Option<Uuid>,
    /// Filter by UTC calendar day.
    pub day: Option<NaiveDate>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
}

/// A request to mark a student's attendance.
#[derive(Debug, Clone)]
pub struct AttendanceMark {
    /// Room being attended.
    pub room_id: Uuid,
    /// Student being marked.
    pub student_id: Uuid,
    /// Status to record.
    pub status: AttendanceStatus,
    /// Time of the mark; its UTC day selects the slot to upsert.
    pub at: DateTime<Utc>,
}

impl AttendanceMark {
    /// Creates a mark for the current time.
    pub fn now(room_id: Uuid, student_id: Uuid, status: AttendanceStatus) -> Self {
        Self {
            room_id,
            student_id,
            status,
            at: Utc::now(),
        }
    }
}

/// Whether marking attendance inserted a record or changed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// A new record was inserted for the day.
    Created,
    /// The day's existing record had its status replaced.
    Updated,
}

/// Result of marking attendance.
#[derive(Debug, Clone)]
pub struct MarkedAttendance {
    /// The record as stored.
    pub record: AttendanceRecord,
    /// Insert or update.
    pub outcome: MarkOutcome,
}

/// Trait for user, room and attendance storage.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    // =========================================================================
    // User operations
    // =========================================================================

    /// Creates a new user. Fails if the email is already registered,
    /// ignoring case.
    async fn create_user(&self, user: User) -> StoreResult<User>;

    /// Gets a user by ID.
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Gets a user by email, ignoring case and surrounding whitespace.
    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Lists users with optional filters.
    async fn list_users(&self, filter: UserFilter) -> StoreResult<(Vec<User>, u32)>;

    // =========================================================================
    // Credential operations
    // =========================================================================

    /// Stores or replaces the credential of an existing user.
    async fn set_credential(&self, credential: Credential) -> StoreResult<()>;

    /// Gets the credential of a user.
    async fn get_credential(&self, user_id: Uuid) -> StoreResult<Option<Credential>>;

    // =========================================================================
    // Room operations
    // =========================================================================

    /// Creates a new room. Fails if the room code is already taken.
    async fn create_room(&self, room: Room) -> StoreResult<Room>;

    /// Gets a room by ID.
    async fn get_room(&self, id: Uuid) -> StoreResult<Option<Room>>;

    /// Gets a room by its join code.
    async fn get_room_by_code(&self, code: &RoomCode) -> StoreResult<Option<Room>>;

    /// Lists rooms with optional filters.
    async fn list_rooms(&self, filter: RoomFilter) -> StoreResult<(Vec<Room>, u32)>;

    // =========================================================================
    // Attendance operations
    // =========================================================================

    /// Marks attendance, keeping at most one record per student, room and
    /// UTC day.
    async fn mark_attendance(&self, mark: AttendanceMark) -> StoreResult<MarkedAttendance>;

    /// Inserts a record as-is. Used for seeding history.
    async fn insert_attendance_record(
        &self,
        record: AttendanceRecord,
    ) -> StoreResult<AttendanceRecord>;

    /// Gets an attendance record by ID.
    async fn get_attendance_record(&self, id: Uuid) -> StoreResult<Option<AttendanceRecord>>;

    /// Lists attendance records with optional filters, newest first.
    async fn list_attendance(
        &self,
        filter: AttendanceFilter,
    ) -> StoreResult<(Vec<AttendanceRecord>, u32)>;
}
