//! Attendance record definitions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Attendance status of a student for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// Attended.
    Present,
    /// Did not attend.
    Absent,
}

impl AttendanceStatus {
    /// Returns true for `Present`.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present)
    }
}

/// One student's attendance in one room on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Room the record belongs to.
    pub room_id: Uuid,
    /// Student the record belongs to.
    pub student_id: Uuid,
    /// When attendance was marked.
    pub date: DateTime<Utc>,
    /// Present or absent.
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Creates a record marked now.
    pub fn new(room_id: Uuid, student_id: Uuid, status: AttendanceStatus) -> Self {
        Self::at(room_id, student_id, status, Utc::now())
    }

    /// Creates a record marked at the given time.
    pub fn at(
        room_id: Uuid,
        student_id: Uuid,
        status: AttendanceStatus,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_id,
            student_id,
            date,
            status,
        }
    }

    /// UTC calendar day of the record.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Returns true if this record is the one `(student, room, day)` slot
    /// identified by the arguments.
    pub fn occupies(&self, room_id: Uuid, student_id: Uuid, day: NaiveDate) -> bool {
        self.room_id == room_id && self.student_id == student_id && self.day() == day
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_record_day_is_utc() {
        let at = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 0).unwrap();
        let record = AttendanceRecord::at(
            Uuid::new_v4(),
            Uuid::new_v4(),
            AttendanceStatus::Present,
            at,
        );

        assert_eq!(record.day(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert!(record.status.is_present());
    }

    #[test]
    fn test_occupies() {
        let room_id = Uuid::new_v4();
        let student_id = Uuid::new_v4();
        let record = AttendanceRecord::new(room_id, student_id, AttendanceStatus::Absent);
        let today = Utc::now().date_naive();

        assert!(record.occupies(room_id, student_id, today));
        assert!(!record.occupies(Uuid::new_v4(), student_id, today));
        assert!(!record.occupies(room_id, student_id, today.pred_opt().unwrap()));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&AttendanceStatus::Absent).unwrap();
        assert_eq!(json, "\"absent\"");
    }
}
