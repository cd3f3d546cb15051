//! Attendance percentages and per-day sessions.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use entities::AttendanceRecord;
use uuid::Uuid;

/// Counts of present and total records in some scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceTally {
    /// Records with status `present`.
    pub present: u32,
    /// All records.
    pub total: u32,
}

impl AttendanceTally {
    /// Tallies the given records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut tally, record| {
            tally.total += 1;
            if record.status.is_present() {
                tally.present += 1;
            }
            tally
        })
    }

    /// Present share as a whole percentage, rounded half up. Zero when there
    /// are no records.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let (present, total) = (u64::from(self.present), u64::from(self.total));
        ((present * 200 + total) / (total * 2)) as u32
    }
}

/// Attendance percentage over the given records.
pub fn attendance_percentage(records: &[AttendanceRecord]) -> u32 {
    AttendanceTally::from_records(records).percentage()
}

/// All records of one UTC day in a room.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// The day.
    pub day: NaiveDate,
    /// Records marked that day.
    pub records: Vec<AttendanceRecord>,
}

impl Session {
    /// Finds the record of a student in this session.
    pub fn record_for(&self, student_id: Uuid) -> Option<&AttendanceRecord> {
        self.records.iter().find(|r| r.student_id == student_id)
    }
}

/// Groups records by UTC day, newest day first.
pub fn group_by_day(records: impl IntoIterator<Item = AttendanceRecord>) -> Vec<Session> {
    let mut days: BTreeMap<NaiveDate, Vec<AttendanceRecord>> = BTreeMap::new();
    for record in records {
        days.entry(record.day()).or_default().push(record);
    }

    days.into_iter()
        .rev()
        .map(|(day, mut records)| {
            records.sort_by(|a, b| a.date.cmp(&b.date));
            Session { day, records }
        })
        .collect()
}

/// Headline numbers for a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomSummary {
    /// Distinct students with at least one record.
    pub unique_student_count: u32,
    /// Distinct days with at least one record.
    pub session_count: u32,
    /// Present/total counts across the room.
    pub tally: AttendanceTally,
}

impl RoomSummary {
    /// Summarizes the records of one room.
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let students: HashSet<Uuid> = records.iter().map(|r| r.student_id).collect();
        let days: HashSet<NaiveDate> = records.iter().map(|r| r.day()).collect();

        Self {
            unique_student_count: students.len() as u32,
            session_count: days.len() as u32,
            tally: AttendanceTally::from_records(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use entities::AttendanceStatus;

    use super::*;

    fn records(statuses: &[AttendanceStatus]) -> Vec<AttendanceRecord> {
        let room_id = Uuid::new_v4();
        let start = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                AttendanceRecord::at(
                    room_id,
                    Uuid::new_v4(),
                    *status,
                    start + Duration::days(i as i64),
                )
            })
            .collect()
    }

    #[test]
    fn test_percentage_three_of_four() {
        use AttendanceStatus::*;
        assert_eq!(attendance_percentage(&records(&[Present, Present, Absent, Present])), 75);
    }

    #[test]
    fn test_percentage_no_records() {
        assert_eq!(attendance_percentage(&[]), 0);
    }

    #[test]
    fn test_percentage_rounding() {
        use AttendanceStatus::*;
        // 2/3 = 66.67 -> 67
        assert_eq!(attendance_percentage(&records(&[Present, Present, Absent])), 67);
        // 1/3 = 33.33 -> 33
        assert_eq!(attendance_percentage(&records(&[Present, Absent, Absent])), 33);
        // 1/8 = 12.5 -> 13
        let mut eighth = vec![Present];
        eighth.extend(std::iter::repeat_n(Absent, 7));
        assert_eq!(attendance_percentage(&records(&eighth)), 13);
        assert_eq!(attendance_percentage(&records(&[Absent])), 0);
        assert_eq!(attendance_percentage(&records(&[Present])), 100);
    }

    #[test]
    fn test_group_by_day_newest_first() {
        let room_id = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let day_one = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
        let day_two = day_one + Duration::days(1);
        let input = vec![
            AttendanceRecord::at(room_id, a, AttendanceStatus::Present, day_one),
            AttendanceRecord::at(room_id, a, AttendanceStatus::Absent, day_two),
            AttendanceRecord::at(room_id, b, AttendanceStatus::Present, day_one),
        ];

        let sessions = group_by_day(input.clone());
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].day, day_two.date_naive());
        assert_eq!(sessions[1].records.len(), 2);
        assert!(sessions[0].record_for(b).is_none());
        assert_eq!(
            sessions[1].record_for(b).map(|r| r.status),
            Some(AttendanceStatus::Present)
        );

        let summary = RoomSummary::from_records(&input);
        assert_eq!(summary.unique_student_count, 2);
        assert_eq!(summary.session_count, 2);
        assert_eq!(summary.tally, AttendanceTally { present: 2, total: 3 });
    }
}
