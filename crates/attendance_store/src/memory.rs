//! In-memory attendance store implementation.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use async_trait::async_trait;
use entities::{AttendanceRecord, Credential, Room, RoomCode, User, normalize_email};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    AttendanceFilter, AttendanceMark, AttendanceStore, MarkOutcome, MarkedAttendance, RoomFilter,
    StoreError, StoreResult, UserFilter,
};

/// In-memory store. All state is lost when the process exits.
#[derive(Debug, Default, Clone)]
pub struct MemoryAttendanceStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    credentials: Arc<RwLock<HashMap<Uuid, Credential>>>,
    rooms: Arc<RwLock<HashMap<Uuid, Room>>>,
    attendance: Arc<RwLock<HashMap<Uuid, AttendanceRecord>>>,
}

impl MemoryAttendanceStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Applies offset and limit to an already filtered and sorted list.
fn paginate<T>(items: Vec<T>, offset: Option<u32>, limit: Option<u32>) -> (Vec<T>, u32) {
    let total = items.len() as u32;
    let items = items
        .into_iter()
        .skip(offset.unwrap_or(0) as usize)
        .take(limit.map_or(usize::MAX, |l| l as usize))
        .collect();
    (items, total)
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    // =========================================================================
    // User operations
    // =========================================================================

    async fn create_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(StoreError::already_exists("User", user.id.to_string()));
        }
        if users.values().any(|u| u.email_matches(&user.email)) {
            return Err(StoreError::already_exists("User", normalize_email(&user.email)));
        }
        users.insert(user.id, user.clone());
        tracing::debug!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email_matches(email)).cloned())
    }

    async fn list_users(&self, filter: UserFilter) -> StoreResult<(Vec<User>, u32)> {
        let users = self.users.read().await;
        let mut result: Vec<User> = users
            .values()
            .filter(|u| filter.role.is_none_or(|role| u.role == role))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));

        Ok(paginate(result, filter.offset, filter.limit))
    }

    // =========================================================================
    // Credential operations
    // =========================================================================

    async fn set_credential(&self, credential: Credential) -> StoreResult<()> {
        if !self.users.read().await.contains_key(&credential.user_id) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "credential references unknown user {}",
                credential.user_id
            )));
        }
        let mut credentials = self.credentials.write().await;
        credentials.insert(credential.user_id, credential);
        Ok(())
    }

    async fn get_credential(&self, user_id: Uuid) -> StoreResult<Option<Credential>> {
        let credentials = self.credentials.read().await;
        Ok(credentials.get(&user_id).cloned())
    }

    // =========================================================================
    // Room operations
    // =========================================================================

    async fn create_room(&self, room: Room) -> StoreResult<Room> {
        let mut rooms = self.rooms.write().await;
        if rooms.contains_key(&room.id) {
            return Err(StoreError::already_exists("Room", room.id.to_string()));
        }
        if rooms.values().any(|r| r.room_code == room.room_code) {
            return Err(StoreError::already_exists("Room", room.room_code.to_string()));
        }
        rooms.insert(room.id, room.clone());
        tracing::debug!(room_id = %room.id, room_code = %room.room_code, "Room created");
        Ok(room)
    }

    async fn get_room(&self, id: Uuid) -> StoreResult<Option<Room>> {
        let rooms = self.rooms.read().await;
        Ok(rooms.get(&id).cloned())
    }

    async fn get_room_by_code(&self, code: &RoomCode) -> StoreResult<Option<Room>> {
        let rooms = self.rooms.read().await;
        Ok(rooms.values().find(|r| &r.room_code == code).cloned())
    }

    async fn list_rooms(&self, filter: RoomFilter) -> StoreResult<(Vec<Room>, u32)> {
        // Resolved before the rooms lock is taken so the two locks never nest.
        let attended: Option<HashSet<Uuid>> = match filter.attended_by {
            Some(student_id) => {
                let attendance = self.attendance.read().await;
                Some(
                    attendance
                        .values()
                        .filter(|r| r.student_id == student_id)
                        .map(|r| r.room_id)
                        .collect(),
                )
            }
            None => None,
        };

        let rooms = self.rooms.read().await;
        let mut result: Vec<Room> = rooms
            .values()
            .filter(|r| filter.teacher_id.is_none_or(|id| r.teacher_id == id))
            .filter(|r| attended.as_ref().is_none_or(|ids| ids.contains(&r.id)))
            .cloned()
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));

        Ok(paginate(result, filter.offset, filter.limit))
    }

    // =========================================================================
    // Attendance operations
    // =========================================================================

    async fn mark_attendance(&self, mark: AttendanceMark) -> StoreResult<MarkedAttendance> {
        if !self.rooms.read().await.contains_key(&mark.room_id) {
            return Err(StoreError::not_found("Room", mark.room_id.to_string()));
        }

        let day = mark.at.date_naive();
        let mut attendance = self.attendance.write().await;

        let existing = attendance
            .values_mut()
            .find(|r| r.occupies(mark.room_id, mark.student_id, day));

        let marked = match existing {
            Some(record) => {
                record.status = mark.status;
                MarkedAttendance {
                    record: record.clone(),
                    outcome: MarkOutcome::Updated,
                }
            }
            None => {
                let record =
                    AttendanceRecord::at(mark.room_id, mark.student_id, mark.status, mark.at);
                attendance.insert(record.id, record.clone());
                MarkedAttendance {
                    record,
                    outcome: MarkOutcome::Created,
                }
            }
        };

        tracing::debug!(
            record_id = %marked.record.id,
            room_id = %mark.room_id,
            student_id = %mark.student_id,
            outcome = ?marked.outcome,
            "Attendance marked"
        );

        Ok(marked)
    }

    async fn insert_attendance_record(
        &self,
        record: AttendanceRecord,
    ) -> StoreResult<AttendanceRecord> {
        if !self.rooms.read().await.contains_key(&record.room_id) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "attendance record references unknown room {}",
                record.room_id
            )));
        }

        let mut attendance = self.attendance.write().await;
        if attendance.contains_key(&record.id)
            || attendance
                .values()
                .any(|r| r.occupies(record.room_id, record.student_id, record.day()))
        {
            return Err(StoreError::already_exists(
                "AttendanceRecord",
                record.id.to_string(),
            ));
        }
        attendance.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_attendance_record(&self, id: Uuid) -> StoreResult<Option<AttendanceRecord>> {
        let attendance = self.attendance.read().await;
        Ok(attendance.get(&id).cloned())
    }

    async fn list_attendance(
        &self,
        filter: AttendanceFilter,
    ) -> StoreResult<(Vec<AttendanceRecord>, u32)> {
        let attendance = self.attendance.read().await;
        let mut result: Vec<AttendanceRecord> = attendance
            .values()
            .filter(|r| filter.room_id.is_none_or(|id| r.room_id == id))
            .filter(|r| filter.student_id.is_none_or(|id| r.student_id == id))
            .filter(|r| filter.day.is_none_or(|day| r.day() == day))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(paginate(result, filter.offset, filter.limit))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use entities::{AttendanceStatus, UserRole};

    use super::*;

    async fn store_with_room() -> (MemoryAttendanceStore, User, User, Room) {
        let store = MemoryAttendanceStore::new();
        let teacher = store
            .create_user(User::new("John Smith", "teacher@example.com", UserRole::Teacher))
            .await
            .unwrap();
        let student = store
            .create_user(User::new("Alex Johnson", "student@example.com", UserRole::Student))
            .await
            .unwrap();
        let room = store
            .create_room(
                Room::new("Mathematics Class", "sub1", teacher.id)
                    .with_code(RoomCode::normalize("MATH123")),
            )
            .await
            .unwrap();
        (store, teacher, student, room)
    }

    #[tokio::test]
    async fn test_user_crud() {
        let store = MemoryAttendanceStore::new();

        let user = User::new("Sam Wilson", "Student2@Example.com", UserRole::Student);
        let created = store.create_user(user).await.unwrap();

        let fetched = store.get_user(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Sam Wilson");

        let by_email = store
            .get_user_by_email(" student2@EXAMPLE.com ")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, created.id);

        assert!(store.get_user_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryAttendanceStore::new();
        store
            .create_user(User::new("Jane Doe", "teacher2@example.com", UserRole::Teacher))
            .await
            .unwrap();

        let err = store
            .create_user(User::new("Impostor", "TEACHER2@example.com", UserRole::Student))
            .await
            .unwrap_err();
        assert!(err.is_already_exists());

        let (users, total) = store.list_users(UserFilter::default()).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_list_users_by_role() {
        let (store, _, student, _) = store_with_room().await;

        let filter = UserFilter {
            role: Some(UserRole::Student),
            ..Default::default()
        };
        let (students, total) = store.list_users(filter).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(students[0].id, student.id);
    }

    #[tokio::test]
    async fn test_credentials() {
        let (store, teacher, _, _) = store_with_room().await;

        store
            .set_credential(Credential::new(teacher.id, "hash"))
            .await
            .unwrap();
        let credential = store.get_credential(teacher.id).await.unwrap().unwrap();
        assert_eq!(credential.password_hash, "hash");

        let err = store
            .set_credential(Credential::new(Uuid::new_v4(), "hash"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
    }

    #[tokio::test]
    async fn test_room_lookup_and_code_uniqueness() {
        let (store, teacher, _, room) = store_with_room().await;

        let by_code = store
            .get_room_by_code(&RoomCode::normalize("math123"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_code.id, room.id);

        assert!(
            store
                .get_room_by_code(&RoomCode::normalize("NOPE99"))
                .await
                .unwrap()
                .is_none()
        );

        let clash = Room::new("Another", "sub2", teacher.id).with_code(room.room_code.clone());
        assert!(store.create_room(clash).await.unwrap_err().is_already_exists());
    }

    #[tokio::test]
    async fn test_list_rooms_filters() {
        let (store, teacher, student, room) = store_with_room().await;
        let other_teacher = store
            .create_user(User::new("Jane Doe", "teacher2@example.com", UserRole::Teacher))
            .await
            .unwrap();
        store
            .create_room(Room::new("History Seminar", "sub3", other_teacher.id))
            .await
            .unwrap();

        let filter = RoomFilter {
            teacher_id: Some(teacher.id),
            ..Default::default()
        };
        let (rooms, total) = store.list_rooms(filter).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(rooms[0].id, room.id);

        let attended = RoomFilter {
            attended_by: Some(student.id),
            ..Default::default()
        };
        let (rooms, _) = store.list_rooms(attended.clone()).await.unwrap();
        assert!(rooms.is_empty());

        store
            .mark_attendance(AttendanceMark::now(room.id, student.id, AttendanceStatus::Present))
            .await
            .unwrap();
        let (rooms, total) = store.list_rooms(attended).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(rooms[0].id, room.id);
    }

    #[tokio::test]
    async fn test_mark_attendance_twice_same_day_updates() {
        let (store, _, student, room) = store_with_room().await;
        let morning = Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0).unwrap();
        let afternoon = morning + Duration::hours(6);

        let first = store
            .mark_attendance(AttendanceMark {
                room_id: room.id,
                student_id: student.id,
                status: AttendanceStatus::Present,
                at: morning,
            })
            .await
            .unwrap();
        assert_eq!(first.outcome, MarkOutcome::Created);

        let second = store
            .mark_attendance(AttendanceMark {
                room_id: room.id,
                student_id: student.id,
                status: AttendanceStatus::Absent,
                at: afternoon,
            })
            .await
            .unwrap();
        assert_eq!(second.outcome, MarkOutcome::Updated);
        assert_eq!(second.record.id, first.record.id);
        assert_eq!(second.record.status, AttendanceStatus::Absent);
        // The original mark time is kept.
        assert_eq!(second.record.date, morning);

        let (records, total) = store
            .list_attendance(AttendanceFilter::default())
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(records[0].status, AttendanceStatus::Absent);
    }

    #[tokio::test]
    async fn test_mark_attendance_next_day_creates() {
        let (store, _, student, room) = store_with_room().await;
        let day_one = Utc.with_ymd_and_hms(2024, 5, 6, 23, 30, 0).unwrap();
        let day_two = day_one + Duration::hours(1);

        for at in [day_one, day_two] {
            let marked = store
                .mark_attendance(AttendanceMark {
                    room_id: room.id,
                    student_id: student.id,
                    status: AttendanceStatus::Present,
                    at,
                })
                .await
                .unwrap();
            assert_eq!(marked.outcome, MarkOutcome::Created);
        }

        let (records, total) = store
            .list_attendance(AttendanceFilter {
                student_id: Some(student.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(total, 2);
        // Newest first.
        assert_eq!(records[0].date, day_two);
    }

    #[tokio::test]
    async fn test_mark_attendance_unknown_room() {
        let (store, _, student, _) = store_with_room().await;

        let err = store
            .mark_attendance(AttendanceMark::now(
                Uuid::new_v4(),
                student.id,
                AttendanceStatus::Present,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_concurrent_marks_keep_one_record() {
        let (store, _, student, room) = store_with_room().await;
        let (room_id, student_id) = (room.id, student.id);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                let status = if i % 2 == 0 {
                    AttendanceStatus::Present
                } else {
                    AttendanceStatus::Absent
                };
                tokio::spawn(async move {
                    store
                        .mark_attendance(AttendanceMark::now(room_id, student_id, status))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let (_, total) = store
            .list_attendance(AttendanceFilter {
                room_id: Some(room_id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_insert_record_rejects_occupied_day() {
        let (store, _, student, room) = store_with_room().await;
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();

        store
            .insert_attendance_record(AttendanceRecord::at(
                room.id,
                student.id,
                AttendanceStatus::Present,
                at,
            ))
            .await
            .unwrap();

        let err = store
            .insert_attendance_record(AttendanceRecord::at(
                room.id,
                student.id,
                AttendanceStatus::Absent,
                at + Duration::minutes(5),
            ))
            .await
            .unwrap_err();
        assert!(err.is_already_exists());
    }

    #[tokio::test]
    async fn test_list_attendance_by_day_and_pagination() {
        let (store, _, student, room) = store_with_room().await;
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();
        for i in 0..5 {
            store
                .insert_attendance_record(AttendanceRecord::at(
                    room.id,
                    student.id,
                    AttendanceStatus::Present,
                    start + Duration::days(i),
                ))
                .await
                .unwrap();
        }

        let (records, total) = store
            .list_attendance(AttendanceFilter {
                day: Some(start.date_naive()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(records[0].date, start);

        let (page, total) = store
            .list_attendance(AttendanceFilter {
                offset: Some(1),
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(total, 5);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].date, start + Duration::days(3));
    }
}
