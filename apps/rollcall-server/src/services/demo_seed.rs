//! Demo users, rooms and attendance history.
//!
//! Seeding is skipped when the first demo teacher already exists, so calling
//! [`seed_demo_data`] more than once leaves the store unchanged.

use attendance_store::AttendanceStore;
use chrono::{Duration, Utc};
use entities::{AttendanceRecord, AttendanceStatus, Credential, Room, RoomCode, User, UserRole};
use rand::Rng;

use crate::error::ServerResult;

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "password123";

/// Days of history generated per student and room, counting today.
pub const HISTORY_DAYS: i64 = 10;

const TEACHERS: &[(&str, &str)] = &[
    ("John Smith", "teacher@example.com"),
    ("Jane Doe", "teacher2@example.com"),
];

/// Name, email and chance of being present on a given day.
const STUDENTS: &[(&str, &str, f64)] = &[
    ("Alex Johnson", "student@example.com", 0.8),
    ("Sam Wilson", "student2@example.com", 0.7),
];

/// Name, subject, code and index of the owning teacher.
const ROOMS: &[(&str, &str, &str, usize)] = &[
    ("Mathematics Class", "sub1", "MATH123", 0),
    ("Science Lab", "sub2", "SCI456", 0),
    ("History Seminar", "sub3", "HIST789", 1),
];

async fn create_account<S: AttendanceStore>(
    store: &S,
    name: &str,
    email: &str,
    role: UserRole,
    password_hash: &str,
) -> ServerResult<User> {
    let user = store.create_user(User::new(name, email, role)).await?;
    store
        .set_credential(Credential::new(user.id, password_hash))
        .await?;
    Ok(user)
}

/// Loads the demo data set into the store.
pub async fn seed_demo_data<S: AttendanceStore>(store: &S) -> ServerResult<()> {
    if store.get_user_by_email(TEACHERS[0].1).await?.is_some() {
        tracing::debug!("Demo data already present");
        return Ok(());
    }

    // Every demo account shares this hash.
    let password_hash = auth::hash_password(DEMO_PASSWORD)?;

    let mut teachers = Vec::with_capacity(TEACHERS.len());
    for (name, email) in TEACHERS {
        teachers.push(create_account(store, name, email, UserRole::Teacher, &password_hash).await?);
    }

    let mut students = Vec::with_capacity(STUDENTS.len());
    for (name, email, presence) in STUDENTS {
        let student =
            create_account(store, name, email, UserRole::Student, &password_hash).await?;
        students.push((student, *presence));
    }

    let mut rooms = Vec::with_capacity(ROOMS.len());
    for (name, subject_id, code, teacher) in ROOMS {
        let room = Room::new(*name, *subject_id, teachers[*teacher].id)
            .with_code(RoomCode::normalize(code));
        rooms.push(store.create_room(room).await?);
    }

    let today = Utc::now();
    let mut record_count = 0;
    for days_ago in 0..HISTORY_DAYS {
        let date = today - Duration::days(days_ago);
        for room in &rooms {
            for (student, presence) in &students {
                let status = if rand::rng().random_bool(*presence) {
                    AttendanceStatus::Present
                } else {
                    AttendanceStatus::Absent
                };
                store
                    .insert_attendance_record(AttendanceRecord::at(room.id, student.id, status, date))
                    .await?;
                record_count += 1;
            }
        }
    }

    tracing::info!(
        teachers = teachers.len(),
        students = students.len(),
        rooms = rooms.len(),
        records = record_count,
        "Seeded demo data"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use attendance_store::{AttendanceFilter, MemoryAttendanceStore, RoomFilter, UserFilter};

    use super::*;

    #[tokio::test]
    async fn test_seed_demo_data() {
        let store = MemoryAttendanceStore::new();
        seed_demo_data(&store).await.unwrap();

        let (users, total) = store.list_users(UserFilter::default()).await.unwrap();
        assert_eq!(total, 4);
        assert!(users.iter().any(|u| u.email == "student2@example.com"));

        let (rooms, _) = store.list_rooms(RoomFilter::default()).await.unwrap();
        assert_eq!(rooms.len(), 3);
        let math = store
            .get_room_by_code(&RoomCode::normalize("math123"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(math.name, "Mathematics Class");

        let (_, records) = store
            .list_attendance(AttendanceFilter::default())
            .await
            .unwrap();
        assert_eq!(records, (HISTORY_DAYS as u32) * 3 * 2);

        let (_, per_room) = store
            .list_attendance(AttendanceFilter {
                room_id: Some(math.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(per_room, (HISTORY_DAYS as u32) * 2);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = MemoryAttendanceStore::new();
        seed_demo_data(&store).await.unwrap();
        seed_demo_data(&store).await.unwrap();

        let (_, total) = store.list_users(UserFilter::default()).await.unwrap();
        assert_eq!(total, 4);
    }

    #[tokio::test]
    async fn test_demo_password_verifies() {
        let store = MemoryAttendanceStore::new();
        seed_demo_data(&store).await.unwrap();

        let teacher = store
            .get_user_by_email("TEACHER@example.com")
            .await
            .unwrap()
            .unwrap();
        let credential = store.get_credential(teacher.id).await.unwrap().unwrap();
        assert!(auth::verify_password(DEMO_PASSWORD, &credential.password_hash).unwrap());
    }
}
