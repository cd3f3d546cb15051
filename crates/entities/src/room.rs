//! Room entity definitions.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of generated room codes.
pub const ROOM_CODE_LENGTH: usize = 6;

const ROOM_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Short token students type to join a room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Generates a random code of uppercase letters and digits.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let code = (0..ROOM_CODE_LENGTH)
            .map(|_| ROOM_CODE_CHARSET[rng.random_range(0..ROOM_CODE_CHARSET.len())] as char)
            .collect();
        Self(code)
    }

    /// Normalizes user input: surrounding whitespace is dropped and letters
    /// are uppercased.
    pub fn normalize(input: &str) -> Self {
        Self(input.trim().to_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the code has no characters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A room created by a teacher for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name, e.g. "Morning Algebra Class".
    pub name: String,
    /// Subject catalog id.
    pub subject_id: String,
    /// Owning teacher.
    pub teacher_id: Uuid,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
    /// Join code.
    pub room_code: RoomCode,
}

impl Room {
    /// Creates a new room with a freshly generated code.
    pub fn new(name: impl Into<String>, subject_id: impl Into<String>, teacher_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            subject_id: subject_id.into(),
            teacher_id,
            created_at: Utc::now(),
            room_code: RoomCode::generate(),
        }
    }

    /// Replaces the generated code.
    pub fn with_code(mut self, code: RoomCode) -> Self {
        self.room_code = code;
        self
    }

    /// Returns true if the given user owns this room.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.teacher_id == user_id
    }
}
