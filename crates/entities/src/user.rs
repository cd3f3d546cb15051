//! User-related entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Creates rooms and reviews attendance.
    Teacher,
    /// Joins rooms and marks attendance.
    Student,
}

impl UserRole {
    /// Returns the lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }

    /// Returns true for teachers.
    pub fn is_teacher(&self) -> bool {
        matches!(self, Self::Teacher)
    }

    /// Returns true for students.
    pub fn is_student(&self) -> bool {
        matches!(self, Self::Student)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A registered user. Users are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address, stored as entered (trimmed).
    pub email: String,
    /// Teacher or student.
    pub role: UserRole,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user.
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into().trim().to_string(),
            role,
            created_at: Utc::now(),
        }
    }

    /// Compares an email against this user's, ignoring case and surrounding
    /// whitespace.
    pub fn email_matches(&self, candidate: &str) -> bool {
        normalize_email(&self.email) == normalize_email(candidate)
    }
}

/// Lowercases and trims an email for comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Stored password hash for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Owning user.
    pub user_id: Uuid,
    /// Encoded password hash.
    pub password_hash: String,
}

impl Credential {
    /// Creates a credential for a user.
    pub fn new(user_id: Uuid, password_hash: impl Into<String>) -> Self {
        Self {
            user_id,
            password_hash: password_hash.into(),
        }
    }
}
