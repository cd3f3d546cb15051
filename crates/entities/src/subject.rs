//! Subject catalog.

use serde::{Deserialize, Serialize};

/// A subject a room can be created for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Catalog identifier, e.g. `sub1`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Course code, e.g. `MATH101`.
    pub code: String,
}

const CATALOG: &[(&str, &str, &str)] = &[
    ("sub1", "Mathematics", "MATH101"),
    ("sub2", "Science", "SCI101"),
    ("sub3", "History", "HIST101"),
    ("sub4", "English", "ENG101"),
    ("sub5", "Computer Science", "CS101"),
];

impl Subject {
    fn from_row(&(id, name, code): &(&str, &str, &str)) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            code: code.to_string(),
        }
    }

    /// Returns the full static catalog.
    pub fn catalog() -> Vec<Subject> {
        CATALOG.iter().map(Self::from_row).collect()
    }

    /// Finds a subject by id.
    pub fn find(id: &str) -> Option<Subject> {
        CATALOG
            .iter()
            .find(|(subject_id, _, _)| *subject_id == id)
            .map(Self::from_row)
    }

    /// Finds a subject by name, ignoring case.
    pub fn find_by_name(name: &str) -> Option<Subject> {
        let name = name.trim().to_lowercase();
        CATALOG
            .iter()
            .find(|(_, subject_name, _)| subject_name.to_lowercase() == name)
            .map(Self::from_row)
    }
}
