//! Core data model for roster.
//!
//! A roster is an ordered `Vec<Student>`; the student record is the only
//! entity the system knows about.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single student record.
///
/// No field is validated: ages may be negative and scores may fall outside
/// `[0, 100]`. Whether `id` is unique depends on the backend holding the
/// record (see [`crate::backend::IdUniqueness`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Student identifier, the lookup key for every store operation.
    pub id: String,
    /// Display name. May be empty or absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Free-form gender label, grouped verbatim by the statistics engine.
    pub gender: String,
    /// Age in years.
    pub age: i32,
    /// Numeric score.
    pub score: f64,
}

impl Student {
    /// Create a student with a present name.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        gender: impl Into<String>,
        age: i32,
        score: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            gender: gender.into(),
            age,
            score,
        }
    }

    /// Create a student whose name is absent.
    pub fn without_name(
        id: impl Into<String>,
        gender: impl Into<String>,
        age: i32,
        score: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            gender: gender.into(),
            age,
            score,
        }
    }

    /// Replace the name, returning the updated record.
    #[must_use]
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// The name, or `""` when absent.
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Overwrite every mutable field from `other`, keeping this record's id.
    pub fn apply_fields(&mut self, other: &Student) {
        self.name = other.name.clone();
        self.gender = other.gender.clone();
        self.age = other.age;
        self.score = other.score;
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match &self.name {
            Some(name) => format!("'{name}'"),
            None => "null".to_string(),
        };
        write!(
            f,
            "Student{{id='{}', name={}, gender='{}', age={}, score={:?}}}",
            self.id, name, self.gender, self.age, self.score
        )
    }
}
