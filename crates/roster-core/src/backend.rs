//! The persistence contract shared by every storage engine.
//!
//! Implemented by the bulk-file, SQLite and in-memory backends in
//! `roster-backends`, and consumed only by [`crate::store::RecordStore`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::Student;

/// Whether a backend enforces one record per id.
///
/// The two storage engines disagree on what `add` and `remove` mean when ids
/// repeat, so the difference is exposed as a capability instead of being
/// implied by the backend type:
///
/// | capability   | `upsert`                     | `remove_by_id`         | `find_by_id`  |
/// |--------------|------------------------------|------------------------|---------------|
/// | `Enforced`   | insert, or overwrite fields  | removes the one match  | unique match  |
/// | `Unenforced` | always appends               | removes *all* matches  | first match   |
///
/// Callers relying on "add = unique" must use an `Enforced` backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdUniqueness {
    Enforced,
    Unenforced,
}

impl fmt::Display for IdUniqueness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdUniqueness::Enforced => write!(f, "enforced"),
            IdUniqueness::Unenforced => write!(f, "unenforced"),
        }
    }
}

/// Storage engine behind a [`crate::store::RecordStore`].
///
/// Every method reports failures as `Err`; "not found" is never an error and
/// is signalled through `Ok(false)` / `Ok(None)` / an empty roster.
pub trait PersistenceBackend: Send + Sync {
    /// Human-readable backend name (e.g. "sqlite"), used in logs.
    fn name(&self) -> &str;

    /// Id-uniqueness capability of this backend.
    fn id_uniqueness(&self) -> IdUniqueness;

    /// Return the whole roster. A store with no data yet yields `Ok(vec![])`.
    fn load_all(&self) -> Result<Vec<Student>, StoreError>;

    /// Atomically replace the stored roster with `roster`.
    fn replace_all(&self, roster: &[Student]) -> Result<(), StoreError>;

    /// Add a record. See [`IdUniqueness`] for how an existing id is treated.
    fn upsert(&self, student: &Student) -> Result<bool, StoreError>;

    /// Remove by id, returning whether anything was removed.
    fn remove_by_id(&self, id: &str) -> Result<bool, StoreError>;

    /// Look up a record by id.
    fn find_by_id(&self, id: &str) -> Result<Option<Student>, StoreError>;
}

impl<B: PersistenceBackend + ?Sized> PersistenceBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn id_uniqueness(&self) -> IdUniqueness {
        (**self).id_uniqueness()
    }

    fn load_all(&self) -> Result<Vec<Student>, StoreError> {
        (**self).load_all()
    }

    fn replace_all(&self, roster: &[Student]) -> Result<(), StoreError> {
        (**self).replace_all(roster)
    }

    fn upsert(&self, student: &Student) -> Result<bool, StoreError> {
        (**self).upsert(student)
    }

    fn remove_by_id(&self, id: &str) -> Result<bool, StoreError> {
        (**self).remove_by_id(id)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Student>, StoreError> {
        (**self).find_by_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_uniqueness_display_and_serde() {
        assert_eq!(IdUniqueness::Enforced.to_string(), "enforced");
        assert_eq!(IdUniqueness::Unenforced.to_string(), "unenforced");

        let json = serde_json::to_string(&IdUniqueness::Unenforced).unwrap();
        assert_eq!(json, "\"unenforced\"");
    }
}
