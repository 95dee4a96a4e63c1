//! The record store façade.
//!
//! [`RecordStore`] is the only entry point callers use. It forwards every
//! operation to its backend and absorbs backend failures: reads degrade to an
//! empty roster or `None`, writes degrade to `false`. Each degradation is
//! logged with `tracing::warn!`.

use std::path::Path;

use crate::backend::{IdUniqueness, PersistenceBackend};
use crate::error::{InterchangeError, StoreError};
use crate::interchange::{self, ImportOutcome, NumericPolicy, RecordLayout};
use crate::model::Student;

/// CRUD, bulk replacement and text interchange over a [`PersistenceBackend`].
///
/// The store holds no cache: every read goes to the backend.
pub struct RecordStore<B: PersistenceBackend> {
    backend: B,
    export_layout: RecordLayout,
    numeric_policy: NumericPolicy,
}

impl<B: PersistenceBackend> RecordStore<B> {
    /// Wrap a backend with the default export layout and numeric policy.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            export_layout: RecordLayout::default(),
            numeric_policy: NumericPolicy::default(),
        }
    }

    /// Use `layout` for [`Self::export_to_text`].
    #[must_use]
    pub fn with_export_layout(mut self, layout: RecordLayout) -> Self {
        self.export_layout = layout;
        self
    }

    /// Use `policy` for [`Self::import_from_text`].
    #[must_use]
    pub fn with_numeric_policy(mut self, policy: NumericPolicy) -> Self {
        self.numeric_policy = policy;
        self
    }

    /// Raw access to the backend and its `Result` API.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Add a record. Returns `false` if the backend failed.
    ///
    /// On an [`IdUniqueness::Unenforced`] backend an existing id is not
    /// replaced; the record is appended next to it.
    pub fn add(&self, student: Student) -> bool {
        self.degrade_write("add", self.backend.upsert(&student))
    }

    /// Remove by id. Returns `false` if nothing matched or the backend failed.
    pub fn remove_by_id(&self, id: &str) -> bool {
        self.degrade_write("remove", self.backend.remove_by_id(id))
    }

    /// Overwrite name, gender, age and score of the record with `id`.
    ///
    /// The id of `updated` is ignored. Returns `false` when no record has
    /// `id` or the backend failed.
    pub fn update(&self, id: &str, updated: Student) -> bool {
        match self.backend.id_uniqueness() {
            IdUniqueness::Enforced => {
                let Some(mut current) = self.get_by_id(id) else {
                    return false;
                };
                current.apply_fields(&updated);
                self.degrade_write("update", self.backend.upsert(&current))
            }
            IdUniqueness::Unenforced => {
                let mut roster = match self.backend.load_all() {
                    Ok(roster) => roster,
                    Err(err) => return self.degrade_write("update", Err(err)),
                };
                let Some(current) = roster.iter_mut().find(|s| s.id == id) else {
                    return false;
                };
                current.apply_fields(&updated);
                self.degrade_write("update", self.backend.replace_all(&roster).map(|()| true))
            }
        }
    }

    /// A fresh copy of the whole roster. Empty if the backend failed.
    pub fn get_all(&self) -> Vec<Student> {
        self.backend.load_all().unwrap_or_else(|err| {
            self.warn_degraded("load", &err);
            Vec::new()
        })
    }

    /// Look up a record by id. `None` if absent or the backend failed.
    pub fn get_by_id(&self, id: &str) -> Option<Student> {
        self.backend.find_by_id(id).unwrap_or_else(|err| {
            self.warn_degraded("find", &err);
            None
        })
    }

    /// Replace the whole roster. Returns `false` if the backend failed.
    pub fn replace_all(&self, roster: &[Student]) -> bool {
        self.degrade_write("replace", self.backend.replace_all(roster).map(|()| true))
    }

    /// Number of stored records (0 if the backend failed).
    pub fn count(&self) -> usize {
        self.get_all().len()
    }

    /// Write the roster to `path` in the configured layout.
    ///
    /// Returns `false` if the file could not be written.
    pub fn export_to_text(&self, path: &Path) -> bool {
        let roster = self.get_all();
        match interchange::write_roster(path, &roster, self.export_layout) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("export failed: {err}");
                false
            }
        }
    }

    /// Load records from a text file into the store.
    ///
    /// With `append == false` the store is cleared before the records are
    /// added. A missing or unreadable file is logged and yields an empty
    /// outcome without touching the store. Under [`NumericPolicy::Strict`] a
    /// malformed number is returned as an error, also before any change.
    ///
    /// [`ImportOutcome::stored`] counts the records the backend accepted and
    /// can be lower than `students.len()` when the backend fails.
    pub fn import_from_text(
        &self,
        path: &Path,
        append: bool,
    ) -> Result<ImportOutcome, InterchangeError> {
        let mut outcome = match interchange::read_roster(path, self.numeric_policy) {
            Ok(outcome) => outcome,
            Err(err) if err.is_recoverable() => {
                tracing::warn!("import skipped: {err}");
                return Ok(ImportOutcome::default());
            }
            Err(err) => return Err(err),
        };

        if !append && !self.replace_all(&[]) {
            tracing::warn!(
                path = %path.display(),
                "import aborted: roster could not be cleared"
            );
            return Ok(outcome);
        }
        for student in &outcome.students {
            if self.add(student.clone()) {
                outcome.stored += 1;
            }
        }
        if outcome.stored < outcome.students.len() {
            tracing::warn!(
                parsed = outcome.students.len(),
                stored = outcome.stored,
                "import incomplete"
            );
        }
        Ok(outcome)
    }

    fn degrade_write(&self, op: &str, result: Result<bool, StoreError>) -> bool {
        result.unwrap_or_else(|err| {
            self.warn_degraded(op, &err);
            false
        })
    }

    fn warn_degraded(&self, op: &str, err: &StoreError) {
        tracing::warn!(backend = self.backend.name(), op, "degraded: {err}");
    }
}
