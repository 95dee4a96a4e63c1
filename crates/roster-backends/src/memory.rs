//! In-memory backend for tests and throwaway sessions.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::RwLock;

use roster_core::{IdUniqueness, PersistenceBackend, StoreError, Student};

/// A [`PersistenceBackend`] holding the roster in a `Vec`.
///
/// The id-uniqueness capability is chosen at construction so either
/// storage semantics can be exercised without touching disk. Outages can be
/// simulated with [`InMemoryBackend::set_unavailable`].
pub struct InMemoryBackend {
    rows: RwLock<Vec<Student>>,
    uniqueness: IdUniqueness,
    unavailable: AtomicBool,
    call_count: AtomicU32,
}

impl InMemoryBackend {
    /// Create an empty backend with the given capability.
    pub fn new(uniqueness: IdUniqueness) -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            uniqueness,
            unavailable: AtomicBool::new(false),
            call_count: AtomicU32::new(0),
        }
    }

    /// Create a backend pre-filled with `roster`.
    pub fn with_roster(uniqueness: IdUniqueness, roster: Vec<Student>) -> Self {
        let backend = Self::new(uniqueness);
        if let Ok(mut rows) = backend.rows.write() {
            *rows = roster;
        }
        backend
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    /// Number of backend calls made, including failed ones.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    fn enter(&self) -> Result<(), StoreError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("in-memory backend switched off".into()));
        }
        Ok(())
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new(IdUniqueness::Enforced)
    }
}

impl PersistenceBackend for InMemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    fn id_uniqueness(&self) -> IdUniqueness {
        self.uniqueness
    }

    fn load_all(&self) -> Result<Vec<Student>, StoreError> {
        self.enter()?;
        let rows = self.rows.read().map_err(|_| StoreError::LockPoisoned("load"))?;
        Ok(rows.clone())
    }

    fn replace_all(&self, roster: &[Student]) -> Result<(), StoreError> {
        self.enter()?;
        let mut rows = self.rows.write().map_err(|_| StoreError::LockPoisoned("replace"))?;
        *rows = roster.to_vec();
        Ok(())
    }

    fn upsert(&self, student: &Student) -> Result<bool, StoreError> {
        self.enter()?;
        let mut rows = self.rows.write().map_err(|_| StoreError::LockPoisoned("upsert"))?;
        let existing = match self.uniqueness {
            IdUniqueness::Enforced => rows.iter_mut().find(|s| s.id == student.id),
            IdUniqueness::Unenforced => None,
        };
        match existing {
            Some(existing) => existing.apply_fields(student),
            None => rows.push(student.clone()),
        }
        Ok(true)
    }

    fn remove_by_id(&self, id: &str) -> Result<bool, StoreError> {
        self.enter()?;
        let mut rows = self.rows.write().map_err(|_| StoreError::LockPoisoned("remove"))?;
        let before = rows.len();
        rows.retain(|s| s.id != id);
        Ok(rows.len() != before)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Student>, StoreError> {
        self.enter()?;
        let rows = self.rows.read().map_err(|_| StoreError::LockPoisoned("find"))?;
        Ok(rows.iter().find(|s| s.id == id).cloned())
    }
}
