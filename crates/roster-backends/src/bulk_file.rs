//! Whole-roster JSON file backend.
//!
//! The roster is stored as one JSON array and rewritten on every change.
//! Ids are not enforced unique: `upsert` appends, `remove_by_id` drops every
//! match and `find_by_id` returns the first one in file order.

use std::path::{Path, PathBuf};

use roster_core::{IdUniqueness, PersistenceBackend, StoreError, Student};

/// A [`PersistenceBackend`] over a single JSON file.
#[derive(Debug, Clone)]
pub struct BulkFileBackend {
    path: PathBuf,
}

impl BulkFileBackend {
    /// Use the file at `path`. Nothing is created until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write(&self, roster: &[Student]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(roster)?;
        let temp_path = self.temp_path();
        std::fs::write(&temp_path, json)?;
        if let Err(err) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(err.into());
        }
        Ok(())
    }
}

impl PersistenceBackend for BulkFileBackend {
    fn name(&self) -> &str {
        "bulk_file"
    }

    fn id_uniqueness(&self) -> IdUniqueness {
        IdUniqueness::Unenforced
    }

    fn load_all(&self) -> Result<Vec<Student>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn replace_all(&self, roster: &[Student]) -> Result<(), StoreError> {
        self.write(roster)
    }

    fn upsert(&self, student: &Student) -> Result<bool, StoreError> {
        let mut roster = self.load_all()?;
        roster.push(student.clone());
        self.write(&roster)?;
        Ok(true)
    }

    fn remove_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let mut roster = self.load_all()?;
        let before = roster.len();
        roster.retain(|s| s.id != id);
        if roster.len() == before {
            return Ok(false);
        }
        self.write(&roster)?;
        Ok(true)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Student>, StoreError> {
        Ok(self.load_all()?.into_iter().find(|s| s.id == id))
    }
}
