//! SQLite backend keyed by student id.
//!
//! Each operation opens its own connection with the configured busy timeout;
//! no connection is held between calls.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use roster_core::{IdUniqueness, PersistenceBackend, StoreError, Student};

/// Default time a connection waits on a locked database.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

const SELECT_COLUMNS: &str = "SELECT id, name, gender, age, score FROM students";

/// A [`PersistenceBackend`] over a `students` table with `id` as primary key.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    path: PathBuf,
    busy_timeout: Duration,
}

fn db_err(e: rusqlite::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

impl SqliteBackend {
    /// Open (creating if needed) the database at `path` and its schema.
    pub fn open(path: impl Into<PathBuf>, busy_timeout: Duration) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let backend = Self { path, busy_timeout };
        let conn = backend.connect()?;
        Self::init_schema(&conn)?;

        info!("SQLite roster initialized at: {:?}", backend.path);
        Ok(backend)
    }

    /// Open with [`DEFAULT_BUSY_TIMEOUT_MS`].
    pub fn open_default(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open(path, Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))
    }

    /// Get the database path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn init_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS students (
                id TEXT PRIMARY KEY,
                name TEXT,
                gender TEXT,
                age INTEGER,
                score REAL
            )
            "#,
            [],
        )
        .map_err(db_err)?;
        Ok(())
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.path).map_err(db_err)?;
        conn.busy_timeout(self.busy_timeout).map_err(db_err)?;
        Ok(conn)
    }

    fn row_to_student(row: &Row<'_>) -> rusqlite::Result<Student> {
        Ok(Student {
            id: row.get(0)?,
            name: row.get(1)?,
            gender: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            age: row.get::<_, Option<i32>>(3)?.unwrap_or_default(),
            score: row.get::<_, Option<f64>>(4)?.unwrap_or_default(),
        })
    }

    fn insert(conn: &Connection, student: &Student) -> rusqlite::Result<usize> {
        conn.execute(
            r#"
            INSERT INTO students (id, name, gender, age, score)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                gender = excluded.gender,
                age = excluded.age,
                score = excluded.score
            "#,
            params![
                student.id,
                student.name,
                student.gender,
                student.age,
                student.score
            ],
        )
    }
}

impl PersistenceBackend for SqliteBackend {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn id_uniqueness(&self) -> IdUniqueness {
        IdUniqueness::Enforced
    }

    fn load_all(&self) -> Result<Vec<Student>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], Self::row_to_student)
            .map_err(db_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
    }

    fn replace_all(&self, roster: &[Student]) -> Result<(), StoreError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction().map_err(db_err)?;
        tx.execute("DELETE FROM students", []).map_err(db_err)?;
        for student in roster {
            Self::insert(&tx, student).map_err(db_err)?;
        }
        tx.commit().map_err(db_err)
    }

    fn upsert(&self, student: &Student) -> Result<bool, StoreError> {
        let conn = self.connect()?;
        let changed = Self::insert(&conn, student).map_err(db_err)?;
        Ok(changed > 0)
    }

    fn remove_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.connect()?;
        let removed = conn
            .execute("DELETE FROM students WHERE id = ?1", params![id])
            .map_err(db_err)?;
        Ok(removed > 0)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Student>, StoreError> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            params![id],
            Self::row_to_student,
        )
        .optional()
        .map_err(db_err)
    }
}
