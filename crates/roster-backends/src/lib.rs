//! Storage engines and configuration for roster.
//!
//! Implements `PersistenceBackend` for a whole-file JSON blob, a SQLite
//! table and an in-memory list, and builds the configured one from a
//! `roster.toml`.

pub mod bulk_file;
pub mod config;
pub mod memory;
pub mod sqlite;

pub use bulk_file::BulkFileBackend;
pub use config::{load_config, load_config_from, open_backend, BackendConfig, RosterConfig};
pub use memory::InMemoryBackend;
pub use sqlite::SqliteBackend;
