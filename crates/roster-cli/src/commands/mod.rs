pub mod add;
pub mod export;
pub mod get;
pub mod import;
pub mod init;
pub mod list;
pub mod remove;
pub mod stats;
pub mod update;

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use roster_backends::config::{load_config_from, open_backend};
use roster_core::{PersistenceBackend, RecordStore, Student};

pub type Store = RecordStore<Box<dyn PersistenceBackend>>;

/// Load the configuration and open a store over the configured backend.
pub fn open_store(config_path: Option<&Path>) -> Result<Store> {
    let config = load_config_from(config_path)?;
    let backend = open_backend(&config)?;
    tracing::debug!(
        backend = backend.name(),
        path = %config.backend.path().display(),
        "opened roster"
    );
    let store = RecordStore::new(backend)
        .with_export_layout(config.export_layout)
        .with_numeric_policy(config.numeric_policy);
    Ok(store)
}

pub fn student_table(roster: &[Student]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Gender", "Age", "Score"]);

    for student in roster {
        table.add_row(vec![
            Cell::new(&student.id),
            Cell::new(student.name_or_empty()),
            Cell::new(&student.gender),
            Cell::new(student.age),
            Cell::new(format!("{:.2}", student.score)),
        ]);
    }

    table
}
