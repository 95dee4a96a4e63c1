//! The `roster export` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use roster_core::interchange::RecordLayout;

use super::open_store;

pub fn execute(config_path: Option<&Path>, path: PathBuf, legacy: bool) -> Result<()> {
    let mut store = open_store(config_path)?;
    if legacy {
        store = store.with_export_layout(RecordLayout::LegacySingleLine);
    }

    if !store.export_to_text(&path) {
        anyhow::bail!("failed to export roster to {}", path.display());
    }
    println!("Exported {} student(s) to {}", store.count(), path.display());
    Ok(())
}
