//! The `roster import` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use roster_core::interchange::NumericPolicy;

use super::open_store;

pub fn execute(
    config_path: Option<&Path>,
    path: PathBuf,
    append: bool,
    strict: bool,
) -> Result<()> {
    let mut store = open_store(config_path)?;
    if strict {
        store = store.with_numeric_policy(NumericPolicy::Strict);
    }

    let outcome = store
        .import_from_text(&path, append)
        .with_context(|| format!("failed to import {}", path.display()))?;

    println!(
        "Imported {} student(s) from {}",
        outcome.stored,
        path.display()
    );
    if outcome.skipped() > 0 {
        println!(
            "Skipped {} row(s): {} with a wrong field count, {} with a malformed number",
            outcome.skipped(),
            outcome.skipped_field_count,
            outcome.skipped_malformed_number
        );
    }

    let lost = outcome.students.len() - outcome.stored;
    if lost > 0 {
        anyhow::bail!("{lost} parsed record(s) could not be stored");
    }
    Ok(())
}
