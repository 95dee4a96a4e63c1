//! The `roster list` command.

use std::path::Path;

use anyhow::Result;

use super::{open_store, student_table};

pub fn execute(config_path: Option<&Path>) -> Result<()> {
    let store = open_store(config_path)?;
    let roster = store.get_all();

    if roster.is_empty() {
        println!("No students.");
        return Ok(());
    }

    println!("{}", student_table(&roster));
    println!("{} student(s)", roster.len());
    Ok(())
}
