//! The `roster get` command.

use std::path::Path;

use anyhow::Result;

use super::open_store;

pub fn execute(config_path: Option<&Path>, id: &str) -> Result<()> {
    let store = open_store(config_path)?;
    match store.get_by_id(id) {
        Some(student) => {
            println!("{student}");
            Ok(())
        }
        None => anyhow::bail!("student not found: {id}"),
    }
}
