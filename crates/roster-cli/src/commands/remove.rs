//! The `roster remove` command.

use std::path::Path;

use anyhow::Result;

use super::open_store;

pub fn execute(config_path: Option<&Path>, id: &str) -> Result<()> {
    let store = open_store(config_path)?;
    if !store.remove_by_id(id) {
        anyhow::bail!("student not found: {id}");
    }
    println!("Removed student {id}");
    Ok(())
}
