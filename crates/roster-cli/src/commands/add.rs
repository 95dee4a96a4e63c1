//! The `roster add` command.

use std::path::Path;

use anyhow::Result;

use roster_core::{IdUniqueness, PersistenceBackend, Student};

use super::open_store;

pub fn execute(
    config_path: Option<&Path>,
    id: String,
    name: Option<String>,
    gender: String,
    age: i32,
    score: f64,
) -> Result<()> {
    let store = open_store(config_path)?;

    let existed = store.get_by_id(&id).is_some();
    let student = Student::without_name(id.clone(), gender, age, score).with_name(name);
    if !store.add(student) {
        anyhow::bail!("failed to add student {id}");
    }

    match (existed, store.backend().id_uniqueness()) {
        (true, IdUniqueness::Enforced) => println!("Updated student {id}"),
        (true, IdUniqueness::Unenforced) => {
            println!("Added student {id} (another record already uses this id)")
        }
        (false, _) => println!("Added student {id}"),
    }
    Ok(())
}
