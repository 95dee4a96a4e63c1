//! The `roster update` command.

use std::path::Path;

use anyhow::Result;

use super::open_store;

/// Fields left as `None` keep their current value.
pub fn execute(
    config_path: Option<&Path>,
    id: &str,
    name: Option<String>,
    gender: Option<String>,
    age: Option<i32>,
    score: Option<f64>,
) -> Result<()> {
    let store = open_store(config_path)?;

    let Some(mut student) = store.get_by_id(id) else {
        anyhow::bail!("student not found: {id}");
    };
    if name.is_some() {
        student.name = name;
    }
    if let Some(gender) = gender {
        student.gender = gender;
    }
    if let Some(age) = age {
        student.age = age;
    }
    if let Some(score) = score {
        student.score = score;
    }

    if !store.update(id, student) {
        anyhow::bail!("failed to update student {id}");
    }
    println!("Updated student {id}");
    Ok(())
}
