//! The `roster init` command.

use std::path::Path;

use anyhow::Result;

use roster_backends::config::LOCAL_CONFIG_FILE;

pub fn execute() -> Result<()> {
    if Path::new(LOCAL_CONFIG_FILE).exists() {
        println!("{LOCAL_CONFIG_FILE} already exists, skipping.");
        return Ok(());
    }

    std::fs::write(LOCAL_CONFIG_FILE, SAMPLE_CONFIG)?;
    println!("Created {LOCAL_CONFIG_FILE}");

    println!("\nNext steps:");
    println!("  1. Pick a backend in {LOCAL_CONFIG_FILE}");
    println!("  2. Run: roster add --id 001 --name 张三 --gender 男 --age 20 --score 85.5");
    println!("  3. Run: roster stats");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# roster configuration

# Layout for `roster export`: "one_per_line" or "legacy_single_line".
export_layout = "one_per_line"

# Malformed age/score on `roster import`: "skip" or "strict".
numeric_policy = "skip"

[backend]
type = "bulk_file"
path = "./students.json"

# [backend]
# type = "sqlite"
# path = "${HOME}/.local/share/roster/students.db"
# busy_timeout_ms = 5000
"#;
