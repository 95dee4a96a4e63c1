//! The `roster stats` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use roster_core::report::RosterReport;

use super::open_store;

/// With `input`, a report saved by `--format json --output` is rendered
/// instead of computing one from the configured store.
pub fn execute(
    config_path: Option<&Path>,
    format: String,
    output: Option<PathBuf>,
    input: Option<PathBuf>,
) -> Result<()> {
    let report = match input {
        Some(path) => RosterReport::load_json(&path)?,
        None => RosterReport::from_roster(&open_store(config_path)?.get_all()),
    };

    match format.as_str() {
        "json" => match output {
            Some(path) => {
                report.save_json(&path)?;
                println!("Report saved to {}", path.display());
            }
            None => println!("{}", serde_json::to_string_pretty(&report)?),
        },
        "markdown" | "md" => {
            let md = report.to_markdown();
            match output {
                Some(path) => {
                    std::fs::write(&path, md)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{md}"),
            }
        }
        "text" => {
            if output.is_some() {
                anyhow::bail!("--output requires --format json or markdown");
            }
            print_text(&report);
        }
        other => anyhow::bail!("unknown format '{other}' (expected text, json or markdown)"),
    }

    Ok(())
}

fn print_text(report: &RosterReport) {
    let summary = &report.summary;
    println!(
        "Students: {}  Average: {:.2}  Max: {:.2}  Min: {:.2}",
        summary.count, summary.average, summary.max, summary.min
    );

    let mut bands = Table::new();
    bands.set_header(vec!["Band", "Range", "Students"]);
    for (band, count) in report.distribution.iter() {
        bands.add_row(vec![
            Cell::new(band),
            Cell::new(band.range_label()),
            Cell::new(count),
        ]);
    }
    println!("\n{bands}");

    if report.by_gender.is_empty() {
        return;
    }

    let mut genders = Table::new();
    genders.set_header(vec!["Gender", "Count", "Average", "Max", "Min"]);
    for (gender, s) in &report.by_gender {
        genders.add_row(vec![
            Cell::new(gender),
            Cell::new(s.count),
            Cell::new(format!("{:.2}", s.average)),
            Cell::new(format!("{:.2}", s.max)),
            Cell::new(format!("{:.2}", s.min)),
        ]);
    }
    println!("\n{genders}");
}
