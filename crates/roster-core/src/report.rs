//! Statistics report with JSON persistence and markdown rendering.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Student;
use crate::statistics::{self, ScoreDistribution, ScoreSummary};

/// A point-in-time statistics snapshot of a roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of records the report was computed from.
    pub record_count: usize,
    /// Whole-roster summary.
    pub summary: ScoreSummary,
    /// Students per score band.
    pub distribution: ScoreDistribution,
    /// Summaries keyed by the literal gender value.
    pub by_gender: BTreeMap<String, ScoreSummary>,
}

impl RosterReport {
    /// Compute a report over `roster`.
    pub fn from_roster(roster: &[Student]) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            record_count: roster.len(),
            summary: statistics::summary(roster),
            distribution: statistics::distribution(roster),
            by_gender: statistics::by_gender(roster),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: RosterReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Roster Statistics\n\n");
        md.push_str(&format!(
            "Generated {} ({} records)\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.record_count
        ));

        md.push_str("## Summary\n\n");
        md.push_str("| Count | Average | Max | Min |\n");
        md.push_str("|-------|---------|-----|-----|\n");
        md.push_str(&summary_row(None, &self.summary));
        md.push('\n');

        md.push_str("## Distribution\n\n");
        md.push_str("| Band | Range | Students |\n");
        md.push_str("|------|-------|----------|\n");
        for (band, count) in self.distribution.iter() {
            md.push_str(&format!("| {} | {} | {} |\n", band, band.range_label(), count));
        }

        if !self.by_gender.is_empty() {
            md.push_str("\n## By Gender\n\n");
            md.push_str("| Gender | Count | Average | Max | Min |\n");
            md.push_str("|--------|-------|---------|-----|-----|\n");
            for (gender, summary) in &self.by_gender {
                md.push_str(&summary_row(Some(gender.as_str()), summary));
            }
        }

        md
    }
}

fn summary_row(label: Option<&str>, s: &ScoreSummary) -> String {
    let cells = format!("{} | {:.2} | {:.2} | {:.2}", s.count, s.average, s.max, s.min);
    match label {
        Some(label) => format!("| {label} | {cells} |\n"),
        None => format!("| {cells} |\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Student> {
        vec![
            Student::new("001", "张三", "男", 20, 85.5),
            Student::new("002", "李四", "女", 21, 92.0),
            Student::new("003", "王五", "男", 22, 78.5),
        ]
    }

    #[test]
    fn from_roster_aggregates() {
        let report = RosterReport::from_roster(&roster());
        assert_eq!(report.record_count, 3);
        assert_eq!(report.summary.count, 3);
        assert_eq!(report.summary.max, 92.0);
        assert_eq!(report.distribution.total(), 3);
        assert_eq!(report.by_gender["男"].count, 2);
    }

    #[test]
    fn json_roundtrip() {
        let report = RosterReport::from_roster(&roster());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/stats.json");

        report.save_json(&path).unwrap();
        let loaded = RosterReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.summary, report.summary);
        assert_eq!(loaded.by_gender.len(), 2);
    }

    #[test]
    fn load_json_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RosterReport::load_json(&dir.path().join("absent.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read report"));
    }

    #[test]
    fn markdown_output() {
        let md = RosterReport::from_roster(&roster()).to_markdown();
        assert!(md.contains("## Distribution"));
        assert!(md.contains("| excellent | 90-100 | 1 |"));
        assert!(md.contains("| 男 | 2 | 82.00 | 85.50 | 78.50 |"));
    }

    #[test]
    fn markdown_for_empty_roster_omits_gender_table() {
        let md = RosterReport::from_roster(&[]).to_markdown();
        assert!(md.contains("| 0 | 0.00 | 0.00 | 0.00 |"));
        assert!(!md.contains("By Gender"));
    }
}
