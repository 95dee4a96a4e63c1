//! Score statistics over a roster snapshot.
//!
//! Every function is pure and safe on an empty roster. Scores are not
//! range-checked, so out-of-range values fall into the nearest band.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Student;

/// Mean score, or `0.0` for an empty roster.
pub fn average(roster: &[Student]) -> f64 {
    if roster.is_empty() {
        return 0.0;
    }
    roster.iter().map(|s| s.score).sum::<f64>() / roster.len() as f64
}

/// Highest score, or `0.0` for an empty roster.
///
/// An empty roster and a roster whose best score is `0.0` are
/// indistinguishable here; check `roster.len()` when that matters.
pub fn max(roster: &[Student]) -> f64 {
    roster
        .iter()
        .map(|s| s.score)
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Lowest score, or `0.0` for an empty roster.
pub fn min(roster: &[Student]) -> f64 {
    roster
        .iter()
        .map(|s| s.score)
        .reduce(f64::min)
        .unwrap_or(0.0)
}

/// Fixed score bands, each lower bound inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Pass,
    Fail,
}

impl ScoreBand {
    /// All bands, best first.
    pub const ALL: [ScoreBand; 5] = [
        ScoreBand::Excellent,
        ScoreBand::Good,
        ScoreBand::Fair,
        ScoreBand::Pass,
        ScoreBand::Fail,
    ];

    /// Place a score in its band. A score of exactly 90.0 is excellent.
    pub fn classify(score: f64) -> Self {
        if score >= 90.0 {
            ScoreBand::Excellent
        } else if score >= 80.0 {
            ScoreBand::Good
        } else if score >= 70.0 {
            ScoreBand::Fair
        } else if score >= 60.0 {
            ScoreBand::Pass
        } else {
            ScoreBand::Fail
        }
    }

    /// Short label, e.g. "excellent".
    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::Pass => "pass",
            ScoreBand::Fail => "fail",
        }
    }

    /// Human-readable score range, e.g. "80-89".
    pub fn range_label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "90-100",
            ScoreBand::Good => "80-89",
            ScoreBand::Fair => "70-79",
            ScoreBand::Pass => "60-69",
            ScoreBand::Fail => "0-59",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Count of students per [`ScoreBand`]. All five bands are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub pass: usize,
    pub fail: usize,
}

impl ScoreDistribution {
    /// Count for a single band.
    pub fn get(&self, band: ScoreBand) -> usize {
        match band {
            ScoreBand::Excellent => self.excellent,
            ScoreBand::Good => self.good,
            ScoreBand::Fair => self.fair,
            ScoreBand::Pass => self.pass,
            ScoreBand::Fail => self.fail,
        }
    }

    fn slot(&mut self, band: ScoreBand) -> &mut usize {
        match band {
            ScoreBand::Excellent => &mut self.excellent,
            ScoreBand::Good => &mut self.good,
            ScoreBand::Fair => &mut self.fair,
            ScoreBand::Pass => &mut self.pass,
            ScoreBand::Fail => &mut self.fail,
        }
    }

    /// Iterate `(band, count)` pairs, best band first, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (ScoreBand, usize)> + '_ {
        ScoreBand::ALL.into_iter().map(move |band| (band, self.get(band)))
    }

    /// Number of students counted.
    pub fn total(&self) -> usize {
        self.excellent + self.good + self.fair + self.pass + self.fail
    }
}

/// Partition the roster into score bands.
pub fn distribution(roster: &[Student]) -> ScoreDistribution {
    let mut dist = ScoreDistribution::default();
    for student in roster {
        *dist.slot(ScoreBand::classify(student.score)) += 1;
    }
    dist
}

/// Count, average, max and min of a roster (or of one group within it).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub count: usize,
    pub average: f64,
    pub max: f64,
    pub min: f64,
}

/// Aggregate summary of the whole roster.
pub fn summary(roster: &[Student]) -> ScoreSummary {
    ScoreSummary {
        count: roster.len(),
        average: average(roster),
        max: max(roster),
        min: min(roster),
    }
}

/// Summaries grouped by the literal `gender` value.
///
/// No normalization is applied: `"男"` and `"男 "` are separate groups.
pub fn by_gender(roster: &[Student]) -> BTreeMap<String, ScoreSummary> {
    let mut groups: BTreeMap<&str, Vec<Student>> = BTreeMap::new();
    for student in roster {
        groups
            .entry(student.gender.as_str())
            .or_default()
            .push(student.clone());
    }

    groups
        .into_iter()
        .map(|(gender, members)| (gender.to_string(), summary(&members)))
        .collect()
}
