//! Delimited text interchange for rosters.
//!
//! The format is a header line `id,name,gender,age,score` followed by one
//! comma-joined record per line, with the score written to two decimals.
//! Fields are not quoted or escaped: a name containing a comma produces a
//! row the reader will skip.
//!
//! Two writer layouts exist. [`RecordLayout::OnePerLine`] is the format the
//! reader understands. [`RecordLayout::LegacySingleLine`] reproduces older
//! exports that separated records with the two characters `\n` instead of a
//! line break; the reader cannot recover records from such a file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InterchangeError;
use crate::model::Student;

/// Header line written before any record.
pub const HEADER: &str = "id,name,gender,age,score";

/// Number of comma-separated fields in a record line.
pub const FIELD_COUNT: usize = 5;

const LEGACY_SEPARATOR: &str = "\\n";

/// How records are laid out by the writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordLayout {
    /// One record per line, each terminated by a newline.
    #[default]
    OnePerLine,
    /// All records on the second line, each followed by a literal `\n`.
    LegacySingleLine,
}

/// What the reader does with an age or score it cannot parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericPolicy {
    /// Skip the row and count it, like a row with the wrong field count.
    #[default]
    Skip,
    /// Abort the import with [`InterchangeError::MalformedNumber`].
    Strict,
}

/// Records read from a file plus the rows that were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOutcome {
    /// Accepted records, in file order.
    pub students: Vec<Student>,
    /// Rows that did not split into exactly [`FIELD_COUNT`] fields.
    pub skipped_field_count: usize,
    /// Rows dropped because age or score did not parse.
    pub skipped_malformed_number: usize,
    /// Records the store accepted. [`parse_roster`] leaves this at 0; it is
    /// filled in by [`crate::store::RecordStore::import_from_text`].
    pub stored: usize,
}

impl ImportOutcome {
    /// Total rows skipped for any reason.
    pub fn skipped(&self) -> usize {
        self.skipped_field_count + self.skipped_malformed_number
    }
}

/// Render a single record without any terminator.
pub fn format_record(student: &Student) -> String {
    format!(
        "{},{},{},{},{:.2}",
        student.id,
        student.name_or_empty(),
        student.gender,
        student.age,
        student.score
    )
}

/// Render the header and all records in the requested layout.
pub fn render_roster(roster: &[Student], layout: RecordLayout) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + roster.len() * 32);
    out.push_str(HEADER);
    out.push('\n');

    for student in roster {
        out.push_str(&format_record(student));
        match layout {
            RecordLayout::OnePerLine => out.push('\n'),
            RecordLayout::LegacySingleLine => out.push_str(LEGACY_SEPARATOR),
        }
    }

    out
}

/// Write a roster to `path`, creating or truncating the file.
pub fn write_roster(
    path: &Path,
    roster: &[Student],
    layout: RecordLayout,
) -> Result<(), InterchangeError> {
    std::fs::write(path, render_roster(roster, layout)).map_err(|source| InterchangeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        records = roster.len(),
        ?layout,
        "exported roster"
    );
    Ok(())
}

/// Parse text produced by [`render_roster`] (or any compatible file).
///
/// The first line is always treated as a header and discarded.
pub fn parse_roster(
    content: &str,
    policy: NumericPolicy,
) -> Result<ImportOutcome, InterchangeError> {
    let mut outcome = ImportOutcome::default();

    // Line numbers are 1-based and count the header.
    for (index, line) in content.lines().enumerate().skip(1) {
        let line_no = index + 1;
        let fields: Vec<&str> = line.split(',').collect();
        let fields: [&str; FIELD_COUNT] = match fields.try_into() {
            Ok(fields) => fields,
            Err(fields) => {
                tracing::debug!(
                    line = line_no,
                    fields = fields.len(),
                    "skipping row with wrong field count"
                );
                outcome.skipped_field_count += 1;
                continue;
            }
        };

        match parse_record(fields, line_no) {
            Ok(student) => outcome.students.push(student),
            Err(err) => match policy {
                NumericPolicy::Strict => return Err(err),
                NumericPolicy::Skip => {
                    tracing::warn!("skipping row: {err}");
                    outcome.skipped_malformed_number += 1;
                }
            },
        }
    }

    Ok(outcome)
}

fn parse_record(fields: [&str; FIELD_COUNT], line: usize) -> Result<Student, InterchangeError> {
    let [id, name, gender, age, score] = fields;

    let age: i32 = age.parse().map_err(|_| InterchangeError::MalformedNumber {
        line,
        field: "age",
        value: age.to_string(),
    })?;
    let score: f64 = score.parse().map_err(|_| InterchangeError::MalformedNumber {
        line,
        field: "score",
        value: score.to_string(),
    })?;

    Ok(Student {
        id: id.to_string(),
        name: (!name.is_empty()).then(|| name.to_string()),
        gender: gender.to_string(),
        age,
        score,
    })
}

/// Read and parse a roster file.
pub fn read_roster(path: &Path, policy: NumericPolicy) -> Result<ImportOutcome, InterchangeError> {
    let content = std::fs::read_to_string(path).map_err(|source| InterchangeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let outcome = parse_roster(&content, policy)?;
    tracing::info!(
        path = %path.display(),
        imported = outcome.students.len(),
        skipped = outcome.skipped(),
        "imported roster"
    );
    Ok(outcome)
}
