//! Field checks for enrollment rows, mirroring what the backend rejects.
//!
//! Running these before submission lets the caller point at the offending
//! cell instead of only reporting the row in the `ERROR` bucket.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::RowRequest;

/// Maximum length of a student name.
pub const STUDENT_NAME_MAX_LENGTH: usize = 100;

/// Maximum length of a section name.
pub const SECTION_NAME_MAX_LENGTH: usize = 60;

/// Maximum length of a team name.
pub const TEAM_NAME_MAX_LENGTH: usize = 60;

/// Maximum length of an email address.
pub const EMAIL_MAX_LENGTH: usize = 254;

/// Characters that may not appear in names.
const FORBIDDEN_NAME_CHARS: &[char] = &['|', '%'];

/// A name starts with a letter, or is wrapped in curly brackets.
static NAME_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(?:\p{L}.*|\{.*\})$").expect("valid regex"));

/// A single cell-level problem in a submitted row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowViolation {
    /// Zero-based index of the row in the submission.
    pub row_index: usize,
    /// Spreadsheet column name.
    pub field: String,
    pub message: String,
}

fn violation(row_index: usize, field: &str, message: String) -> RowViolation {
    RowViolation {
        row_index,
        field: field.to_string(),
        message,
    }
}

fn check_required(row_index: usize, field: &str, value: &str, out: &mut Vec<RowViolation>) -> bool {
    if value.trim().is_empty() {
        out.push(violation(
            row_index,
            field,
            format!("The field '{field}' should not be empty."),
        ));
        return false;
    }
    true
}

fn check_length(
    row_index: usize,
    field: &str,
    value: &str,
    max: usize,
    out: &mut Vec<RowViolation>,
) {
    if value.chars().count() > max {
        out.push(violation(
            row_index,
            field,
            format!("The field '{field}' should not exceed {max} characters."),
        ));
    }
}

fn check_name_format(row_index: usize, field: &str, value: &str, out: &mut Vec<RowViolation>) {
    if value.is_empty() {
        return;
    }
    if !NAME_START_RE.is_match(value) {
        out.push(violation(
            row_index,
            field,
            format!(
                "The field '{field}' should start with an alphabetical character, \
                 unless wrapped by curly brackets."
            ),
        ));
    }
    if value.contains(FORBIDDEN_NAME_CHARS) {
        out.push(violation(
            row_index,
            field,
            format!("The field '{field}' should not contain '|' or '%'."),
        ));
    }
}

/// Validate one row. Returns every violation found; empty means valid.
pub fn validate_row(row_index: usize, row: &RowRequest) -> Vec<RowViolation> {
    let mut out = Vec::new();

    check_length(row_index, "Section", &row.section, SECTION_NAME_MAX_LENGTH, &mut out);
    check_name_format(row_index, "Section", &row.section, &mut out);

    if check_required(row_index, "Team", &row.team, &mut out) {
        check_length(row_index, "Team", &row.team, TEAM_NAME_MAX_LENGTH, &mut out);
        check_name_format(row_index, "Team", &row.team, &mut out);
        if row.team.validate_email() {
            out.push(violation(
                row_index,
                "Team",
                "The field 'Team' should not have the same format as an email.".to_string(),
            ));
        }
    }

    if check_required(row_index, "Name", &row.name, &mut out) {
        check_length(row_index, "Name", &row.name, STUDENT_NAME_MAX_LENGTH, &mut out);
        check_name_format(row_index, "Name", &row.name, &mut out);
    }

    if check_required(row_index, "Email", &row.email, &mut out) {
        check_length(row_index, "Email", &row.email, EMAIL_MAX_LENGTH, &mut out);
        if !row.email.validate_email() {
            out.push(violation(
                row_index,
                "Email",
                format!("'{}' is not a valid email address.", row.email),
            ));
        }
    }

    check_name_format(row_index, "Comments", &row.comments, &mut out);

    out
}

/// Validate every row of a submission.
pub fn validate_rows(rows: &[RowRequest]) -> Vec<RowViolation> {
    rows.iter()
        .enumerate()
        .flat_map(|(i, row)| validate_row(i, row))
        .collect()
}
