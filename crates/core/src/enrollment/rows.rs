//! Turning pasted spreadsheet or CSV data into enrollment rows.

use crate::config::EnrollmentConfig;
use crate::csv::parse_table;
use crate::error::CoreError;

use super::RowRequest;

/// Column headers of the enrollment spreadsheet, in CSV column order.
pub const COLUMN_HEADERS: [&str; 5] = ["Section", "Team", "Name", "Email", "Comments"];

fn cell(row: &[Option<String>], index: Option<usize>) -> String {
    index
        .and_then(|i| row.get(i))
        .and_then(|c| c.as_deref())
        .map(|c| c.trim().to_string())
        .unwrap_or_default()
}

/// Convert spreadsheet cells into rows.
///
/// Columns are located by header name, so the sheet may reorder them.
/// Cells are trimmed. Rows whose cells are all absent or blank are
/// skipped; absent cells become empty strings.
pub fn rows_from_grid<S: AsRef<str>>(
    headers: &[S],
    grid: &[Vec<Option<String>>],
) -> Vec<RowRequest> {
    let column = |name: &str| headers.iter().position(|h| h.as_ref() == name);
    let [section, team, name, email, comments] = COLUMN_HEADERS.map(column);

    grid.iter()
        .filter(|row| {
            !row.iter()
                .all(|c| c.as_deref().map_or(true, |v| v.trim().is_empty()))
        })
        .map(|row| RowRequest {
            section: cell(row, section),
            team: cell(row, team),
            name: cell(row, name),
            email: cell(row, email),
            comments: cell(row, comments),
        })
        .collect()
}

/// Parse CSV text with columns in [`COLUMN_HEADERS`] order.
///
/// Blank lines are skipped and missing trailing columns are empty. A first
/// line equal to the header row is treated as a header and dropped.
pub fn rows_from_csv(text: &str) -> Vec<RowRequest> {
    let mut table = parse_table(text);

    let has_header = table.first().is_some_and(|first| {
        first
            .iter()
            .map(|f| f.trim())
            .eq(COLUMN_HEADERS.iter().copied())
    });
    if has_header {
        table.remove(0);
    }

    let grid: Vec<Vec<Option<String>>> = table
        .into_iter()
        .map(|fields| fields.into_iter().map(Some).collect())
        .collect();
    rows_from_grid(&COLUMN_HEADERS, &grid)
}

/// Check a submission against the configured limits before it is sent.
pub fn prepare_submission(
    rows: Vec<RowRequest>,
    config: &EnrollmentConfig,
) -> Result<Vec<RowRequest>, CoreError> {
    if rows.is_empty() {
        return Err(CoreError::Validation(
            "No students to enroll".to_string(),
        ));
    }
    if rows.len() > config.max_rows {
        return Err(CoreError::Validation(format!(
            "Too many students in one enrollment: {} rows (max {})",
            rows.len(),
            config.max_rows
        )));
    }
    Ok(rows)
}
