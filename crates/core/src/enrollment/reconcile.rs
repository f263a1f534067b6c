//! Classification of an enrollment result against the previous roster.
//!
//! Every existing, resulting, and rejected entry lands in exactly one
//! outcome bucket. Email is the only join key.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{RosterEntry, RowRequest};

/// Guidance shown alongside the report when any row failed to enroll.
pub const ENROLL_ERROR_HINT: &str = "You may check that: \
\"Section\" and \"Comment\" are optional while \"Team\", \"Name\", and \"Email\" must be filled. \
\"Section\", \"Team\", \"Name\", and \"Comment\" should start with an alphabetical character, \
unless wrapped by curly brackets \"{}\", and should not contain vertical bar \"|\" and percentage sign \"%\". \
\"Email\" should contain some text followed by one '@' sign followed by some more text. \
\"Team\" should not have same format of email to avoid mis-interpretation.";

/// What happened to a student in an enrollment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentOutcome {
    /// Enrolled for the first time.
    New,
    /// Already enrolled; details changed.
    Modified,
    /// Already enrolled and resubmitted with identical details.
    ModifiedUnchanged,
    /// Submitted but rejected.
    Error,
    /// Already enrolled and not part of this submission.
    Unmodified,
}

impl EnrollmentOutcome {
    /// Every outcome, in report order.
    pub const ALL: [EnrollmentOutcome; 5] = [
        Self::New,
        Self::Modified,
        Self::ModifiedUnchanged,
        Self::Error,
        Self::Unmodified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Modified => "MODIFIED",
            Self::ModifiedUnchanged => "MODIFIED_UNCHANGED",
            Self::Error => "ERROR",
            Self::Unmodified => "UNMODIFIED",
        }
    }

    /// Panel heading for `count` students with this outcome.
    pub fn summary(&self, count: usize) -> String {
        match self {
            Self::New => format!("{count} student(s) added:"),
            Self::Modified => format!("{count} student(s) modified:"),
            Self::ModifiedUnchanged => format!("{count} student(s) updated with no changes:"),
            Self::Error => format!("{count} student(s) failed to be enrolled:"),
            Self::Unmodified => format!("{count} student(s) remain unmodified:"),
        }
    }
}

impl std::fmt::Display for EnrollmentOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outcome bucket with its heading, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentPanel<'a> {
    pub outcome: EnrollmentOutcome,
    pub message: String,
    pub students: &'a [RosterEntry],
}

/// Reconciliation result: one list per outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentReport {
    pub new: Vec<RosterEntry>,
    pub modified: Vec<RosterEntry>,
    pub modified_unchanged: Vec<RosterEntry>,
    pub error: Vec<RosterEntry>,
    pub unmodified: Vec<RosterEntry>,
}

impl EnrollmentReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to the bucket for `outcome`.
    pub fn push(&mut self, outcome: EnrollmentOutcome, entry: RosterEntry) {
        match outcome {
            EnrollmentOutcome::New => self.new.push(entry),
            EnrollmentOutcome::Modified => self.modified.push(entry),
            EnrollmentOutcome::ModifiedUnchanged => self.modified_unchanged.push(entry),
            EnrollmentOutcome::Error => self.error.push(entry),
            EnrollmentOutcome::Unmodified => self.unmodified.push(entry),
        }
    }

    pub fn bucket(&self, outcome: EnrollmentOutcome) -> &[RosterEntry] {
        match outcome {
            EnrollmentOutcome::New => &self.new,
            EnrollmentOutcome::Modified => &self.modified,
            EnrollmentOutcome::ModifiedUnchanged => &self.modified_unchanged,
            EnrollmentOutcome::Error => &self.error,
            EnrollmentOutcome::Unmodified => &self.unmodified,
        }
    }

    /// Outcome of the first entry with `email`, if any.
    pub fn outcome_of(&self, email: &str) -> Option<EnrollmentOutcome> {
        EnrollmentOutcome::ALL
            .into_iter()
            .find(|o| self.bucket(*o).iter().any(|e| e.email == email))
    }

    /// Total number of classified entries.
    pub fn len(&self) -> usize {
        EnrollmentOutcome::ALL
            .iter()
            .map(|o| self.bucket(*o).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_errors(&self) -> bool {
        !self.error.is_empty()
    }

    /// All five buckets in report order, including empty ones.
    pub fn panels(&self) -> Vec<EnrollmentPanel<'_>> {
        EnrollmentOutcome::ALL
            .into_iter()
            .map(|outcome| {
                let students = self.bucket(outcome);
                EnrollmentPanel {
                    outcome,
                    message: outcome.summary(students.len()),
                    students,
                }
            })
            .collect()
    }
}

/// Classify an enrollment run.
///
/// 1. Existing entries absent from `resulting` are `UNMODIFIED`.
/// 2. Resulting entries identical to an existing entry are
///    `MODIFIED_UNCHANGED`; sharing only the email, `MODIFIED`; otherwise
///    `NEW`.
/// 3. Submitted rows absent from `resulting` were rejected and become
///    not-joined `ERROR` entries.
///
/// Bucket order follows the source sequence. Duplicate emails are tolerated;
/// the first match in iteration order wins.
pub fn reconcile(
    existing: &[RosterEntry],
    resulting: &[RosterEntry],
    submitted: &[RowRequest],
) -> EnrollmentReport {
    warn_on_duplicate_emails("existing", existing);
    warn_on_duplicate_emails("resulting", resulting);

    let mut report = EnrollmentReport::new();

    for existing_entry in existing {
        if !resulting.iter().any(|e| e.email == existing_entry.email) {
            report.push(EnrollmentOutcome::Unmodified, existing_entry.clone());
        }
    }

    for resulting_entry in resulting {
        let outcome = if existing
            .iter()
            .any(|e| e.has_same_enrollment_information(resulting_entry))
        {
            EnrollmentOutcome::ModifiedUnchanged
        } else if existing.iter().any(|e| e.email == resulting_entry.email) {
            EnrollmentOutcome::Modified
        } else {
            EnrollmentOutcome::New
        };
        report.push(outcome, resulting_entry.clone());
    }

    for row in submitted {
        if !resulting.iter().any(|e| e.email == row.email) {
            report.push(EnrollmentOutcome::Error, RosterEntry::from_row(row));
        }
    }

    tracing::info!(
        new = report.new.len(),
        modified = report.modified.len(),
        modified_unchanged = report.modified_unchanged.len(),
        error = report.error.len(),
        unmodified = report.unmodified.len(),
        "Enrollment reconciled",
    );

    report
}

fn warn_on_duplicate_emails(roster: &'static str, entries: &[RosterEntry]) {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.email.as_str()) {
            tracing::warn!(roster, email = %entry.email, "Duplicate email in roster, first entry wins");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrollment::JoinState;

    fn student(email: &str, name: &str) -> RosterEntry {
        RosterEntry {
            email: email.to_string(),
            name: name.to_string(),
            team: "Team A".to_string(),
            section: "Section 1".to_string(),
            comments: String::new(),
            join_state: JoinState::Joined,
        }
    }

    fn row(email: &str, name: &str) -> RowRequest {
        RowRequest {
            section: "Section 1".to_string(),
            team: "Team A".to_string(),
            name: name.to_string(),
            email: email.to_string(),
            comments: String::new(),
        }
    }

    #[test]
    fn identical_resubmission_is_modified_unchanged_only() {
        let existing = vec![student("a@example.com", "Alice")];
        let resulting = existing.clone();
        let report = reconcile(&existing, &resulting, &[row("a@example.com", "Alice")]);

        assert_eq!(report.modified_unchanged, existing);
        assert_eq!(report.len(), 1);
        assert_eq!(
            report.outcome_of("a@example.com"),
            Some(EnrollmentOutcome::ModifiedUnchanged)
        );
    }

    #[test]
    fn changed_details_are_modified() {
        let existing = vec![student("a@example.com", "Alice")];
        let resulting = vec![student("a@example.com", "Alicia")];
        let report = reconcile(&existing, &resulting, &[]);

        assert_eq!(report.modified, resulting);
        assert!(report.unmodified.is_empty());
        assert!(report.modified_unchanged.is_empty());
    }

    #[test]
    fn join_state_change_alone_is_unchanged() {
        let existing = vec![student("a@example.com", "Alice")];
        let mut resulting = existing.clone();
        resulting[0].join_state = JoinState::NotJoined;
        let report = reconcile(&existing, &resulting, &[]);
        assert_eq!(report.modified_unchanged.len(), 1);
    }

    #[test]
    fn unknown_email_is_new() {
        let resulting = vec![student("b@example.com", "Bob")];
        let report = reconcile(&[], &resulting, &[]);
        assert_eq!(report.new, resulting);
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn untouched_existing_students_are_unmodified() {
        let existing = vec![
            student("a@example.com", "Alice"),
            student("c@example.com", "Carol"),
        ];
        let resulting = vec![student("a@example.com", "Alice")];
        let report = reconcile(&existing, &resulting, &[]);
        assert_eq!(report.unmodified, vec![existing[1].clone()]);
    }

    #[test]
    fn rejected_rows_become_not_joined_errors() {
        let submitted = vec![row("ok@example.com", "Ok"), row("bad", "Bad")];
        let resulting = vec![student("ok@example.com", "Ok")];
        let report = reconcile(&[], &resulting, &submitted);

        assert_eq!(report.error.len(), 1);
        assert_eq!(report.error[0].email, "bad");
        assert_eq!(report.error[0].name, "Bad");
        assert_eq!(report.error[0].join_state, JoinState::NotJoined);
        assert!(report.has_errors());
    }

    #[test]
    fn bucket_order_follows_source_order() {
        let resulting = vec![
            student("z@example.com", "Zed"),
            student("m@example.com", "Mo"),
            student("a@example.com", "Al"),
        ];
        let report = reconcile(&[], &resulting, &[]);
        let emails: Vec<_> = report.new.iter().map(|e| e.email.as_str()).collect();
        assert_eq!(emails, vec!["z@example.com", "m@example.com", "a@example.com"]);
    }

    #[test]
    fn duplicate_emails_do_not_panic() {
        let existing = vec![
            student("a@example.com", "Alice"),
            student("a@example.com", "Alice Two"),
        ];
        let resulting = vec![student("a@example.com", "Alice Two")];
        let report = reconcile(&existing, &resulting, &[]);
        // Matches the second existing entry's details exactly.
        assert_eq!(report.modified_unchanged.len(), 1);
        assert!(report.unmodified.is_empty());
    }

    #[test]
    fn duplicate_resulting_email_and_rejections_keep_source_order() {
        let existing = vec![
            student("c@example.com", "Carol"),
            student("a@example.com", "Alice"),
            student("d@example.com", "Dan"),
        ];
        let resulting = vec![
            student("b@example.com", "Bob"),
            student("a@example.com", "Alicia"),
            student("b@example.com", "Bobby"),
        ];
        let submitted = vec![
            row("x-bad", "Xavier"),
            row("b@example.com", "Bob"),
            row("y-bad", "Yann"),
            row("a@example.com", "Alicia"),
            row("z-bad", "Zoe"),
        ];
        let report = reconcile(&existing, &resulting, &submitted);

        let names = |outcome| -> Vec<String> {
            report.bucket(outcome).iter().map(|e| e.name.clone()).collect()
        };
        assert_eq!(names(EnrollmentOutcome::New), vec!["Bob", "Bobby"]);
        assert_eq!(names(EnrollmentOutcome::Modified), vec!["Alicia"]);
        assert!(names(EnrollmentOutcome::ModifiedUnchanged).is_empty());
        assert_eq!(names(EnrollmentOutcome::Error), vec!["Xavier", "Yann", "Zoe"]);
        assert_eq!(names(EnrollmentOutcome::Unmodified), vec!["Carol", "Dan"]);
        assert_eq!(report.len(), 8);
        assert!(report
            .error
            .iter()
            .all(|e| e.join_state == JoinState::NotJoined));
    }

    #[test]
    fn panels_cover_every_outcome_in_order() {
        let existing = vec![student("a@example.com", "Alice")];
        let resulting = vec![
            student("a@example.com", "Alicia"),
            student("b@example.com", "Bob"),
        ];
        let report = reconcile(&existing, &resulting, &[row("x", "X")]);
        let panels = report.panels();

        let outcomes: Vec<_> = panels.iter().map(|p| p.outcome).collect();
        assert_eq!(outcomes, EnrollmentOutcome::ALL.to_vec());
        assert_eq!(panels[0].message, "1 student(s) added:");
        assert_eq!(panels[1].message, "1 student(s) modified:");
        assert_eq!(panels[2].message, "0 student(s) updated with no changes:");
        assert_eq!(panels[3].message, "1 student(s) failed to be enrolled:");
        assert_eq!(panels[4].message, "0 student(s) remain unmodified:");
    }

    #[test]
    fn outcome_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&EnrollmentOutcome::ModifiedUnchanged).unwrap();
        assert_eq!(json, "\"MODIFIED_UNCHANGED\"");
    }
}
