//! Integration tests for the enrollment flow: pasted CSV → rows →
//! validation → reconciliation against the previous roster.

use feedback_core::config::EnrollmentConfig;
use feedback_core::enrollment::reconcile::{reconcile, EnrollmentOutcome, ENROLL_ERROR_HINT};
use feedback_core::enrollment::rows::{prepare_submission, rows_from_csv};
use feedback_core::enrollment::validation::validate_rows;
use feedback_core::enrollment::{JoinState, RosterEntry, RowRequest};

fn enrolled(row: &RowRequest, join_state: JoinState) -> RosterEntry {
    RosterEntry {
        join_state,
        ..RosterEntry::from_row(row)
    }
}

// ---------------------------------------------------------------------------
// Test: a pasted list is classified into every bucket
// ---------------------------------------------------------------------------

#[test]
fn pasted_list_is_classified_into_all_buckets() {
    let existing = vec![
        RosterEntry {
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            team: "Team A".to_string(),
            section: "Section 1".to_string(),
            comments: String::new(),
            join_state: JoinState::Joined,
        },
        RosterEntry {
            email: "bob@example.com".to_string(),
            name: "Bob".to_string(),
            team: "Team A".to_string(),
            section: "Section 1".to_string(),
            comments: String::new(),
            join_state: JoinState::Joined,
        },
        RosterEntry {
            email: "carol@example.com".to_string(),
            name: "Carol".to_string(),
            team: "Team B".to_string(),
            section: "Section 1".to_string(),
            comments: String::new(),
            join_state: JoinState::NotJoined,
        },
    ];

    let csv = "Section,Team,Name,Email,Comments\n\
               Section 1,Team A,Alice,alice@example.com,\n\
               Section 2,Team A,Bob,bob@example.com,moved\n\
               Section 1,Team C,\"Doe, Dan\",dan@example.com,\n\
               Section 1,Team C,Eve,eve-at-example,\n";
    let rows = prepare_submission(rows_from_csv(csv), &EnrollmentConfig::default())
        .expect("submission within limits");
    assert_eq!(rows.len(), 4);

    // The backend accepts everything except the malformed email.
    let violations = validate_rows(&rows);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].row_index, 3);
    assert_eq!(violations[0].field, "Email");

    let resulting: Vec<RosterEntry> = rows[..3]
        .iter()
        .map(|r| enrolled(r, JoinState::Joined))
        .collect();

    let report = reconcile(&existing, &resulting, &rows);

    assert_eq!(report.outcome_of("alice@example.com"), Some(EnrollmentOutcome::ModifiedUnchanged));
    assert_eq!(report.outcome_of("bob@example.com"), Some(EnrollmentOutcome::Modified));
    assert_eq!(report.outcome_of("dan@example.com"), Some(EnrollmentOutcome::New));
    assert_eq!(report.outcome_of("eve-at-example"), Some(EnrollmentOutcome::Error));
    assert_eq!(report.outcome_of("carol@example.com"), Some(EnrollmentOutcome::Unmodified));
    assert_eq!(report.len(), 5);

    assert_eq!(report.new[0].name, "Doe, Dan");
    assert!(report.has_errors());
    assert!(ENROLL_ERROR_HINT.contains("\"Team\", \"Name\", and \"Email\" must be filled"));
}

// ---------------------------------------------------------------------------
// Test: the report serializes with one list per outcome
// ---------------------------------------------------------------------------

#[test]
fn report_serializes_one_list_per_outcome() {
    let row = RowRequest {
        section: "S1".to_string(),
        team: "T1".to_string(),
        name: "Zoe".to_string(),
        email: "zoe@example.com".to_string(),
        comments: String::new(),
    };
    let report = reconcile(&[], &[], &[row]);

    let json = serde_json::to_value(&report).expect("serialization should succeed");
    assert_eq!(json["error"][0]["email"], "zoe@example.com");
    assert_eq!(json["error"][0]["join_state"], "NOT_JOINED");
    for key in ["new", "modified", "modified_unchanged", "unmodified"] {
        assert!(json[key].as_array().expect("bucket is an array").is_empty());
    }
}
