//! Bulk student enrollment.
//!
//! Provides roster types, row parsing and validation for uploaded student
//! lists, and the reconciliation that classifies an enrollment result
//! against the roster it replaced. All pure logic; submitting rows and
//! fetching rosters belong to the caller.

pub mod reconcile;
pub mod rows;
pub mod validation;

use serde::{Deserialize, Serialize};

/// Whether a student has linked an account to their course enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinState {
    Joined,
    NotJoined,
}

impl JoinState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Joined => "JOINED",
            Self::NotJoined => "NOT_JOINED",
        }
    }
}

impl std::fmt::Display for JoinState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One student on a course roster. `email` identifies the student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub email: String,
    pub name: String,
    pub team: String,
    pub section: String,
    pub comments: String,
    pub join_state: JoinState,
}

impl RosterEntry {
    /// Whether both entries carry the same enrollment details.
    ///
    /// Join state is not part of the enrollment details.
    pub fn has_same_enrollment_information(&self, other: &RosterEntry) -> bool {
        self.email == other.email
            && self.name == other.name
            && self.team == other.team
            && self.section == other.section
            && self.comments == other.comments
    }

    /// The entry a submitted row would have produced, before anyone joined.
    pub fn from_row(row: &RowRequest) -> Self {
        Self {
            email: row.email.clone(),
            name: row.name.clone(),
            team: row.team.clone(),
            section: row.section.clone(),
            comments: row.comments.clone(),
            join_state: JoinState::NotJoined,
        }
    }
}

/// One student row submitted for enrollment. Absent cells are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRequest {
    pub section: String,
    pub team: String,
    pub name: String,
    pub email: String,
    pub comments: String,
}
