//! Feedback path (giver → recipient) validation.
//!
//! A question's recipient type must be one of the recipients allowed for its
//! giver type. When the giver changes to one that does not allow the current
//! recipient, the recipient falls back to the first allowed one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::ParticipantType;

/// Allowed recipients per giver, in display order.
pub type FeedbackPaths = BTreeMap<ParticipantType, Vec<ParticipantType>>;

/// A validated (giver, recipient) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleFlow {
    pub giver: ParticipantType,
    pub recipient: ParticipantType,
}

impl RoleFlow {
    pub fn new(giver: ParticipantType, recipient: ParticipantType) -> Self {
        Self { giver, recipient }
    }
}

impl std::fmt::Display for RoleFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.giver, self.recipient)
    }
}

/// Validate `proposed_recipient` for `giver`, substituting the first allowed
/// recipient when it is not permitted.
///
/// A giver without a (non-empty) entry in `allowed` means the path table is
/// malformed; that is a configuration error, not a user error.
pub fn resolve(
    giver: ParticipantType,
    proposed_recipient: ParticipantType,
    allowed: &FeedbackPaths,
) -> Result<RoleFlow, CoreError> {
    let recipients = allowed.get(&giver).ok_or_else(|| {
        CoreError::Configuration(format!("No feedback paths defined for giver type {giver}"))
    })?;

    if recipients.contains(&proposed_recipient) {
        return Ok(RoleFlow::new(giver, proposed_recipient));
    }

    let fallback = recipients.first().copied().ok_or_else(|| {
        CoreError::Configuration(format!("Giver type {giver} has no allowed recipients"))
    })?;

    tracing::debug!(
        %giver,
        proposed = %proposed_recipient,
        substituted = %fallback,
        "Recipient type not allowed for giver, using first allowed recipient",
    );
    Ok(RoleFlow::new(giver, fallback))
}

/// Whether `flow` is one of the common feedback paths. Flows outside the
/// common set are presented as "other" paths by the editor.
pub fn is_common_path(flow: RoleFlow, common: &FeedbackPaths) -> bool {
    common
        .get(&flow.giver)
        .is_some_and(|recipients| recipients.contains(&flow.recipient))
}

/// Every feedback path a general question may use.
pub fn default_allowed_feedback_paths() -> FeedbackPaths {
    use ParticipantType::*;

    FeedbackPaths::from([
        (Myself, vec![None, Myself, Instructors, Students, Teams]),
        (
            Students,
            vec![
                None,
                Myself,
                Instructors,
                Students,
                Teams,
                OwnTeam,
                OwnTeamMembers,
                OwnTeamMembersIncludingSelf,
            ],
        ),
        (Instructors, vec![None, Myself, Instructors, Students, Teams]),
        (Teams, vec![None, Myself, Instructors, Students, Teams, OwnTeam]),
    ])
}

/// The feedback paths offered up front, before "other" paths.
pub fn default_common_feedback_paths() -> FeedbackPaths {
    use ParticipantType::*;

    FeedbackPaths::from([
        (Myself, vec![None, Myself, Instructors, Students, Teams]),
        (
            Students,
            vec![None, Myself, Instructors, Students, Teams, OwnTeamMembers],
        ),
        (Instructors, vec![None, Myself, Instructors, Students, Teams]),
        (Teams, vec![None, Instructors, Teams]),
    ])
}
