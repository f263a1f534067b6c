//! Participant and viewer role vocabularies.
//!
//! Feedback paths are expressed in [`ParticipantType`] (who gives, who
//! receives); visibility is expressed in [`ViewerRole`] (who may look).
//! String forms match the values exchanged with the backend.

use serde::{Deserialize, Serialize};

/* --------------------------------------------------------------------------
   Participant types (feedback path endpoints)
   -------------------------------------------------------------------------- */

/// A category of participant giving or receiving feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantType {
    /// The feedback session creator.
    #[serde(rename = "SELF")]
    Myself,
    Students,
    Instructors,
    Teams,
    OwnTeam,
    OwnTeamMembers,
    OwnTeamMembersIncludingSelf,
    /// General feedback with no specific recipient.
    None,
}

impl ParticipantType {
    /// Every participant type, in declaration order.
    pub const ALL: [ParticipantType; 8] = [
        Self::Myself,
        Self::Students,
        Self::Instructors,
        Self::Teams,
        Self::OwnTeam,
        Self::OwnTeamMembers,
        Self::OwnTeamMembersIncludingSelf,
        Self::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Myself => "SELF",
            Self::Students => "STUDENTS",
            Self::Instructors => "INSTRUCTORS",
            Self::Teams => "TEAMS",
            Self::OwnTeam => "OWN_TEAM",
            Self::OwnTeamMembers => "OWN_TEAM_MEMBERS",
            Self::OwnTeamMembersIncludingSelf => "OWN_TEAM_MEMBERS_INCLUDING_SELF",
            Self::None => "NONE",
        }
    }

    /// Parse a participant type string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for ParticipantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/* --------------------------------------------------------------------------
   Viewer roles (who may see a visibility target)
   -------------------------------------------------------------------------- */

/// A category of viewer that a visibility target can be shown to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewerRole {
    Recipient,
    GiverTeamMembers,
    RecipientTeamMembers,
    Students,
    Instructors,
}

impl ViewerRole {
    /// Every viewer role, in declaration order.
    pub const ALL: [ViewerRole; 5] = [
        Self::Recipient,
        Self::GiverTeamMembers,
        Self::RecipientTeamMembers,
        Self::Students,
        Self::Instructors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recipient => "RECIPIENT",
            Self::GiverTeamMembers => "GIVER_TEAM_MEMBERS",
            Self::RecipientTeamMembers => "RECIPIENT_TEAM_MEMBERS",
            Self::Students => "STUDENTS",
            Self::Instructors => "INSTRUCTORS",
        }
    }

    /// Parse a viewer role string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }

    /// Whether this viewer role can structurally see a question with the
    /// given feedback path at all.
    ///
    /// - `RECIPIENT` needs an actual recipient (not `SELF` or `NONE`).
    /// - `GIVER_TEAM_MEMBERS` needs a giver that belongs to a team.
    /// - `RECIPIENT_TEAM_MEMBERS` needs a recipient that belongs to a team.
    /// - `STUDENTS` and `INSTRUCTORS` can always be granted visibility.
    pub fn is_eligible_for(&self, giver: ParticipantType, recipient: ParticipantType) -> bool {
        match self {
            Self::Recipient => {
                !matches!(recipient, ParticipantType::Myself | ParticipantType::None)
            }
            Self::GiverTeamMembers => {
                matches!(giver, ParticipantType::Students | ParticipantType::Teams)
            }
            Self::RecipientTeamMembers => matches!(
                recipient,
                ParticipantType::Students
                    | ParticipantType::Teams
                    | ParticipantType::OwnTeamMembers
                    | ParticipantType::OwnTeamMembersIncludingSelf
            ),
            Self::Students | Self::Instructors => true,
        }
    }
}

impl std::fmt::Display for ViewerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
