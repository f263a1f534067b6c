//! Visibility policy for feedback questions.
//!
//! A question controls three things independently: who sees the response,
//! who sees the giver's name, and who sees the recipient's name. The policy
//! keeps one allow flag per `(VisibilityTarget, ViewerRole)` pair, restricted
//! to the viewer roles that are eligible for the question's feedback path.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::roles::{ParticipantType, ViewerRole};

/* --------------------------------------------------------------------------
   Targets
   -------------------------------------------------------------------------- */

/// What a visibility flag controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisibilityTarget {
    ShowResponse,
    ShowGiverName,
    ShowRecipientName,
}

impl VisibilityTarget {
    pub const ALL: [VisibilityTarget; 3] = [
        Self::ShowResponse,
        Self::ShowGiverName,
        Self::ShowRecipientName,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShowResponse => "SHOW_RESPONSE",
            Self::ShowGiverName => "SHOW_GIVER_NAME",
            Self::ShowRecipientName => "SHOW_RECIPIENT_NAME",
        }
    }
}

impl std::fmt::Display for VisibilityTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/* --------------------------------------------------------------------------
   Configuration snapshot
   -------------------------------------------------------------------------- */

/// Who may see each visibility target.
///
/// The lists are compared as sets everywhere; their order and any
/// duplicates carry no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityConfiguration {
    #[serde(default)]
    pub show_responses_to: Vec<ViewerRole>,
    #[serde(default)]
    pub show_giver_name_to: Vec<ViewerRole>,
    #[serde(default)]
    pub show_recipient_name_to: Vec<ViewerRole>,
}

impl VisibilityConfiguration {
    /// Build a configuration from three role lists.
    pub fn new(
        show_responses_to: Vec<ViewerRole>,
        show_giver_name_to: Vec<ViewerRole>,
        show_recipient_name_to: Vec<ViewerRole>,
    ) -> Self {
        Self {
            show_responses_to,
            show_giver_name_to,
            show_recipient_name_to,
        }
    }

    /// The roles listed for `target`.
    pub fn roles(&self, target: VisibilityTarget) -> &[ViewerRole] {
        match target {
            VisibilityTarget::ShowResponse => &self.show_responses_to,
            VisibilityTarget::ShowGiverName => &self.show_giver_name_to,
            VisibilityTarget::ShowRecipientName => &self.show_recipient_name_to,
        }
    }

    fn roles_mut(&mut self, target: VisibilityTarget) -> &mut Vec<ViewerRole> {
        match target {
            VisibilityTarget::ShowResponse => &mut self.show_responses_to,
            VisibilityTarget::ShowGiverName => &mut self.show_giver_name_to,
            VisibilityTarget::ShowRecipientName => &mut self.show_recipient_name_to,
        }
    }

    /// Every distinct role mentioned by any target.
    pub fn mentioned_roles(&self) -> BTreeSet<ViewerRole> {
        VisibilityTarget::ALL
            .iter()
            .flat_map(|t| self.roles(*t).iter().copied())
            .collect()
    }
}

/* --------------------------------------------------------------------------
   Policy
   -------------------------------------------------------------------------- */

/// Mutable allow-flag table for one question being edited.
///
/// Pairs that were never set are disallowed. Operations never fail; an
/// attempt to allow a role that is not eligible for the feedback path is
/// ignored.
#[derive(Debug, Clone)]
pub struct VisibilityPolicy {
    flags: BTreeMap<(VisibilityTarget, ViewerRole), bool>,
    eligible: BTreeSet<ViewerRole>,
}

impl Default for VisibilityPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilityPolicy {
    /// A policy with every viewer role eligible and nothing allowed.
    pub fn new() -> Self {
        Self {
            flags: BTreeMap::new(),
            eligible: ViewerRole::ALL.into_iter().collect(),
        }
    }

    /// A policy whose eligible roles are derived from a feedback path.
    pub fn for_feedback_path(giver: ParticipantType, recipient: ParticipantType) -> Self {
        Self {
            flags: BTreeMap::new(),
            eligible: ViewerRole::ALL
                .into_iter()
                .filter(|r| r.is_eligible_for(giver, recipient))
                .collect(),
        }
    }

    /// Viewer roles that may be granted visibility, in declaration order.
    pub fn eligible_roles(&self) -> Vec<ViewerRole> {
        self.eligible.iter().copied().collect()
    }

    pub fn is_eligible(&self, role: ViewerRole) -> bool {
        self.eligible.contains(&role)
    }

    /// Let `role` see `target`. Idempotent.
    pub fn allow(&mut self, target: VisibilityTarget, role: ViewerRole) {
        if !self.is_eligible(role) {
            tracing::debug!(%target, %role, "Ignoring allow for ineligible viewer role");
            return;
        }
        self.flags.insert((target, role), true);
    }

    /// Stop `role` from seeing `target`. Idempotent.
    pub fn disallow(&mut self, target: VisibilityTarget, role: ViewerRole) {
        self.flags.insert((target, role), false);
    }

    pub fn is_allowed(&self, target: VisibilityTarget, role: ViewerRole) -> bool {
        self.flags.get(&(target, role)).copied().unwrap_or(false)
    }

    /// Every role currently allowed to see `target`.
    ///
    /// Results reflect the table at call time; re-read after any mutation.
    pub fn roles_allowed_for(&self, target: VisibilityTarget) -> Vec<ViewerRole> {
        ViewerRole::ALL
            .into_iter()
            .filter(|r| self.is_allowed(target, *r))
            .collect()
    }

    /// Replace every flag with the contents of `config`.
    ///
    /// Roles that are not eligible for the feedback path are dropped.
    pub fn apply_configuration(&mut self, config: &VisibilityConfiguration) {
        let mut flags = BTreeMap::new();
        for target in VisibilityTarget::ALL {
            for role in config.roles(target) {
                if self.is_eligible(*role) {
                    flags.insert((target, *role), true);
                } else {
                    tracing::debug!(%target, %role, "Dropping ineligible viewer role from configuration");
                }
            }
        }
        self.flags = flags;
    }

    /// Disallow everything.
    pub fn reset(&mut self) {
        self.flags.clear();
    }

    /// Snapshot of the three allow lists.
    pub fn configuration(&self) -> VisibilityConfiguration {
        let mut config = VisibilityConfiguration::default();
        for target in VisibilityTarget::ALL {
            *config.roles_mut(target) = self.roles_allowed_for(target);
        }
        config
    }
}
