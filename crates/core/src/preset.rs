//! Named visibility presets and preset matching.
//!
//! Instructors usually pick one of a handful of common visibility options
//! instead of ticking every box. When a question is loaded for editing, its
//! current configuration is labelled with the first preset it matches, or
//! marked as custom.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::roles::ViewerRole;
use crate::visibility::{VisibilityConfiguration, VisibilityPolicy, VisibilityTarget};

/* --------------------------------------------------------------------------
   Constants
   -------------------------------------------------------------------------- */

/// Label shown while no preset is recorded for a question.
pub const VISIBILITY_PRESET_PLACEHOLDER: &str = "Please select a visibility option";

/// Label reported when the configuration matches no preset.
pub const CUSTOM_PRESET_LABEL: &str = "custom";

/* --------------------------------------------------------------------------
   Types
   -------------------------------------------------------------------------- */

/// A reusable, named bundle of visibility settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPreset {
    pub name: String,
    pub configuration: VisibilityConfiguration,
}

impl NamedPreset {
    pub fn new(name: impl Into<String>, configuration: VisibilityConfiguration) -> Self {
        Self {
            name: name.into(),
            configuration,
        }
    }
}

/// Outcome of matching a configuration against a preset catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetMatch {
    /// The first catalog preset with an identical configuration.
    Named(String),
    /// No preset matched; the caller must allow manual editing.
    Custom,
}

impl PresetMatch {
    pub fn label(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Custom => CUSTOM_PRESET_LABEL,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom)
    }
}

impl std::fmt::Display for PresetMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/* --------------------------------------------------------------------------
   Matching
   -------------------------------------------------------------------------- */

/// Unordered set equality: same distinct elements, order and duplicates
/// ignored.
pub fn is_same_set(a: &[ViewerRole], b: &[ViewerRole]) -> bool {
    let a: BTreeSet<_> = a.iter().collect();
    let b: BTreeSet<_> = b.iter().collect();
    a == b
}

fn is_same_configuration(a: &VisibilityConfiguration, b: &VisibilityConfiguration) -> bool {
    VisibilityTarget::ALL
        .iter()
        .all(|t| is_same_set(a.roles(*t), b.roles(*t)))
}

/// Find the first preset in `catalog` whose configuration equals `current`
/// target by target.
///
/// Catalog order decides ties: a later preset with the same configuration
/// as an earlier one is never reported.
pub fn match_preset(current: &VisibilityConfiguration, catalog: &[NamedPreset]) -> PresetMatch {
    match catalog
        .iter()
        .find(|preset| is_same_configuration(current, &preset.configuration))
    {
        Some(preset) => {
            tracing::debug!(preset = %preset.name, "Visibility configuration matches preset");
            PresetMatch::Named(preset.name.clone())
        }
        None => PresetMatch::Custom,
    }
}

/* --------------------------------------------------------------------------
   Catalog
   -------------------------------------------------------------------------- */

/// The common visibility options offered for general questions.
pub fn common_visibility_presets() -> Vec<NamedPreset> {
    use ViewerRole::*;

    vec![
        NamedPreset::new(
            "Shown anonymously to recipient and giver's team members, visible to instructors",
            VisibilityConfiguration::new(
                vec![Instructors, Recipient, GiverTeamMembers],
                vec![Instructors],
                vec![Instructors, Recipient],
            ),
        ),
        NamedPreset::new(
            "Visible to instructors only",
            VisibilityConfiguration::new(vec![Instructors], vec![Instructors], vec![Instructors]),
        ),
        NamedPreset::new(
            "Shown anonymously to recipient and instructors",
            VisibilityConfiguration::new(
                vec![Instructors, Recipient],
                vec![],
                vec![Instructors, Recipient],
            ),
        ),
        NamedPreset::new(
            "Shown anonymously to recipient, visible to instructors",
            VisibilityConfiguration::new(
                vec![Instructors, Recipient],
                vec![Instructors],
                vec![Instructors, Recipient],
            ),
        ),
        NamedPreset::new(
            "Shown anonymously to recipient and giver/recipient's team members, visible to instructors",
            VisibilityConfiguration::new(
                vec![Instructors, Recipient, GiverTeamMembers, RecipientTeamMembers],
                vec![Instructors],
                vec![Instructors, Recipient],
            ),
        ),
        NamedPreset::new(
            "Visible to recipient and instructors",
            VisibilityConfiguration::new(
                vec![Instructors, Recipient],
                vec![Instructors, Recipient],
                vec![Instructors, Recipient],
            ),
        ),
    ]
}

/// Keep only the presets whose every role is eligible under `policy`,
/// preserving catalog order.
pub fn applicable_presets(catalog: &[NamedPreset], policy: &VisibilityPolicy) -> Vec<NamedPreset> {
    catalog
        .iter()
        .filter(|preset| {
            preset
                .configuration
                .mentioned_roles()
                .iter()
                .all(|role| policy.is_eligible(*role))
        })
        .cloned()
        .collect()
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
