//! Visibility state of one feedback question while it is being edited.
//!
//! The session owns the question's feedback path, its visibility policy and
//! the preset label shown to the instructor. Changing the feedback path
//! discards all visibility settings, since the eligible viewer roles differ
//! between paths.
//!
//! The label is only computed when the question is opened. Later flag edits
//! leave it alone; switching to custom is an explicit choice.

use crate::error::CoreError;
use crate::preset::{
    applicable_presets, match_preset, NamedPreset, PresetMatch, CUSTOM_PRESET_LABEL,
    VISIBILITY_PRESET_PLACEHOLDER,
};
use crate::role_flow::{is_common_path, resolve, FeedbackPaths, RoleFlow};
use crate::roles::{ParticipantType, ViewerRole};
use crate::visibility::{VisibilityConfiguration, VisibilityPolicy, VisibilityTarget};

/// Edit-time visibility state for a single question. Single owner.
#[derive(Debug, Clone)]
pub struct VisibilityEditSession {
    flow: RoleFlow,
    policy: VisibilityPolicy,
    catalog: Vec<NamedPreset>,
    offered: Vec<NamedPreset>,
    preset_name: Option<String>,
    is_custom: bool,
}

impl VisibilityEditSession {
    /// Load a question's stored visibility for editing and label it with the
    /// first matching preset offered for its feedback path.
    pub fn open(
        flow: RoleFlow,
        configuration: &VisibilityConfiguration,
        catalog: Vec<NamedPreset>,
    ) -> Self {
        let mut policy = VisibilityPolicy::for_feedback_path(flow.giver, flow.recipient);
        policy.apply_configuration(configuration);
        let offered = applicable_presets(&catalog, &policy);

        let mut session = Self {
            flow,
            policy,
            catalog,
            offered,
            preset_name: None,
            is_custom: false,
        };
        session.relabel();
        session
    }

    pub fn role_flow(&self) -> RoleFlow {
        self.flow
    }

    pub fn policy(&self) -> &VisibilityPolicy {
        &self.policy
    }

    /// Presets applicable to the current feedback path, in catalog order.
    pub fn offered_presets(&self) -> &[NamedPreset] {
        &self.offered
    }

    pub fn configuration(&self) -> VisibilityConfiguration {
        self.policy.configuration()
    }

    pub fn roles_allowed_for(&self, target: VisibilityTarget) -> Vec<ViewerRole> {
        self.policy.roles_allowed_for(target)
    }

    /// The recorded preset name, if the configuration matches one.
    pub fn preset_name(&self) -> Option<&str> {
        self.preset_name.as_deref()
    }

    /// Whether the configuration is a custom one rather than a preset.
    pub fn is_custom(&self) -> bool {
        self.is_custom
    }

    /// Text for the preset selector.
    pub fn preset_label(&self) -> &str {
        match (&self.preset_name, self.is_custom) {
            (Some(name), _) => name.as_str(),
            (None, true) => CUSTOM_PRESET_LABEL,
            (None, false) => VISIBILITY_PRESET_PLACEHOLDER,
        }
    }

    /// Whether the current feedback path is one of the common ones.
    pub fn uses_common_path(&self, common: &FeedbackPaths) -> bool {
        is_common_path(self.flow, common)
    }

    /// Change the feedback path, repairing the recipient if needed.
    ///
    /// When the resolved path differs from the current one, every allow set
    /// is emptied and the recorded preset is cleared.
    pub fn change_role_flow(
        &mut self,
        giver: ParticipantType,
        recipient: ParticipantType,
        allowed: &FeedbackPaths,
    ) -> Result<RoleFlow, CoreError> {
        let flow = resolve(giver, recipient, allowed)?;
        if flow != self.flow {
            tracing::debug!(from = %self.flow, to = %flow, "Feedback path changed, resetting visibility");
            self.flow = flow;
            self.policy = VisibilityPolicy::for_feedback_path(flow.giver, flow.recipient);
            self.offered = applicable_presets(&self.catalog, &self.policy);
            self.preset_name = None;
            self.is_custom = false;
        }
        Ok(flow)
    }

    /// Replace the visibility settings with an offered preset.
    pub fn apply_preset(&mut self, name: &str) -> Result<(), CoreError> {
        let preset = self
            .offered
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| CoreError::NotFound {
                entity: "visibility preset",
                key: name.to_string(),
            })?;
        self.policy.apply_configuration(&preset.configuration);
        self.preset_name = Some(preset.name.clone());
        self.is_custom = false;
        Ok(())
    }

    /// Switch to a custom configuration, keeping the current flags.
    pub fn use_custom(&mut self) {
        self.preset_name = None;
        self.is_custom = true;
    }

    /// Allow or disallow one role for one target. The preset label is not
    /// recomputed.
    pub fn set_visibility(&mut self, is_allowed: bool, role: ViewerRole, target: VisibilityTarget) {
        if is_allowed {
            self.policy.allow(target, role);
        } else {
            self.policy.disallow(target, role);
        }
    }

    fn relabel(&mut self) {
        match match_preset(&self.policy.configuration(), &self.offered) {
            PresetMatch::Named(name) => {
                self.preset_name = Some(name);
                self.is_custom = false;
            }
            PresetMatch::Custom => {
                self.preset_name = None;
                self.is_custom = true;
            }
        }
    }
}
