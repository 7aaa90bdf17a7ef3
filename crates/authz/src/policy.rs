//! Policy definition: the parameters that distinguish one project policy from
//! another. The evaluation order itself lives in the pipeline and is shared.

use std::borrow::Cow;

use serde::Serialize;

use crate::decision::AuthError;
use crate::flags::{FeatureFlag, FeatureFlags};
use crate::roles::{ProjectRole, RoleHierarchy};

/// Replaces the policy's minimum role while `flag` is enabled.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct FlagGate {
    pub flag: FeatureFlag,
    pub minimum_role_when_enabled: ProjectRole,
}

/// A project-scoped policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPolicy {
    pub name: Cow<'static, str>,
    pub minimum_role: ProjectRole,
    pub flag_gate: Option<FlagGate>,
}

impl ProjectPolicy {
    pub const fn new(name: &'static str, minimum_role: ProjectRole) -> Self {
        Self {
            name: Cow::Borrowed(name),
            minimum_role,
            flag_gate: None,
        }
    }

    pub const fn gated(mut self, gate: FlagGate) -> Self {
        self.flag_gate = Some(gate);
        self
    }

    /// Caller-defined policy with a runtime name.
    pub fn custom(name: impl Into<Cow<'static, str>>, minimum_role: ProjectRole) -> Self {
        Self {
            name: name.into(),
            minimum_role,
            flag_gate: None,
        }
    }

    pub fn requires_flags(&self) -> bool {
        self.flag_gate.is_some()
    }

    /// Minimum project role in force under `flags`.
    ///
    /// `flags` is `None` only when the policy has no gate (flags were not
    /// fetched).
    pub fn effective_minimum_role(&self, flags: Option<&FeatureFlags>) -> ProjectRole {
        match (self.flag_gate, flags) {
            (Some(gate), Some(flags)) if flags.is_enabled(gate.flag) => {
                gate.minimum_role_when_enabled
            }
            _ => self.minimum_role,
        }
    }
}

/// Threshold check on the resolved (explicit or implicit) project role.
pub fn check_project_role(role: Option<ProjectRole>, minimum: ProjectRole) -> Result<(), AuthError> {
    let Some(role) = role else {
        return Err(AuthError::ProjectNoAccess);
    };
    if !role.at_least(minimum) {
        return Err(AuthError::ProjectNotEnoughPermissions);
    }
    Ok(())
}
