//! Built-in project policies.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::flags::FeatureFlag;
use crate::policy::{FlagGate, ProjectPolicy};
use crate::roles::ProjectRole;

pub const READ_PROJECT: ProjectPolicy = ProjectPolicy::new("project:read", ProjectRole::Reviewer);

pub const CREATE_PROJECT_VERSION: ProjectPolicy =
    ProjectPolicy::new("project:version:create", ProjectRole::Contributor);

pub const CREATE_PROJECT_COMMENT: ProjectPolicy =
    ProjectPolicy::new("project:comment:create", ProjectRole::Reviewer);

pub const UPDATE_PROJECT: ProjectPolicy = ProjectPolicy::new("project:update", ProjectRole::Owner);

pub const DELETE_PROJECT: ProjectPolicy = ProjectPolicy::new("project:delete", ProjectRole::Owner);

/// Owners invite; contributors may too while the invite flag is on.
pub const INVITE_PROJECT_MEMBER: ProjectPolicy =
    ProjectPolicy::new("project:member:invite", ProjectRole::Owner).gated(FlagGate {
        flag: FeatureFlag::ProjectContributorInvites,
        minimum_role_when_enabled: ProjectRole::Contributor,
    });

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyName {
    ReadProject,
    CreateProjectVersion,
    CreateProjectComment,
    UpdateProject,
    DeleteProject,
    InviteProjectMember,
}

impl PolicyName {
    pub const ALL: [PolicyName; 6] = [
        PolicyName::ReadProject,
        PolicyName::CreateProjectVersion,
        PolicyName::CreateProjectComment,
        PolicyName::UpdateProject,
        PolicyName::DeleteProject,
        PolicyName::InviteProjectMember,
    ];

    pub fn policy(self) -> ProjectPolicy {
        match self {
            PolicyName::ReadProject => READ_PROJECT,
            PolicyName::CreateProjectVersion => CREATE_PROJECT_VERSION,
            PolicyName::CreateProjectComment => CREATE_PROJECT_COMMENT,
            PolicyName::UpdateProject => UPDATE_PROJECT,
            PolicyName::DeleteProject => DELETE_PROJECT,
            PolicyName::InviteProjectMember => INVITE_PROJECT_MEMBER,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyName::ReadProject => "project:read",
            PolicyName::CreateProjectVersion => "project:version:create",
            PolicyName::CreateProjectComment => "project:comment:create",
            PolicyName::UpdateProject => "project:update",
            PolicyName::DeleteProject => "project:delete",
            PolicyName::InviteProjectMember => "project:member:invite",
        }
    }
}

impl From<PolicyName> for ProjectPolicy {
    fn from(value: PolicyName) -> Self {
        value.policy()
    }
}

impl core::fmt::Display for PolicyName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyName {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| EngineError::UnknownPolicy(s.to_string()))
    }
}
