//! Read-only fact snapshots consumed by one decision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warden_core::{ProjectId, SsoProviderId, UserId, WorkspaceId};

/// A project as seen by the authorization layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    /// `None` means the project is not workspace-scoped and explicit project
    /// roles apply.
    pub workspace_id: Option<WorkspaceId>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub is_discoverable: bool,
}

impl Project {
    pub fn is_workspace_project(&self) -> bool {
        self.workspace_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: WorkspaceId,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Workspace SSO configuration. Its presence makes SSO mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsoProvider {
    pub provider_id: SsoProviderId,
}

/// A user's SSO session for one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsoSession {
    pub user_id: UserId,
    pub provider_id: SsoProviderId,
    pub valid_until: DateTime<Utc>,
}
