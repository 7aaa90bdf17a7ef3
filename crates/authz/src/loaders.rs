//! Fact providers.
//!
//! The engine never reaches into storage: every fact comes through an
//! [`AuthzLoaders`] implementation supplied by the caller. Absence is data
//! (`Ok(None)`); `Err` is reserved for infrastructure failures.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use warden_core::{ProjectId, ProviderError, UserId, WorkspaceId};

use crate::facts::{Project, SsoProvider, SsoSession, Workspace};
use crate::flags::FeatureFlags;
use crate::roles::{ProjectRole, ServerRole, WorkspaceRole};

pub type LoaderResult<T> = Result<T, ProviderError>;

/// Provider names, as reported in [`ProviderError::provider`] and in the
/// in-memory call log.
pub mod names {
    pub const GET_SERVER_ROLE: &str = "get_server_role";
    pub const GET_PROJECT: &str = "get_project";
    pub const GET_PROJECT_ROLE: &str = "get_project_role";
    pub const GET_WORKSPACE: &str = "get_workspace";
    pub const GET_WORKSPACE_ROLE: &str = "get_workspace_role";
    pub const GET_WORKSPACE_SSO_PROVIDER: &str = "get_workspace_sso_provider";
    pub const GET_WORKSPACE_SSO_SESSION: &str = "get_workspace_sso_session";
    pub const GET_ENV: &str = "get_env";
}

/// Capability set of asynchronous fact lookups.
///
/// Implementations must be safe for concurrent use: many decisions may run at
/// once against the same loaders.
#[async_trait::async_trait]
pub trait AuthzLoaders: Send + Sync {
    async fn get_server_role(&self, user_id: &UserId) -> LoaderResult<Option<ServerRole>>;

    async fn get_project(&self, project_id: &ProjectId) -> LoaderResult<Option<Project>>;

    async fn get_project_role(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> LoaderResult<Option<ProjectRole>>;

    async fn get_workspace(&self, workspace_id: &WorkspaceId) -> LoaderResult<Option<Workspace>>;

    async fn get_workspace_role(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
    ) -> LoaderResult<Option<WorkspaceRole>>;

    async fn get_workspace_sso_provider(
        &self,
        workspace_id: &WorkspaceId,
    ) -> LoaderResult<Option<SsoProvider>>;

    async fn get_workspace_sso_session(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
    ) -> LoaderResult<Option<SsoSession>>;

    async fn get_env(&self) -> LoaderResult<FeatureFlags>;
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory implementation
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRoleGrant {
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub role: ProjectRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRoleGrant {
    pub user_id: UserId,
    pub workspace_id: WorkspaceId,
    pub role: WorkspaceRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSsoSessionRecord {
    pub workspace_id: WorkspaceId,
    #[serde(flatten)]
    pub session: SsoSession,
}

/// Fact snapshot held in memory.
///
/// Deserializable from JSON so a snapshot can be evaluated offline. Each fact
/// can be replaced independently through the `with_*` builders, and any
/// provider can be made to fail with [`InMemoryLoaders::failing`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InMemoryLoaders {
    server_roles: HashMap<UserId, ServerRole>,
    projects: HashMap<ProjectId, Project>,
    project_roles: Vec<ProjectRoleGrant>,
    workspaces: HashMap<WorkspaceId, Workspace>,
    workspace_roles: Vec<WorkspaceRoleGrant>,
    sso_providers: HashMap<WorkspaceId, SsoProvider>,
    sso_sessions: Vec<WorkspaceSsoSessionRecord>,
    flags: FeatureFlags,

    #[serde(skip)]
    failures: HashMap<String, String>,
    #[serde(skip)]
    delay: Option<Duration>,
    #[serde(skip)]
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl InMemoryLoaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server_role(mut self, user_id: impl Into<UserId>, role: ServerRole) -> Self {
        self.server_roles.insert(user_id.into(), role);
        self
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.insert(project.id.clone(), project);
        self
    }

    pub fn with_project_role(
        mut self,
        user_id: impl Into<UserId>,
        project_id: impl Into<ProjectId>,
        role: ProjectRole,
    ) -> Self {
        let (user_id, project_id) = (user_id.into(), project_id.into());
        self.project_roles
            .retain(|g| !(g.user_id == user_id && g.project_id == project_id));
        self.project_roles.push(ProjectRoleGrant {
            user_id,
            project_id,
            role,
        });
        self
    }

    pub fn with_workspace(mut self, workspace: Workspace) -> Self {
        self.workspaces.insert(workspace.id.clone(), workspace);
        self
    }

    pub fn with_workspace_role(
        mut self,
        user_id: impl Into<UserId>,
        workspace_id: impl Into<WorkspaceId>,
        role: WorkspaceRole,
    ) -> Self {
        let (user_id, workspace_id) = (user_id.into(), workspace_id.into());
        self.workspace_roles
            .retain(|g| !(g.user_id == user_id && g.workspace_id == workspace_id));
        self.workspace_roles.push(WorkspaceRoleGrant {
            user_id,
            workspace_id,
            role,
        });
        self
    }

    pub fn with_sso_provider(
        mut self,
        workspace_id: impl Into<WorkspaceId>,
        provider: SsoProvider,
    ) -> Self {
        self.sso_providers.insert(workspace_id.into(), provider);
        self
    }

    pub fn with_sso_session(mut self, workspace_id: impl Into<WorkspaceId>, session: SsoSession) -> Self {
        let workspace_id = workspace_id.into();
        self.sso_sessions
            .retain(|r| !(r.workspace_id == workspace_id && r.session.user_id == session.user_id));
        self.sso_sessions.push(WorkspaceSsoSessionRecord {
            workspace_id,
            session,
        });
        self
    }

    pub fn with_flags(mut self, flags: FeatureFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Make the named provider (see [`names`]) fail with an infrastructure error.
    pub fn failing(mut self, provider: &'static str, message: impl Into<String>) -> Self {
        self.failures.insert(provider.to_string(), message.into());
        self
    }

    /// Delay every lookup, to simulate a slow backend.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Providers called so far, in call order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn was_called(&self, provider: &str) -> bool {
        self.calls().iter().any(|c| *c == provider)
    }

    async fn enter(&self, provider: &'static str) -> LoaderResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(provider);
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.failures.get(provider) {
            Some(message) => Err(ProviderError::new(provider, message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl AuthzLoaders for InMemoryLoaders {
    async fn get_server_role(&self, user_id: &UserId) -> LoaderResult<Option<ServerRole>> {
        self.enter(names::GET_SERVER_ROLE).await?;
        Ok(self.server_roles.get(user_id).copied())
    }

    async fn get_project(&self, project_id: &ProjectId) -> LoaderResult<Option<Project>> {
        self.enter(names::GET_PROJECT).await?;
        Ok(self.projects.get(project_id).cloned())
    }

    async fn get_project_role(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> LoaderResult<Option<ProjectRole>> {
        self.enter(names::GET_PROJECT_ROLE).await?;
        Ok(self
            .project_roles
            .iter()
            .find(|g| &g.user_id == user_id && &g.project_id == project_id)
            .map(|g| g.role))
    }

    async fn get_workspace(&self, workspace_id: &WorkspaceId) -> LoaderResult<Option<Workspace>> {
        self.enter(names::GET_WORKSPACE).await?;
        Ok(self.workspaces.get(workspace_id).cloned())
    }

    async fn get_workspace_role(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
    ) -> LoaderResult<Option<WorkspaceRole>> {
        self.enter(names::GET_WORKSPACE_ROLE).await?;
        Ok(self
            .workspace_roles
            .iter()
            .find(|g| &g.user_id == user_id && &g.workspace_id == workspace_id)
            .map(|g| g.role))
    }

    async fn get_workspace_sso_provider(
        &self,
        workspace_id: &WorkspaceId,
    ) -> LoaderResult<Option<SsoProvider>> {
        self.enter(names::GET_WORKSPACE_SSO_PROVIDER).await?;
        Ok(self.sso_providers.get(workspace_id).cloned())
    }

    async fn get_workspace_sso_session(
        &self,
        user_id: &UserId,
        workspace_id: &WorkspaceId,
    ) -> LoaderResult<Option<SsoSession>> {
        self.enter(names::GET_WORKSPACE_SSO_SESSION).await?;
        Ok(self
            .sso_sessions
            .iter()
            .find(|r| &r.workspace_id == workspace_id && &r.session.user_id == user_id)
            .map(|r| r.session.clone()))
    }

    async fn get_env(&self) -> LoaderResult<FeatureFlags> {
        self.enter(names::GET_ENV).await?;
        Ok(self.flags.clone())
    }
}
