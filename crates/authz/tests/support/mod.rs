#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use warden_authz::{
    FixedClock, InMemoryLoaders, PolicyEngine, Project, ProjectRole, ProjectRequest, ServerRole,
    SsoProvider, SsoProviderId, SsoSession, UserId, Workspace, WorkspaceId, WorkspaceRole,
};

pub const USER: &str = "user-id";
pub const PROJECT: &str = "project-id";
pub const WORKSPACE: &str = "workspace-id";
pub const PROVIDER: &str = "provider-id";

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn request() -> ProjectRequest {
    ProjectRequest::new(USER, PROJECT)
}

pub fn project(workspace_id: Option<&str>) -> Project {
    Project {
        id: PROJECT.into(),
        workspace_id: workspace_id.map(WorkspaceId::from),
        is_public: false,
        is_discoverable: false,
    }
}

pub fn sso_provider() -> SsoProvider {
    SsoProvider {
        provider_id: SsoProviderId::new(PROVIDER),
    }
}

pub fn sso_session(valid_for: Duration) -> SsoSession {
    SsoSession {
        user_id: UserId::new(USER),
        provider_id: SsoProviderId::new(PROVIDER),
        valid_until: now() + valid_for,
    }
}

/// Standalone project; the user is a server guest holding Contributor.
pub fn standalone() -> InMemoryLoaders {
    InMemoryLoaders::new()
        .with_server_role(USER, ServerRole::Guest)
        .with_project(project(None))
        .with_project_role(USER, PROJECT, ProjectRole::Contributor)
}

/// Same base as `standalone`, without any project role.
pub fn standalone_without_role() -> InMemoryLoaders {
    InMemoryLoaders::new()
        .with_server_role(USER, ServerRole::Guest)
        .with_project(project(None))
}

/// Workspace project without the workspace role, SSO provider or session,
/// so tests can add exactly what they need.
pub fn workspace_base() -> InMemoryLoaders {
    InMemoryLoaders::new()
        .with_server_role(USER, ServerRole::Guest)
        .with_project(project(Some(WORKSPACE)))
        .with_workspace(Workspace {
            id: WORKSPACE.into(),
            slug: Some("acme".to_string()),
        })
}

/// Workspace project; the user is workspace Admin with a valid SSO session.
pub fn workspace() -> InMemoryLoaders {
    workspace_base()
        .with_workspace_role(USER, WORKSPACE, WorkspaceRole::Admin)
        .with_sso_provider(WORKSPACE, sso_provider())
        .with_sso_session(WORKSPACE, sso_session(Duration::hours(1)))
}

pub fn engine(loaders: InMemoryLoaders) -> PolicyEngine<InMemoryLoaders> {
    PolicyEngine::new(loaders).with_clock(FixedClock(now()))
}

/// Engine plus a handle on the loaders to inspect the call log.
pub fn engine_with_handle(
    loaders: InMemoryLoaders,
) -> (PolicyEngine<InMemoryLoaders>, Arc<InMemoryLoaders>) {
    let loaders = Arc::new(loaders);
    let engine = PolicyEngine::from_arc(Arc::clone(&loaders)).with_clock(FixedClock(now()));
    (engine, loaders)
}
