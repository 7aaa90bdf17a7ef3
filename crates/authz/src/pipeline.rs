//! The ordered evaluation shared by every project policy.
//!
//! Steps run in a fixed order and stop at the first denial:
//! session → server role → project → (explicit role | workspace role → SSO →
//! implicit role) → flag gate → threshold.

use warden_core::{Clock, ProviderError, UserId, WorkspaceId};

use crate::decision::{AuthError, Decision};
use crate::error::EngineError;
use crate::facts::Project;
use crate::loaders::AuthzLoaders;
use crate::policy::{ProjectPolicy, check_project_role};
use crate::request::ProjectRequest;
use crate::roles::{ProjectRole, implicit_project_role};
use crate::sso::is_sso_session_valid;

/// Early exit from the pipeline: a denial, or a technical failure.
enum Halt {
    Deny(AuthError),
    Fail(EngineError),
}

impl From<AuthError> for Halt {
    fn from(value: AuthError) -> Self {
        Halt::Deny(value)
    }
}

impl From<EngineError> for Halt {
    fn from(value: EngineError) -> Self {
        Halt::Fail(value)
    }
}

impl From<ProviderError> for Halt {
    fn from(value: ProviderError) -> Self {
        Halt::Fail(EngineError::Provider(value))
    }
}

pub(crate) async fn evaluate<L>(
    loaders: &L,
    clock: &dyn Clock,
    policy: &ProjectPolicy,
    request: &ProjectRequest,
) -> Result<Decision, EngineError>
where
    L: AuthzLoaders + ?Sized,
{
    match run(loaders, clock, policy, request).await {
        Ok(()) => {
            tracing::debug!(
                policy = %policy.name,
                user_id = ?request.user_id,
                project_id = %request.project_id,
                "authorization granted"
            );
            Ok(Decision::Allowed)
        }
        Err(Halt::Deny(err)) => {
            tracing::debug!(
                policy = %policy.name,
                code = err.code(),
                user_id = ?request.user_id,
                project_id = %request.project_id,
                "authorization denied"
            );
            Ok(Decision::Denied(err))
        }
        Err(Halt::Fail(err)) => {
            tracing::warn!(
                policy = %policy.name,
                project_id = %request.project_id,
                error = %err,
                "authorization could not be decided"
            );
            Err(err)
        }
    }
}

async fn run<L>(
    loaders: &L,
    clock: &dyn Clock,
    policy: &ProjectPolicy,
    request: &ProjectRequest,
) -> Result<(), Halt>
where
    L: AuthzLoaders + ?Sized,
{
    let user_id = request.user_id.as_ref().ok_or(AuthError::ServerNoSession)?;

    let (server_role, project) = tokio::try_join!(
        loaders.get_server_role(user_id),
        loaders.get_project(&request.project_id),
    )?;

    if server_role.is_none() {
        return Err(AuthError::ServerNoAccess.into());
    }
    let project = project.ok_or(AuthError::ProjectNotFound)?;

    let role = resolve_project_role(loaders, clock, user_id, &project).await?;

    // Flags are only read once every earlier step has passed.
    let flags = if policy.requires_flags() {
        Some(loaders.get_env().await?)
    } else {
        None
    };
    let minimum = policy.effective_minimum_role(flags.as_ref());
    check_project_role(role, minimum)?;
    Ok(())
}

/// The project role that counts for this user: explicit for standalone
/// projects, implicit (workspace-derived) for workspace projects.
async fn resolve_project_role<L>(
    loaders: &L,
    clock: &dyn Clock,
    user_id: &UserId,
    project: &Project,
) -> Result<Option<ProjectRole>, Halt>
where
    L: AuthzLoaders + ?Sized,
{
    match &project.workspace_id {
        None => Ok(loaders.get_project_role(user_id, &project.id).await?),
        Some(workspace_id) => resolve_workspace_project_role(loaders, clock, user_id, workspace_id).await,
    }
}

async fn resolve_workspace_project_role<L>(
    loaders: &L,
    clock: &dyn Clock,
    user_id: &UserId,
    workspace_id: &WorkspaceId,
) -> Result<Option<ProjectRole>, Halt>
where
    L: AuthzLoaders + ?Sized,
{
    let (workspace, workspace_role) = tokio::try_join!(
        loaders.get_workspace(workspace_id),
        loaders.get_workspace_role(user_id, workspace_id),
    )?;

    let workspace = workspace.ok_or_else(|| EngineError::MissingWorkspace(workspace_id.clone()))?;
    let workspace_role = workspace_role.ok_or(AuthError::WorkspaceNoAccess)?;

    if let Some(provider) = loaders.get_workspace_sso_provider(workspace_id).await? {
        let session = loaders.get_workspace_sso_session(user_id, workspace_id).await?;
        if !is_sso_session_valid(session.as_ref(), &provider, clock.now()) {
            return Err(AuthError::WorkspaceSsoSessionNoAccess {
                workspace_id: workspace.id,
                workspace_slug: workspace.slug,
            }
            .into());
        }
    }

    Ok(implicit_project_role(workspace_role))
}
