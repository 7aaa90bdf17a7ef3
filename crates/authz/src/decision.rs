//! Decision outcome and the closed denial taxonomy.

use serde::Serialize;
use thiserror::Error;

use warden_core::WorkspaceId;

/// Why a request was denied. Closed set; `code()` is stable and meant for
/// callers to branch on (401 vs 403 vs 404) without string parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all_fields = "camelCase")]
pub enum AuthError {
    #[error("you must be logged in to perform this action")]
    ServerNoSession,

    #[error("you do not have access to this server")]
    ServerNoAccess,

    #[error("project not found")]
    ProjectNotFound,

    #[error("you do not have access to this workspace")]
    WorkspaceNoAccess,

    #[error("a valid SSO session is required to access workspace {workspace_id}")]
    WorkspaceSsoSessionNoAccess {
        workspace_id: WorkspaceId,
        workspace_slug: Option<String>,
    },

    #[error("you do not have access to this project")]
    ProjectNoAccess,

    #[error("you do not have enough permissions in this project to perform this action")]
    ProjectNotEnoughPermissions,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::ServerNoSession => "ServerNoSession",
            AuthError::ServerNoAccess => "ServerNoAccess",
            AuthError::ProjectNotFound => "ProjectNotFound",
            AuthError::WorkspaceNoAccess => "WorkspaceNoAccess",
            AuthError::WorkspaceSsoSessionNoAccess { .. } => "WorkspaceSsoSessionNoAccess",
            AuthError::ProjectNoAccess => "ProjectNoAccess",
            AuthError::ProjectNotEnoughPermissions => "ProjectNotEnoughPermissions",
        }
    }
}

/// Outcome of one authorization evaluation: allowed, or denied with exactly
/// one code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "error", rename_all = "snake_case")]
pub enum Decision {
    Allowed,
    Denied(AuthError),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    pub fn denial(&self) -> Option<&AuthError> {
        match self {
            Decision::Allowed => None,
            Decision::Denied(err) => Some(err),
        }
    }

    /// Denial code, `None` when allowed.
    pub fn code(&self) -> Option<&'static str> {
        self.denial().map(AuthError::code)
    }

    pub fn into_result(self) -> Result<(), AuthError> {
        match self {
            Decision::Allowed => Ok(()),
            Decision::Denied(err) => Err(err),
        }
    }
}

impl From<Result<(), AuthError>> for Decision {
    fn from(value: Result<(), AuthError>) -> Self {
        match value {
            Ok(()) => Decision::Allowed,
            Err(err) => Decision::Denied(err),
        }
    }
}
