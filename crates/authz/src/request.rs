use serde::{Deserialize, Serialize};

use warden_core::{ProjectId, UserId};

/// Parameters of a project policy check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    /// `None` for an anonymous request.
    pub user_id: Option<UserId>,
    pub project_id: ProjectId,
}

impl ProjectRequest {
    pub fn new(user_id: impl Into<UserId>, project_id: impl Into<ProjectId>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            project_id: project_id.into(),
        }
    }

    pub fn anonymous(project_id: impl Into<ProjectId>) -> Self {
        Self {
            user_id: None,
            project_id: project_id.into(),
        }
    }
}
