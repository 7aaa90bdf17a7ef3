use std::time::Duration;

use thiserror::Error;

use warden_core::{ProviderError, WorkspaceId};

/// Technical failure of the engine. Never a security decision: callers must
/// not map any of these to "allowed" or to a denial code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The project points at a workspace that does not exist.
    #[error("project references missing workspace {0}")]
    MissingWorkspace(WorkspaceId),

    #[error("decision timed out after {0:?}")]
    Timeout(Duration),

    #[error("unknown policy '{0}'")]
    UnknownPolicy(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}
