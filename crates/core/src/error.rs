//! Error model shared by fact providers and the engine.

use thiserror::Error;

/// Infrastructure failure raised by a fact provider (network, database, ...).
///
/// Keep this separate from authorization outcomes: a provider that cannot be
/// reached is never a denial. The engine propagates it untouched so callers
/// can tell "access denied" apart from "the lookup failed".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{provider} failed: {message}")]
pub struct ProviderError {
    /// Name of the provider that failed (e.g. `get_workspace_role`).
    pub provider: &'static str,
    pub message: String,
}

impl ProviderError {
    pub fn new(provider: &'static str, message: impl Into<String>) -> Self {
        Self {
            provider,
            message: message.into(),
        }
    }
}

/// An identifier failed validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {reason}")]
pub struct InvalidId {
    pub kind: &'static str,
    pub reason: String,
}

impl InvalidId {
    pub fn new(kind: &'static str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_names_the_provider() {
        let err = ProviderError::new("get_project", "connection reset");
        assert_eq!(err.to_string(), "get_project failed: connection reset");
    }
}
