//! `warden-authz` — project authorization decisions.
//!
//! A decision composes facts from independent authorities (server role,
//! project role, workspace role, workspace SSO, feature flags) supplied by
//! caller-provided [`AuthzLoaders`]. This crate is decoupled from HTTP and
//! storage and performs no writes.

pub mod catalog;
pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod facts;
pub mod flags;
pub mod loaders;
mod pipeline;
pub mod policy;
pub mod request;
pub mod roles;
pub mod sso;

pub use catalog::PolicyName;
pub use config::EngineConfig;
pub use decision::{AuthError, Decision};
pub use engine::{BoundPolicy, PolicyEngine};
pub use error::{ConfigError, EngineError};
pub use facts::{Project, SsoProvider, SsoSession, Workspace};
pub use flags::{FeatureFlag, FeatureFlags};
pub use loaders::{AuthzLoaders, InMemoryLoaders, LoaderResult};
pub use policy::{FlagGate, ProjectPolicy, check_project_role};
pub use request::ProjectRequest;
pub use roles::{
    IMPLICIT_PROJECT_ROLES, ProjectRole, RoleHierarchy, ServerRole, UnknownRole, WorkspaceRole,
    implicit_project_role,
};
pub use sso::is_sso_session_valid;

pub use warden_core::{Clock, FixedClock, ProjectId, ProviderError, SsoProviderId, SystemClock, UserId, WorkspaceId};
