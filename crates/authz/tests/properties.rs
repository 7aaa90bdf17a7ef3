//! Property tests for the ordering and precedence guarantees.

mod support;

use chrono::Duration;
use proptest::prelude::*;

use support::*;
use warden_authz::{
    Decision, InMemoryLoaders, PolicyName, ProjectRequest, ProjectRole, RoleHierarchy, ServerRole,
    WorkspaceRole,
};

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
        .block_on(future)
}

fn any_policy() -> impl Strategy<Value = PolicyName> {
    prop::sample::select(PolicyName::ALL.to_vec())
}

fn any_project_role() -> impl Strategy<Value = Option<ProjectRole>> {
    prop::option::of(prop::sample::select(ProjectRole::ALL.to_vec()))
}

fn any_workspace_role() -> impl Strategy<Value = Option<WorkspaceRole>> {
    prop::option::of(prop::sample::select(WorkspaceRole::ALL.to_vec()))
}

fn any_server_role() -> impl Strategy<Value = Option<ServerRole>> {
    prop::option::of(prop::sample::select(ServerRole::ALL.to_vec()))
}

/// Session validity offset in minutes; `None` = no session at all.
fn any_session_offset() -> impl Strategy<Value = Option<i64>> {
    prop::option::of(-120i64..120)
}

fn decide(loaders: InMemoryLoaders, policy: PolicyName, request: &ProjectRequest) -> Decision {
    block_on(engine(loaders).decide(policy, request)).unwrap()
}

fn with_project_role(loaders: InMemoryLoaders, role: Option<ProjectRole>) -> InMemoryLoaders {
    match role {
        Some(role) => loaders.with_project_role(USER, PROJECT, role),
        None => loaders,
    }
}

fn with_workspace_role(loaders: InMemoryLoaders, role: Option<WorkspaceRole>) -> InMemoryLoaders {
    match role {
        Some(role) => loaders.with_workspace_role(USER, WORKSPACE, role),
        None => loaders,
    }
}

fn with_session(loaders: InMemoryLoaders, offset: Option<i64>) -> InMemoryLoaders {
    match offset {
        Some(minutes) => loaders.with_sso_session(WORKSPACE, sso_session(Duration::minutes(minutes))),
        None => loaders,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Property: anonymous requests always end in ServerNoSession, whatever
    /// the facts say.
    #[test]
    fn anonymous_always_no_session(
        policy in any_policy(),
        server_role in any_server_role(),
        project_role in any_project_role(),
    ) {
        let mut loaders = with_project_role(standalone_without_role(), project_role);
        if let Some(role) = server_role {
            loaders = loaders.with_server_role(USER, role);
        }
        let decision = decide(loaders, policy, &ProjectRequest::anonymous(PROJECT));
        prop_assert_eq!(decision.code(), Some("ServerNoSession"));
    }

    /// Property: for workspace projects the explicit project role never
    /// changes the outcome.
    #[test]
    fn explicit_role_irrelevant_for_workspace_projects(
        policy in any_policy(),
        workspace_role in any_workspace_role(),
        session in any_session_offset(),
        explicit_a in any_project_role(),
        explicit_b in any_project_role(),
    ) {
        let base = || {
            let loaders = workspace_base().with_sso_provider(WORKSPACE, sso_provider());
            with_session(with_workspace_role(loaders, workspace_role), session)
        };

        let a = decide(with_project_role(base(), explicit_a), policy, &request());
        let b = decide(with_project_role(base(), explicit_b), policy, &request());
        prop_assert_eq!(a, b);
    }

    /// Property: without a configured SSO provider, any session (or none)
    /// yields the same outcome.
    #[test]
    fn session_irrelevant_without_sso_provider(
        policy in any_policy(),
        workspace_role in any_workspace_role(),
        session_a in any_session_offset(),
        session_b in any_session_offset(),
    ) {
        let base = || with_workspace_role(workspace_base(), workspace_role);

        let a = decide(with_session(base(), session_a), policy, &request());
        let b = decide(with_session(base(), session_b), policy, &request());
        prop_assert_eq!(a, b);
    }

    /// Property: on standalone projects the outcome is fully determined by
    /// the explicit role and the policy threshold.
    #[test]
    fn standalone_outcome_follows_threshold(
        policy in any_policy(),
        project_role in any_project_role(),
    ) {
        let loaders = with_project_role(standalone_without_role(), project_role);
        let decision = decide(loaders, policy, &request());
        let minimum = policy.policy().minimum_role;

        let expected = match project_role {
            None => Some("ProjectNoAccess"),
            Some(role) if role.at_least(minimum) => None,
            Some(_) => Some("ProjectNotEnoughPermissions"),
        };
        prop_assert_eq!(decision.code(), expected);
    }
}
