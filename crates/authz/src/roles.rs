//! Role hierarchies for the three scopes (server, project, workspace).
//!
//! Each scope is its own enum so comparisons stay scope-local: a
//! `ServerRole` cannot be compared against a `ProjectRole`. The only bridge
//! between scopes is [`implicit_project_role`].

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordered role set for one scope.
///
/// `ALL` lists every role weakest first; `rank` is the position in that list.
pub trait RoleHierarchy: Copy + Eq + core::fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn rank(self) -> u8;

    fn as_str(self) -> &'static str;

    fn compare(a: Self, b: Self) -> Ordering {
        a.rank().cmp(&b.rank())
    }

    /// Whether `self` is at least as powerful as `threshold`.
    fn at_least(self, threshold: Self) -> bool {
        Self::compare(self, threshold) != Ordering::Less
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {scope} role '{name}'")]
pub struct UnknownRole {
    pub scope: &'static str,
    pub name: String,
}

macro_rules! role_hierarchy {
    (
        $(#[$meta:meta])*
        $t:ident, $scope:literal {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $t {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl RoleHierarchy for $t {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn rank(self) -> u8 {
                self as u8
            }

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $t {
            type Err = UnknownRole;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(UnknownRole {
                        scope: $scope,
                        name: other.to_string(),
                    }),
                }
            }
        }
    };
}

role_hierarchy! {
    /// Server-wide role. Absence means no recognized account.
    ServerRole, "server" {
        Guest => "server:guest",
        User => "server:user",
        Admin => "server:admin",
    }
}

role_hierarchy! {
    /// Project-level role, explicit or implicit (derived from a workspace role).
    ProjectRole, "project" {
        Reviewer => "stream:reviewer",
        Contributor => "stream:contributor",
        Owner => "stream:owner",
    }
}

role_hierarchy! {
    /// Workspace-level role.
    WorkspaceRole, "workspace" {
        Guest => "workspace:guest",
        Member => "workspace:member",
        Admin => "workspace:admin",
    }
}

/// The workspace → implicit project role table, one row per workspace role.
///
/// Workspace guests get no implicit project role: they only reach a
/// workspace project through the workspace path, which never reads explicit
/// project roles, so they end up with `ProjectNoAccess`.
pub const IMPLICIT_PROJECT_ROLES: [(WorkspaceRole, Option<ProjectRole>); 3] = [
    (WorkspaceRole::Admin, Some(ProjectRole::Owner)),
    (WorkspaceRole::Member, Some(ProjectRole::Reviewer)),
    (WorkspaceRole::Guest, None),
];

/// Derive the implicit project role granted by a workspace role.
///
/// The match is exhaustive: a workspace role without a mapping does not
/// compile.
pub fn implicit_project_role(role: WorkspaceRole) -> Option<ProjectRole> {
    match role {
        WorkspaceRole::Admin => Some(ProjectRole::Owner),
        WorkspaceRole::Member => Some(ProjectRole::Reviewer),
        WorkspaceRole::Guest => None,
    }
}
