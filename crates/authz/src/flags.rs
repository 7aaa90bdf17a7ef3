//! Feature flag snapshot.
//!
//! Flags are read from `FF_*` style key/value pairs. The snapshot is opaque:
//! unknown flags are kept, so a policy can consult a flag this crate has no
//! typed accessor for via [`FeatureFlags::is_enabled_raw`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Flags with a known meaning to the built-in policies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureFlag {
    ProjectContributorInvites,
}

impl FeatureFlag {
    pub const ALL: [FeatureFlag; 1] = [FeatureFlag::ProjectContributorInvites];

    /// Environment variable name of the flag.
    pub fn env_name(self) -> &'static str {
        match self {
            FeatureFlag::ProjectContributorInvites => "FF_PROJECT_CONTRIBUTOR_INVITES_ENABLED",
        }
    }
}

impl core::fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.env_name())
    }
}

/// Set of enabled flags, by variable name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureFlags {
    enabled: BTreeSet<String>,
}

const FLAG_PREFIX: &str = "FF_";

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

impl FeatureFlags {
    /// Everything off.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse flags from key/value pairs. Keys without the `FF_` prefix are
    /// ignored; a falsy value leaves the flag off.
    pub fn parse<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let enabled = pairs
            .into_iter()
            .filter(|(k, v)| k.as_ref().starts_with(FLAG_PREFIX) && is_truthy(v.as_ref()))
            .map(|(k, _)| k.as_ref().to_string())
            .collect();
        Self { enabled }
    }

    /// Snapshot the flags of the current process environment.
    pub fn from_env() -> Self {
        Self::parse(std::env::vars())
    }

    pub fn with(mut self, flag: FeatureFlag) -> Self {
        self.enabled.insert(flag.env_name().to_string());
        self
    }

    pub fn is_enabled(&self, flag: FeatureFlag) -> bool {
        self.enabled.contains(flag.env_name())
    }

    pub fn is_enabled_raw(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults_to_off() {
        let flags = FeatureFlags::parse(Vec::<(String, String)>::new());
        for flag in FeatureFlag::ALL {
            assert!(!flags.is_enabled(flag));
        }
    }

    #[test]
    fn parse_accepts_truthy_values() {
        let flags = FeatureFlags::parse([
            ("FF_WORKSPACES_MODULE_ENABLED", "true"),
            ("FF_AUTOMATE_MODULE_ENABLED", " On "),
            ("FF_WORKSPACES_SSO_ENABLED", "false"),
            ("FF_PROJECT_CONTRIBUTOR_INVITES_ENABLED", "0"),
        ]);

        assert!(flags.is_enabled_raw("FF_WORKSPACES_MODULE_ENABLED"));
        assert!(flags.is_enabled_raw("FF_AUTOMATE_MODULE_ENABLED"));
        assert!(!flags.is_enabled_raw("FF_WORKSPACES_SSO_ENABLED"));
        assert!(!flags.is_enabled(FeatureFlag::ProjectContributorInvites));

        let on = FeatureFlags::parse([("FF_PROJECT_CONTRIBUTOR_INVITES_ENABLED", "yes")]);
        assert!(on.is_enabled(FeatureFlag::ProjectContributorInvites));
    }

    #[test]
    fn parse_ignores_non_flag_keys_but_keeps_unknown_flags() {
        let flags = FeatureFlags::parse([("PATH", "1"), ("FF_SOMETHING_NEW", "yes")]);
        assert!(!flags.is_enabled_raw("PATH"));
        assert!(flags.is_enabled_raw("FF_SOMETHING_NEW"));
        assert_eq!(flags.iter().count(), 1);
    }
}
