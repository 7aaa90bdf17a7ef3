use std::time::Duration;

use crate::error::ConfigError;

pub const DECISION_TIMEOUT_ENV: &str = "WARDEN_DECISION_TIMEOUT_MS";

/// Engine configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deadline for one decision, fact fetches included. `None` = no deadline.
    pub decision_timeout: Option<Duration>,
}

impl EngineConfig {
    pub fn with_decision_timeout(mut self, timeout: Duration) -> Self {
        self.decision_timeout = Some(timeout);
        self
    }

    /// Read configuration from the process environment.
    ///
    /// `WARDEN_DECISION_TIMEOUT_MS` unset or `0` disables the deadline.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let decision_timeout = match lookup(DECISION_TIMEOUT_ENV) {
            None => None,
            Some(raw) => {
                let ms: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: DECISION_TIMEOUT_ENV,
                    value: raw.clone(),
                })?;
                (ms > 0).then(|| Duration::from_millis(ms))
            }
        };

        Ok(Self { decision_timeout })
    }
}
