//! Policy engine: binds the fact providers, a clock and configuration, and
//! runs policies against them.

use std::sync::Arc;

use warden_core::{Clock, SystemClock};

use crate::catalog::PolicyName;
use crate::config::EngineConfig;
use crate::decision::Decision;
use crate::error::EngineError;
use crate::loaders::AuthzLoaders;
use crate::pipeline;
use crate::policy::ProjectPolicy;
use crate::request::ProjectRequest;

/// Authorization engine.
///
/// Holds no mutable state: cloning is cheap and clones can decide
/// concurrently. Each decision reads every fact fresh from the loaders.
pub struct PolicyEngine<L: ?Sized> {
    clock: Arc<dyn Clock>,
    config: EngineConfig,
    loaders: Arc<L>,
}

impl<L: ?Sized> Clone for PolicyEngine<L> {
    fn clone(&self) -> Self {
        Self {
            clock: Arc::clone(&self.clock),
            config: self.config,
            loaders: Arc::clone(&self.loaders),
        }
    }
}

impl<L: AuthzLoaders> PolicyEngine<L> {
    pub fn new(loaders: L) -> Self {
        Self::from_arc(Arc::new(loaders))
    }
}

impl<L: AuthzLoaders + ?Sized> PolicyEngine<L> {
    pub fn from_arc(loaders: Arc<L>) -> Self {
        Self {
            clock: Arc::new(SystemClock),
            config: EngineConfig::default(),
            loaders,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn loaders(&self) -> &L {
        &self.loaders
    }

    /// Evaluate an arbitrary project policy.
    ///
    /// Denials come back as `Ok(Decision::Denied(_))`. `Err` means the
    /// decision could not be made (provider failure, broken data, deadline).
    pub async fn evaluate(
        &self,
        policy: &ProjectPolicy,
        request: &ProjectRequest,
    ) -> Result<Decision, EngineError> {
        let decision = pipeline::evaluate(&*self.loaders, &*self.clock, policy, request);

        match self.config.decision_timeout {
            None => decision.await,
            Some(timeout) => match tokio::time::timeout(timeout, decision).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        policy = %policy.name,
                        project_id = %request.project_id,
                        ?timeout,
                        "authorization decision timed out"
                    );
                    Err(EngineError::Timeout(timeout))
                }
            },
        }
    }

    /// Evaluate a built-in policy.
    pub async fn decide(
        &self,
        policy: PolicyName,
        request: &ProjectRequest,
    ) -> Result<Decision, EngineError> {
        self.evaluate(&policy.policy(), request).await
    }

    /// Evaluate a built-in policy by its name (e.g. `project:version:create`).
    pub async fn decide_by_name(
        &self,
        policy: &str,
        request: &ProjectRequest,
    ) -> Result<Decision, EngineError> {
        let name: PolicyName = policy.parse()?;
        self.decide(name, request).await
    }

    /// Bind one policy to this engine, yielding a reusable check.
    pub fn policy(&self, policy: impl Into<ProjectPolicy>) -> BoundPolicy<L> {
        BoundPolicy {
            engine: self.clone(),
            policy: policy.into(),
        }
    }
}

/// A policy closed over an engine's providers.
pub struct BoundPolicy<L: ?Sized> {
    engine: PolicyEngine<L>,
    policy: ProjectPolicy,
}

impl<L: AuthzLoaders + ?Sized> BoundPolicy<L> {
    pub fn definition(&self) -> &ProjectPolicy {
        &self.policy
    }

    pub async fn check(&self, request: &ProjectRequest) -> Result<Decision, EngineError> {
        self.engine.evaluate(&self.policy, request).await
    }
}
