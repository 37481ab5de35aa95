//! Vote reset policy.
//!
//! Decides whether an initialization pass of the vote store wipes existing
//! votes. The database side (truncate, `app_meta` bookkeeping) lives in the
//! db crate; this module only holds the decision table.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Which reset behaviour the store applies when it initializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPolicy {
    /// Never truncate. The store is managed externally.
    #[default]
    Never,
    /// Truncate on every cold start, but only in production.
    ColdStart,
    /// Truncate once per deployment identifier.
    PerDeploy,
}

impl FromStr for ResetPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" | "none" => Ok(ResetPolicy::Never),
            "cold-start" | "cold_start" => Ok(ResetPolicy::ColdStart),
            "per-deploy" | "per_deploy" => Ok(ResetPolicy::PerDeploy),
            other => Err(CoreError::Config(format!(
                "unknown reset policy '{other}' (expected never, cold-start or per-deploy)"
            ))),
        }
    }
}

impl fmt::Display for ResetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResetPolicy::Never => "never",
            ResetPolicy::ColdStart => "cold-start",
            ResetPolicy::PerDeploy => "per-deploy",
        })
    }
}

/// Outcome of a reset decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetAction {
    Keep,
    Truncate,
}

/// Reset policy plus the environment facts it depends on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResetSettings {
    pub policy: ResetPolicy,
    /// Running in the production deployment context.
    pub production: bool,
    /// Opaque identifier of the current deployment.
    pub deploy_id: Option<String>,
}

impl ResetSettings {
    /// Settings that never touch existing votes.
    pub fn never() -> Self {
        Self::default()
    }

    pub fn per_deploy(deploy_id: impl Into<String>) -> Self {
        Self {
            policy: ResetPolicy::PerDeploy,
            production: false,
            deploy_id: Some(deploy_id.into()),
        }
    }

    pub fn cold_start(production: bool) -> Self {
        Self {
            policy: ResetPolicy::ColdStart,
            production,
            deploy_id: None,
        }
    }

    /// `per-deploy` is meaningless without a deployment identifier.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.policy == ResetPolicy::PerDeploy && self.current_deploy_id().is_none() {
            return Err(CoreError::Config(
                "reset policy per-deploy requires a deployment identifier".into(),
            ));
        }
        Ok(())
    }

    /// The configured deployment identifier, ignoring blank values.
    pub fn current_deploy_id(&self) -> Option<&str> {
        self.deploy_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Whether the initialization pass needs to read `app_meta` at all.
    pub fn tracks_deploys(&self) -> bool {
        self.policy == ResetPolicy::PerDeploy
    }

    /// Decision for one initialization pass.
    ///
    /// `stored_deploy_id` is the last identifier recorded in `app_meta` and
    /// is only consulted by [`ResetPolicy::PerDeploy`]. A missing row counts
    /// as a mismatch.
    pub fn action(&self, stored_deploy_id: Option<&str>) -> ResetAction {
        match self.policy {
            ResetPolicy::Never => ResetAction::Keep,
            ResetPolicy::ColdStart if self.production => ResetAction::Truncate,
            ResetPolicy::ColdStart => ResetAction::Keep,
            ResetPolicy::PerDeploy => match self.current_deploy_id() {
                Some(current) if stored_deploy_id == Some(current) => ResetAction::Keep,
                Some(_) => ResetAction::Truncate,
                None => ResetAction::Keep,
            },
        }
    }
}
