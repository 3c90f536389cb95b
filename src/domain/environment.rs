//! Deployment environment selection.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::AppError;

/// Branch name some CI systems report for a detached checkout.
const DETACHED_HEAD: &str = "HEAD";

/// Target environment of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Beta,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Beta => "beta",
            Environment::Prod => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "beta" => Ok(Environment::Beta),
            "prod" => Ok(Environment::Prod),
            other => Err(AppError::config_error(format!(
                "Unknown environment '{}': must be 'beta' or 'prod'",
                other
            ))),
        }
    }
}

/// What triggered the run: an explicit override and/or the branch being built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerContext {
    pub override_env: Option<String>,
    pub branch: Option<String>,
}

impl TriggerContext {
    pub fn is_empty(&self) -> bool {
        non_blank(self.override_env.as_deref()).is_none()
            && non_blank(self.branch.as_deref()).is_none()
    }
}

/// Map a trigger context to exactly one environment.
///
/// An explicit override always wins. Otherwise the primary branch deploys to
/// prod and every other branch to beta.
pub fn select_environment(
    trigger: &TriggerContext,
    primary_branch: &str,
) -> Result<Environment, AppError> {
    if let Some(value) = non_blank(trigger.override_env.as_deref()) {
        return value.parse();
    }

    let branch = non_blank(trigger.branch.as_deref())
        .map(normalize_branch)
        .filter(|branch| !branch.is_empty() && *branch != DETACHED_HEAD)
        .ok_or_else(|| {
            AppError::config_error(
                "Cannot determine target environment: no override (DEPLOY_ENV) and no branch \
                 context (GITHUB_REF_NAME or a checked-out git branch)",
            )
        })?;

    if branch == normalize_branch(primary_branch.trim()) {
        Ok(Environment::Prod)
    } else {
        Ok(Environment::Beta)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn normalize_branch(branch: &str) -> &str {
    branch.strip_prefix("refs/heads/").unwrap_or(branch)
}
