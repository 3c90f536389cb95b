//! Environment selection with a git fallback for the branch.

use tracing::info;

use crate::domain::{AppConfig, AppError, Environment, select_environment};
use crate::ports::BranchProbe;

/// Select the environment for this run.
///
/// The override and branch come from the configuration; when both are absent
/// the checked-out branch reported by `probe` is used.
pub fn execute(config: &AppConfig, probe: &dyn BranchProbe) -> Result<Environment, AppError> {
    let mut trigger = config.trigger.clone();
    if trigger.is_empty() {
        trigger.branch = probe.current_branch();
    }

    let environment = select_environment(&trigger, &config.environments.primary_branch)?;
    info!(
        environment = %environment,
        branch = trigger.branch.as_deref().unwrap_or("-"),
        "environment selected"
    );
    Ok(environment)
}
