//! Load job records from a job source in a stable order.

use crate::domain::jobs::{JobFormat, JobSpec};
use crate::domain::{AppError, JobFailure};
use crate::ports::JobSource;

/// A job record together with its source identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedJob {
    pub id: String,
    pub spec: JobSpec,
}

/// Result of loading every job: valid records plus per-job failures.
#[derive(Debug, Default)]
pub struct Resolution {
    pub jobs: Vec<ResolvedJob>,
    pub failures: Vec<JobFailure>,
}

impl Resolution {
    /// Whether any loaded job asked for the index artifact.
    pub fn wants_index(&self) -> bool {
        self.jobs.iter().any(|job| job.spec.make_index)
    }
}

/// Load every job from `source`, sorted by identifier.
///
/// Failing to list the source is fatal; a job that cannot be read or parsed
/// is recorded and the remaining jobs are still loaded.
pub fn resolve_jobs(source: &(impl JobSource + ?Sized)) -> Result<Resolution, AppError> {
    let mut ids = source.list_jobs()?;
    ids.sort();
    ids.dedup();

    let mut resolution = Resolution::default();
    for id in ids {
        match load_job(source, &id) {
            Ok(spec) => resolution.jobs.push(ResolvedJob { id, spec }),
            Err(err) => resolution.failures.push(JobFailure::from_error(&id, &err)),
        }
    }
    Ok(resolution)
}

/// Load and validate a single job.
pub fn load_job(source: &(impl JobSource + ?Sized), id: &str) -> Result<JobSpec, AppError> {
    let format = JobFormat::from_file_name(id).ok_or_else(|| AppError::JobParse {
        job: id.to_string(),
        details: "unsupported file extension (expected .json, .yml or .yaml)".to_string(),
    })?;
    let content = source.read_job(id)?;
    JobSpec::parse(id, format, &content)
}
