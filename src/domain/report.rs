//! Consolidated outcome of a run.

use serde::Serialize;

use crate::domain::{AppError, Environment, FailureKind};

/// A job or artifact that did not make it into the namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobFailure {
    pub job: String,
    pub kind: FailureKind,
    pub message: String,
}

impl JobFailure {
    pub fn from_error(job: &str, error: &AppError) -> Self {
        Self { job: job.to_string(), kind: error.failure_kind(), message: error.to_string() }
    }
}

/// An artifact written to the namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishedArtifact {
    pub job: String,
    pub path: String,
    pub key: String,
    pub location: String,
    pub content_type: String,
    pub sha256: String,
    pub bytes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub environment: Option<Environment>,
    pub destination: String,
    pub generated_at: String,
    pub published: Vec<PublishedArtifact>,
    pub failures: Vec<JobFailure>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Identifiers of failed jobs, in report order, without duplicates.
    pub fn failed_jobs(&self) -> Vec<&str> {
        let mut jobs: Vec<&str> = Vec::new();
        for failure in &self.failures {
            if !jobs.contains(&failure.job.as_str()) {
                jobs.push(&failure.job);
            }
        }
        jobs
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self).map_err(|err| {
            AppError::Io(std::io::Error::other(format!("Failed to serialize run report: {}", err)))
        })
    }
}
