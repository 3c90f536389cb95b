use std::collections::BTreeMap;

use crate::domain::AppError;
use crate::ports::JobSource;

/// In-memory job and template source.
#[derive(Debug, Clone, Default)]
pub struct MemoryJobSource {
    jobs: BTreeMap<String, String>,
    templates: BTreeMap<String, String>,
}

impl MemoryJobSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_job(mut self, id: &str, content: &str) -> Self {
        self.jobs.insert(id.to_string(), content.to_string());
        self
    }

    pub fn with_template(mut self, name: &str, content: &str) -> Self {
        self.templates.insert(name.to_string(), content.to_string());
        self
    }
}

impl JobSource for MemoryJobSource {
    fn list_jobs(&self) -> Result<Vec<String>, AppError> {
        Ok(self.jobs.keys().cloned().collect())
    }

    fn read_job(&self, id: &str) -> Result<String, AppError> {
        self.jobs.get(id).cloned().ok_or_else(|| {
            AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Job not found: {}", id),
            ))
        })
    }

    fn read_template(&self, name: &str) -> Result<Option<String>, AppError> {
        Ok(self.templates.get(name).cloned())
    }
}
