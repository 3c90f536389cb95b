use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::domain::{AppError, JobFormat};
use crate::ports::JobSource;

/// Reads job files from one directory and templates from another.
#[derive(Debug, Clone)]
pub struct FilesystemJobSource {
    jobs_dir: PathBuf,
    templates_dir: PathBuf,
}

impl FilesystemJobSource {
    pub fn new(jobs_dir: impl Into<PathBuf>, templates_dir: impl Into<PathBuf>) -> Self {
        Self { jobs_dir: jobs_dir.into(), templates_dir: templates_dir.into() }
    }
}

impl JobSource for FilesystemJobSource {
    /// File names of `.json`, `.yml` and `.yaml` files directly inside the jobs directory.
    fn list_jobs(&self) -> Result<Vec<String>, AppError> {
        if !self.jobs_dir.is_dir() {
            return Err(AppError::config_error(format!(
                "Jobs directory not found: {}",
                self.jobs_dir.display()
            )));
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.jobs_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if JobFormat::from_file_name(&name).is_some() {
                ids.push(name);
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn read_job(&self, id: &str) -> Result<String, AppError> {
        fs::read_to_string(self.jobs_dir.join(id)).map_err(AppError::from)
    }

    fn read_template(&self, name: &str) -> Result<Option<String>, AppError> {
        let path = name.split('/').fold(self.templates_dir.clone(), |path, part| path.join(part));
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(AppError::Io(err)),
        }
    }
}
