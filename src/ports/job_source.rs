//! Job and template source port definition.

use crate::domain::AppError;

/// Port for reading job records and the templates they reference.
pub trait JobSource {
    /// Identifiers (file names) of every job record, in any order.
    fn list_jobs(&self) -> Result<Vec<String>, AppError>;

    /// Raw content of job `id`.
    fn read_job(&self, id: &str) -> Result<String, AppError>;

    /// Content of template `name`, or `None` if it does not exist.
    fn read_template(&self, name: &str) -> Result<Option<String>, AppError>;
}
