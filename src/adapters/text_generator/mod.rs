mod http;
mod retrying;

pub use http::HttpTextGenerator;
pub use retrying::{RetryPolicy, RetryingTextGenerator};

use crate::domain::{AppError, ContentGenerator, GeneratorSettings};

/// Build the generator described by `settings`, or `Absent` when no endpoint is configured.
pub fn from_settings(settings: &GeneratorSettings) -> Result<ContentGenerator, AppError> {
    if !settings.is_enabled() {
        return Ok(ContentGenerator::Absent);
    }

    let http = HttpTextGenerator::new(settings)?;
    let retrying = RetryingTextGenerator::new(Box::new(http), RetryPolicy::from_settings(settings));
    Ok(ContentGenerator::Configured(Box::new(retrying)))
}
