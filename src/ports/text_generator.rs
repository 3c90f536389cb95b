//! Text generation port definition.

use std::collections::BTreeMap;

use crate::domain::AppError;

/// Request sent to a text generation capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Rendered template text used as the prompt.
    pub prompt: String,
    /// Raw job variables, for providers that use them.
    pub variables: BTreeMap<String, String>,
}

/// Port for remote text generation.
///
/// Transient failures are reported as `AppError::Generation`; refusals that
/// must not be retried as `AppError::GenerationDenied`.
pub trait TextGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, AppError>;
}
