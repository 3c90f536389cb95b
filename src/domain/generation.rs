use std::collections::BTreeMap;
use std::fmt;

use crate::domain::AppError;
use crate::ports::{GenerationRequest, TextGenerator};

/// Optional enrichment step between rendering and publishing.
pub enum ContentGenerator {
    Configured(Box<dyn TextGenerator>),
    Absent,
}

impl ContentGenerator {
    pub fn is_configured(&self) -> bool {
        matches!(self, ContentGenerator::Configured(_))
    }

    /// Enrich rendered text; `Absent` returns it unchanged.
    pub fn enrich(
        &self,
        rendered: &str,
        variables: &BTreeMap<String, String>,
    ) -> Result<String, AppError> {
        match self {
            ContentGenerator::Absent => Ok(rendered.to_string()),
            ContentGenerator::Configured(generator) => generator.generate(&GenerationRequest {
                prompt: rendered.to_string(),
                variables: variables.clone(),
            }),
        }
    }
}

impl fmt::Debug for ContentGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentGenerator::Configured(_) => f.write_str("ContentGenerator::Configured"),
            ContentGenerator::Absent => f.write_str("ContentGenerator::Absent"),
        }
    }
}
