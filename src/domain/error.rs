use std::fmt;
use std::io;

use serde::Serialize;
use thiserror::Error;

/// Library-wide error type for promptsite operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Job file could not be parsed.
    #[error("Failed to parse job '{job}': {details}")]
    JobParse { job: String, details: String },

    /// Job file lacks one or more required fields.
    #[error("Job '{job}' is missing required field(s): {}", .fields.join(", "))]
    MissingFields { job: String, fields: Vec<String> },

    /// Template referenced by a job does not exist.
    #[error("Template '{template}' for job '{job}' not found")]
    TemplateNotFound { job: String, template: String },

    /// Rendered output path is not a safe relative path.
    #[error("Invalid output path '{path}': {reason}")]
    InvalidOutputPath { path: String, reason: String },

    /// Template rendering failed (unresolved placeholder, syntax error).
    #[error("Failed to render '{template}': {reason}")]
    Render { template: String, reason: String },

    /// Transient failure from the text generation API.
    #[error("Generation failed: {message}")]
    Generation { message: String, status: Option<u16>, retry_after_ms: Option<u64> },

    /// Non-retryable refusal from the text generation API.
    #[error("Generation denied: {message}")]
    GenerationDenied { message: String, status: Option<u16> },

    /// Object store write failed.
    #[error("Failed to publish '{key}': {message}")]
    Publish { key: String, message: String },

    /// Config file is not valid TOML or does not match the schema.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

/// Coarse classification used in run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Configuration,
    Validation,
    Render,
    Generation,
    GenerationDenied,
    Publish,
    Io,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Configuration => "ConfigurationError",
            FailureKind::Validation => "ValidationError",
            FailureKind::Render => "RenderError",
            FailureKind::Generation => "GenerationError",
            FailureKind::GenerationDenied => "GenerationDenied",
            FailureKind::Publish => "PublishError",
            FailureKind::Io => "IoError",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn failure_kind(&self) -> FailureKind {
        match self {
            AppError::Io(_) => FailureKind::Io,
            AppError::Configuration(_) | AppError::TomlParseError(_) => FailureKind::Configuration,
            AppError::JobParse { .. }
            | AppError::MissingFields { .. }
            | AppError::TemplateNotFound { .. }
            | AppError::InvalidOutputPath { .. } => FailureKind::Validation,
            AppError::Render { .. } => FailureKind::Render,
            AppError::Generation { .. } => FailureKind::Generation,
            AppError::GenerationDenied { .. } => FailureKind::GenerationDenied,
            AppError::Publish { .. } => FailureKind::Publish,
        }
    }
}
