//! Template rendering contract and per-job rendering.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::jobs::ResolvedJob;
use crate::domain::{AppError, OutputPath};

/// Trait for rendering templates.
///
/// Keeps the template engine (e.g. minijinja) out of the domain layer.
/// Implementations must be deterministic and must fail on placeholders
/// that have no value in `context`.
pub trait TemplateRenderer {
    /// Render `template` with `context`; `template_name` is used for error reporting.
    fn render(
        &self,
        template_name: &str,
        template: &str,
        context: &Value,
    ) -> Result<String, AppError>;
}

/// A job's rendered body and output path, before any enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedJob {
    pub job: String,
    pub path: OutputPath,
    pub body: String,
}

/// Render the body and the output file name of `job`.
pub fn render_job(
    renderer: &(impl TemplateRenderer + ?Sized),
    job: &ResolvedJob,
    template: &str,
) -> Result<RenderedJob, AppError> {
    let context = variables_context(&job.spec.variables);
    let body = renderer.render(&job.spec.template_name(&job.id), template, &context)?;

    let path_name = format!("{}#output_file_template", job.id);
    if let Some(token) = disallowed_path_token(&job.spec.output_file_template) {
        return Err(AppError::Render {
            template: path_name,
            reason: format!("'{}' blocks are not allowed in output file names", token),
        });
    }
    let rendered_path = renderer.render(&path_name, &job.spec.output_file_template, &context)?;
    let path = OutputPath::parse(&rendered_path)?;

    Ok(RenderedJob { job: job.id.clone(), path, body })
}

/// Template context exposing each variable by name.
pub fn variables_context(variables: &BTreeMap<String, String>) -> Value {
    Value::Object(
        variables.iter().map(|(key, value)| (key.clone(), Value::String(value.clone()))).collect(),
    )
}

/// File names only take placeholders with filters; statements and comments are rejected.
fn disallowed_path_token(template: &str) -> Option<&'static str> {
    if template.contains("{%") {
        return Some("{%");
    }
    if template.contains("{#") {
        return Some("{#");
    }
    None
}
