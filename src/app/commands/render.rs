//! Render command: build artifacts and write local copies without publishing.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::app::AppContext;
use crate::app::commands::pipeline::build_artifacts;
use crate::domain::{AppError, Publisher, RunReport, TemplateRenderer};
use crate::ports::JobSource;

/// Write every artifact through `publisher` (normally a local directory). No index is produced.
pub fn execute<J, R>(
    ctx: &AppContext<J, R>,
    publisher: &Publisher<'_>,
    generated_at: DateTime<Utc>,
) -> Result<RunReport, AppError>
where
    J: JobSource,
    R: TemplateRenderer,
{
    let rendered = build_artifacts(ctx, None)?;
    let mut failures = rendered.failures;
    let outcome = publisher.publish_all(&rendered.artifacts);
    failures.extend(outcome.failures);

    let namespace = publisher.namespace();
    Ok(RunReport {
        environment: namespace.environment(),
        destination: namespace.destination().to_string(),
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        published: outcome.published,
        failures,
    })
}
