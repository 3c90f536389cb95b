//! Publish command: render every job and write the results into the selected namespace.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{info, warn};

use crate::app::AppContext;
use crate::app::commands::pipeline::build_artifacts;
use crate::domain::{AppError, IndexPage, JobFailure, Publisher, RunReport, TemplateRenderer};
use crate::ports::JobSource;

/// Run the full pipeline against `publisher`'s namespace.
///
/// Artifacts are written in resolver order and the index, when any job asks
/// for it, is written last. Per-job failures end up in the report; only
/// fatal errors are returned as `Err`.
pub fn execute<J, R>(
    ctx: &AppContext<J, R>,
    publisher: &Publisher<'_>,
    index: &IndexPage<'_>,
    generated_at: DateTime<Utc>,
) -> Result<RunReport, AppError>
where
    J: JobSource,
    R: TemplateRenderer,
{
    let rendered = build_artifacts(ctx, Some(index.path))?;
    let mut failures = rendered.failures;

    let outcome = publisher.publish_all(&rendered.artifacts);
    let mut published = outcome.published;
    failures.extend(outcome.failures);

    if rendered.wants_index {
        if published.is_empty() {
            warn!(path = %index.path, "nothing was published, skipping index");
        } else {
            match publisher.publish_index(&published, index, ctx.renderer(), generated_at) {
                Ok(artifact) => {
                    info!(
                        location = %artifact.location,
                        entries = published.len(),
                        "index published"
                    );
                    published.push(artifact);
                }
                Err(err) => {
                    warn!(path = %index.path, error = %err, "index publish failed");
                    failures.push(JobFailure::from_error(index.path.as_str(), &err));
                }
            }
        }
    }

    let namespace = publisher.namespace();
    Ok(RunReport {
        environment: namespace.environment(),
        destination: namespace.destination().to_string(),
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        published,
        failures,
    })
}
