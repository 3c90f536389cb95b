//! Shared render stage: resolve jobs, render them and run the optional generator.

use tracing::{debug, warn};

use crate::app::AppContext;
use crate::domain::{
    AppError, JobFailure, OutputPath, RenderedArtifact, ResolvedJob, TemplateRenderer,
    render_job, resolve_jobs,
};
use crate::ports::JobSource;

/// Artifacts ready for publishing plus every job that dropped out on the way.
#[derive(Debug, Default)]
pub struct RenderOutcome {
    pub artifacts: Vec<RenderedArtifact>,
    pub failures: Vec<JobFailure>,
    pub wants_index: bool,
}

/// Build artifacts for every job in resolver order.
///
/// Listing the job source is the only fatal step; each job that fails to
/// load, render or generate is recorded and skipped. When some job asks for
/// an index, a job that renders to `reserved` (the index path) is rejected.
pub fn build_artifacts<J, R>(
    ctx: &AppContext<J, R>,
    reserved: Option<&OutputPath>,
) -> Result<RenderOutcome, AppError>
where
    J: JobSource,
    R: TemplateRenderer,
{
    let resolution = resolve_jobs(ctx.jobs())?;
    for failure in &resolution.failures {
        warn!(job = %failure.job, kind = %failure.kind, "job skipped");
    }

    let mut outcome = RenderOutcome {
        wants_index: resolution.wants_index(),
        failures: resolution.failures,
        artifacts: Vec::new(),
    };
    let reserved = reserved.filter(|_| outcome.wants_index);

    for job in &resolution.jobs {
        match build_artifact(ctx, job, reserved) {
            Ok(artifact) => {
                debug!(job = %job.id, path = %artifact.path(), "artifact ready");
                outcome.artifacts.push(artifact);
            }
            Err(err) => {
                warn!(job = %job.id, error = %err, "job skipped");
                outcome.failures.push(JobFailure::from_error(&job.id, &err));
            }
        }
    }

    Ok(outcome)
}

fn build_artifact<J, R>(
    ctx: &AppContext<J, R>,
    job: &ResolvedJob,
    reserved: Option<&OutputPath>,
) -> Result<RenderedArtifact, AppError>
where
    J: JobSource,
    R: TemplateRenderer,
{
    let template_name = job.spec.template_name(&job.id);
    let template = ctx.jobs().read_template(&template_name)?.ok_or_else(|| {
        AppError::TemplateNotFound { job: job.id.clone(), template: template_name.clone() }
    })?;

    let rendered = render_job(ctx.renderer(), job, &template)?;
    if reserved.is_some_and(|index| *index == rendered.path) {
        return Err(AppError::InvalidOutputPath {
            path: rendered.path.to_string(),
            reason: "reserved for the index artifact".to_string(),
        });
    }

    let content = ctx.generator().enrich(&rendered.body, &job.spec.variables)?;
    Ok(RenderedArtifact::new(rendered.job, rendered.path, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_job_source::MemoryJobSource;
    use crate::adapters::template::MinijinjaTemplateRenderer;
    use crate::domain::{ContentGenerator, FailureKind};
    use crate::testing::FakeTextGenerator;

    const WELCOME_JOB: &str = r#"{
        "output_file_template": "welcome_{{name|lower}}.html",
        "variables": {"name": "Jordan", "company": "Aurora Digital"},
        "make_index": true
    }"#;

    fn context(
        source: MemoryJobSource,
        generator: ContentGenerator,
    ) -> AppContext<MemoryJobSource, MinijinjaTemplateRenderer> {
        AppContext::new(source, MinijinjaTemplateRenderer::new(), generator)
    }

    #[test]
    fn renders_path_and_body_without_generator() {
        let source = MemoryJobSource::new()
            .with_job("welcome_prompt.json", WELCOME_JOB)
            .with_template("welcome.txt", "Hello {{name}},\nWelcome to **{{company}}**!");

        let outcome = build_artifacts(&context(source, ContentGenerator::Absent), None).unwrap();

        assert!(outcome.failures.is_empty());
        assert!(outcome.wants_index);
        let artifact = &outcome.artifacts[0];
        assert_eq!(artifact.path().as_str(), "welcome_jordan.html");
        assert_eq!(artifact.content(), b"Hello Jordan,\nWelcome to **Aurora Digital**!");
        assert_eq!(artifact.content_type(), "text/html");
    }

    #[test]
    fn generator_output_replaces_rendered_body() {
        let source = MemoryJobSource::new()
            .with_job("welcome_prompt.json", WELCOME_JOB)
            .with_template("welcome.txt", "Write a page for {{name}}");
        let fake = FakeTextGenerator::echoing();

        let ctx = context(source, ContentGenerator::Configured(Box::new(fake.clone())));
        let outcome = build_artifacts(&ctx, None).unwrap();

        assert_eq!(outcome.artifacts[0].content(), b"generated: Write a page for Jordan");
        assert_eq!(fake.requests()[0].variables["company"], "Aurora Digital");
    }

    #[test]
    fn missing_template_is_a_validation_failure() {
        let source = MemoryJobSource::new().with_job("welcome_prompt.json", WELCOME_JOB);

        let outcome = build_artifacts(&context(source, ContentGenerator::Absent), None).unwrap();

        assert!(outcome.artifacts.is_empty());
        assert_eq!(outcome.failures[0].kind, FailureKind::Validation);
        assert!(outcome.failures[0].message.contains("welcome.txt"));
    }

    #[test]
    fn each_failure_stage_is_recorded_and_others_continue() {
        let source = MemoryJobSource::new()
            .with_job("a_prompt.json", r#"{"output_file_template": "a.html", "variables": {}}"#)
            .with_template("a.txt", "Hello {{missing}}")
            .with_job("b_prompt.json", r#"{"output_file_template": "b.html"}"#)
            .with_job("c_prompt.json", r#"{"output_file_template": "c.html", "variables": {}}"#)
            .with_template("c.txt", "please refuse")
            .with_job("d_prompt.json", r#"{"output_file_template": "d.html", "variables": {}}"#)
            .with_template("d.txt", "fine");
        let fake = FakeTextGenerator::echoing().denying("refuse");

        let ctx = context(source, ContentGenerator::Configured(Box::new(fake)));
        let outcome = build_artifacts(&ctx, None).unwrap();

        let failures: Vec<_> = outcome.failures.iter().map(|f| (f.job.as_str(), f.kind)).collect();
        assert_eq!(
            failures,
            vec![
                ("b_prompt.json", FailureKind::Validation),
                ("a_prompt.json", FailureKind::Render),
                ("c_prompt.json", FailureKind::GenerationDenied),
            ]
        );
        let paths: Vec<_> = outcome.artifacts.iter().map(|a| a.path().as_str()).collect();
        assert_eq!(paths, vec!["d.html"]);
    }

    #[test]
    fn job_may_not_claim_the_index_path_when_an_index_is_wanted() {
        let source = MemoryJobSource::new()
            .with_job(
                "home_prompt.json",
                r#"{"output_file_template": "index.html", "variables": {}, "make_index": true}"#,
            )
            .with_template("home.txt", "home");
        let index = OutputPath::parse("index.html").unwrap();

        let outcome =
            build_artifacts(&context(source, ContentGenerator::Absent), Some(&index)).unwrap();

        assert!(outcome.artifacts.is_empty());
        assert_eq!(outcome.failures[0].kind, FailureKind::Validation);
    }

    #[test]
    fn index_path_is_free_when_no_index_is_wanted() {
        let source = MemoryJobSource::new()
            .with_job(
                "home_prompt.json",
                r#"{"output_file_template": "index.html", "variables": {}}"#,
            )
            .with_template("home.txt", "home");
        let index = OutputPath::parse("index.html").unwrap();

        let outcome =
            build_artifacts(&context(source, ContentGenerator::Absent), Some(&index)).unwrap();

        assert!(outcome.failures.is_empty());
        assert!(!outcome.wants_index);
        assert_eq!(outcome.artifacts[0].path().as_str(), "index.html");
    }

    #[test]
    fn unsafe_rendered_path_is_a_validation_failure() {
        let source = MemoryJobSource::new()
            .with_job(
                "escape_prompt.json",
                r#"{"output_file_template": "../{{name}}.html", "variables": {"name": "x"}}"#,
            )
            .with_template("escape.txt", "body");

        let outcome = build_artifacts(&context(source, ContentGenerator::Absent), None).unwrap();

        assert_eq!(outcome.failures[0].kind, FailureKind::Validation);
    }
}
