//! Writes artifacts into a namespace and maintains the index artifact.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::domain::{
    AppError, IndexRecord, JobFailure, Namespace, OutputPath, PublishedArtifact, RenderedArtifact,
    TemplateRenderer,
};
use crate::ports::ObjectStore;

/// Where the index goes and the template it is rendered from.
#[derive(Debug, Clone)]
pub struct IndexPage<'a> {
    pub path: &'a OutputPath,
    pub template: &'a str,
}

#[derive(Debug, Default)]
pub struct PublishOutcome {
    pub published: Vec<PublishedArtifact>,
    pub failures: Vec<JobFailure>,
}

pub struct Publisher<'a> {
    namespace: &'a Namespace,
    store: &'a dyn ObjectStore,
}

impl<'a> Publisher<'a> {
    pub fn new(namespace: &'a Namespace, store: &'a dyn ObjectStore) -> Self {
        Self { namespace, store }
    }

    pub fn namespace(&self) -> &Namespace {
        self.namespace
    }

    /// Write one artifact, overwriting whatever is stored at its key.
    pub fn publish(&self, artifact: &RenderedArtifact) -> Result<PublishedArtifact, AppError> {
        let key = self.namespace.key_for(artifact.path());
        self.store.put(&key, artifact.content(), artifact.content_type())?;
        info!(key = %key, bytes = artifact.content().len(), "published artifact");

        Ok(PublishedArtifact {
            job: artifact.job().to_string(),
            path: artifact.path().to_string(),
            location: self.store.location(&key),
            key,
            content_type: artifact.content_type().to_string(),
            sha256: sha256_hex(artifact.content()),
            bytes: artifact.content().len(),
        })
    }

    /// Publish every artifact in order. A failed write is recorded and the
    /// remaining artifacts are still attempted.
    pub fn publish_all(&self, artifacts: &[RenderedArtifact]) -> PublishOutcome {
        let mut outcome = PublishOutcome::default();
        for artifact in artifacts {
            match self.publish(artifact) {
                Ok(published) => outcome.published.push(published),
                Err(err) => {
                    warn!(
                        job = artifact.job(),
                        path = %artifact.path(),
                        error = %err,
                        "publish failed"
                    );
                    outcome.failures.push(JobFailure::from_error(artifact.job(), &err));
                }
            }
        }
        outcome
    }

    /// Render and publish the index listing `published`.
    pub fn publish_index(
        &self,
        published: &[PublishedArtifact],
        page: &IndexPage<'_>,
        renderer: &(impl TemplateRenderer + ?Sized),
        generated_at: DateTime<Utc>,
    ) -> Result<PublishedArtifact, AppError> {
        let mut record = IndexRecord::new();
        for artifact in published {
            record.record(&artifact.path, generated_at);
        }

        let context = index_context(&record, page.path, self.namespace, generated_at);
        let html = renderer.render(page.path.as_str(), page.template, &context)?;
        let artifact = RenderedArtifact::new(page.path.as_str(), page.path.clone(), html);
        self.publish(&artifact)
    }
}

fn index_context(
    record: &IndexRecord,
    index_path: &OutputPath,
    namespace: &Namespace,
    generated_at: DateTime<Utc>,
) -> Value {
    let up = "../".repeat(index_path.as_str().matches('/').count());
    let entries: Vec<Value> = record
        .entries()
        .iter()
        .map(|entry| {
            json!({
                "path": entry.path,
                "href": format!("{}{}", up, entry.path),
                "generated_at": entry.generated_at,
            })
        })
        .collect();

    json!({
        "environment": namespace.environment().map(|env| env.as_str()),
        "generated_at": generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        "entries": entries,
    })
}

fn sha256_hex(content: &[u8]) -> String {
    format!("{:x}", Sha256::digest(content))
}
