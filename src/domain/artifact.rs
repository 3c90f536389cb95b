use crate::domain::OutputPath;

const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// One rendered file ready to be written to a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    job: String,
    path: OutputPath,
    content: Vec<u8>,
    content_type: String,
}

impl RenderedArtifact {
    pub fn new(job: impl Into<String>, path: OutputPath, content: impl Into<Vec<u8>>) -> Self {
        let content_type = content_type_for(&path).to_string();
        Self { job: job.into(), path, content: content.into(), content_type }
    }

    /// Identifier of the job that produced this artifact.
    pub fn job(&self) -> &str {
        &self.job
    }

    pub fn path(&self) -> &OutputPath {
        &self.path
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

/// MIME type derived from the artifact's extension.
pub fn content_type_for(path: &OutputPath) -> &'static str {
    match path.extension().as_deref() {
        Some("html" | "htm") => "text/html",
        Some("md" | "markdown") => "text/markdown",
        Some("txt") => "text/plain",
        Some("json") => "application/json",
        Some("css") => "text/css",
        Some("xml") => "application/xml",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
