use crate::domain::{ContentGenerator, TemplateRenderer};
use crate::ports::JobSource;

/// Application context holding dependencies for command execution.
pub struct AppContext<J: JobSource, R: TemplateRenderer> {
    jobs: J,
    renderer: R,
    generator: ContentGenerator,
}

impl<J: JobSource, R: TemplateRenderer> AppContext<J, R> {
    /// Create a new application context.
    pub fn new(jobs: J, renderer: R, generator: ContentGenerator) -> Self {
        Self { jobs, renderer, generator }
    }

    /// Get a reference to the job source.
    pub fn jobs(&self) -> &J {
        &self.jobs
    }

    /// Get a reference to the template renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn generator(&self) -> &ContentGenerator {
        &self.generator
    }
}
