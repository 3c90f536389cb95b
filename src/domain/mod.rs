pub mod artifact;
pub mod configuration;
pub mod environment;
pub mod error;
pub mod generation;
pub mod index;
pub mod jobs;
pub mod namespace;
pub mod output_path;
pub mod publisher;
pub mod report;
pub mod template;

pub use artifact::{RenderedArtifact, content_type_for};
pub use configuration::{AppConfig, GeneratorProtocol, GeneratorSettings, StorageConfig};
pub use environment::{Environment, TriggerContext, select_environment};
pub use error::{AppError, FailureKind};
pub use generation::ContentGenerator;
pub use index::{IndexEntry, IndexRecord};
pub use jobs::{JobFormat, JobSpec, Resolution, ResolvedJob, resolve_jobs};
pub use namespace::{Destination, Namespace};
pub use output_path::OutputPath;
pub use publisher::{IndexPage, PublishOutcome, Publisher};
pub use report::{JobFailure, PublishedArtifact, RunReport};
pub use template::{RenderedJob, TemplateRenderer, render_job};
