pub mod job_spec;
pub mod resolver;

pub use job_spec::{JOB_FILE_SUFFIX, JobFormat, JobSpec, topic_of};
pub use resolver::{Resolution, ResolvedJob, load_job, resolve_jobs};
