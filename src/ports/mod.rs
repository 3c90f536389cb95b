mod branch_probe;
mod job_source;
mod object_store;
mod text_generator;

pub use branch_probe::BranchProbe;
pub use job_source::JobSource;
pub use object_store::ObjectStore;
pub use text_generator::{GenerationRequest, TextGenerator};
