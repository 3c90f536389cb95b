pub mod assets;
pub mod directory_object_store;
pub mod filesystem_job_source;
pub mod git_branch_probe;
pub mod memory_job_source;
pub mod memory_object_store;
pub mod s3_object_store;
pub mod template;
pub mod text_generator;
