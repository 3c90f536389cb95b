//! Shared testing utilities for promptsite CLI and library tests.

use assert_cmd::Command;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables the binary reads from the process environment.
const CONFIG_VARS: &[&str] = &[
    "DEPLOY_ENV",
    "GITHUB_REF_NAME",
    "BRANCH_NAME",
    "PRIMARY_BRANCH",
    "S3_BUCKET_BETA",
    "S3_BUCKET_PROD",
    "BETA_PREFIX",
    "PROD_PREFIX",
    "AWS_REGION",
    "AWS_DEFAULT_REGION",
    "S3_ENDPOINT",
    "GENERATOR_API_URL",
    "GENERATOR_MODEL",
    "GENERATOR_API_KEY",
    "PROMPTSITE_LOG",
];

pub const WELCOME_JOB: &str = r#"{
  "output_file_template": "welcome_{{name|lower}}.html",
  "variables": {"name": "Jordan", "company": "Aurora Digital"},
  "make_index": true
}"#;

pub const WELCOME_TEMPLATE: &str = "Hello {{name}},\nWelcome to **{{company}}**!";

/// Testing harness providing an isolated project directory and a local publish target.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment with empty `prompts/` and `prompt_templates/`.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(work_dir.join("prompts")).expect("Failed to create prompts directory");
        fs::create_dir_all(work_dir.join("prompt_templates"))
            .expect("Failed to create templates directory");
        Self { root, work_dir }
    }

    /// Path to the project directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Local directory standing in for the object store.
    pub fn site_dir(&self) -> PathBuf {
        self.root.path().join("site")
    }

    /// `file://` destination identifier for `site_dir()`.
    pub fn site_destination(&self) -> String {
        format!("file://{}", self.site_dir().display())
    }

    pub fn write_job(&self, name: &str, content: &str) {
        fs::write(self.work_dir.join("prompts").join(name), content).expect("Failed to write job");
    }

    pub fn write_template(&self, name: &str, content: &str) {
        let path = self.work_dir.join("prompt_templates").join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create template directory");
        }
        fs::write(path, content).expect("Failed to write template");
    }

    /// Write the job and template used by most scenarios.
    pub fn write_welcome_job(&self) {
        self.write_job("welcome_prompt.json", WELCOME_JOB);
        self.write_template("welcome.txt", WELCOME_TEMPLATE);
    }

    /// Read a published object relative to `site_dir()`.
    pub fn read_site(&self, key: &str) -> String {
        fs::read_to_string(self.site_dir().join(key))
            .unwrap_or_else(|e| panic!("Failed to read published object {}: {}", key, e))
    }

    /// Build a command for the compiled binary with a clean configuration environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("promptsite").expect("Failed to locate promptsite binary");
        cmd.current_dir(&self.work_dir);
        for var in CONFIG_VARS {
            cmd.env_remove(var);
        }
        cmd.env("S3_BUCKET_BETA", self.site_destination())
            .env("S3_BUCKET_PROD", self.site_destination());
        cmd
    }

    /// Execute a closure after temporarily switching into the work directory.
    pub fn with_work_dir<F, R>(&self, action: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::current_dir().expect("Failed to capture current dir");
        env::set_current_dir(&self.work_dir).expect("Failed to switch current dir");
        let result = action();
        env::set_current_dir(original).expect("Failed to restore current dir");
        result
    }
}
