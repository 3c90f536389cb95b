//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together configuration
//! loading, adapter construction and command execution.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use crate::adapters::assets::index_template;
use crate::adapters::directory_object_store::DirectoryObjectStore;
use crate::adapters::filesystem_job_source::FilesystemJobSource;
use crate::adapters::git_branch_probe::GitBranchProbe;
use crate::adapters::s3_object_store::S3ObjectStore;
use crate::adapters::template::MinijinjaTemplateRenderer;
use crate::adapters::text_generator;
use crate::app::{
    AppContext,
    commands::{env, publish, render},
};
use crate::domain::{
    ContentGenerator, Destination, IndexPage, Namespace, OutputPath, Publisher, StorageConfig,
};
use crate::ports::ObjectStore;

pub use crate::domain::{AppConfig, AppError, Environment, RunReport};

/// Config file read from the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "promptsite.toml";
/// Default directory for local copies written by `render`.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// Command-line values that take precedence over the config file and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub env: Option<String>,
    pub branch: Option<String>,
    pub jobs_dir: Option<PathBuf>,
    pub templates_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct PublishOptions {
    pub overrides: ConfigOverrides,
    /// Write the JSON run report here.
    pub report: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub overrides: ConfigOverrides,
    pub out_dir: PathBuf,
    /// Run the text generator when one is configured.
    pub generate: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            overrides: ConfigOverrides::default(),
            out_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            generate: true,
        }
    }
}

type FilesystemContext = AppContext<FilesystemJobSource, MinijinjaTemplateRenderer>;

/// Build the run configuration from the config file, the process environment and `overrides`.
pub fn load_config(overrides: &ConfigOverrides) -> Result<AppConfig, AppError> {
    let content = match &overrides.config_file {
        Some(path) => Some(fs::read_to_string(path).map_err(|err| {
            AppError::config_error(format!(
                "Failed to read config file {}: {}",
                path.display(),
                err
            ))
        })?),
        None => {
            let default = Path::new(CONFIG_FILE);
            if default.is_file() { Some(fs::read_to_string(default)?) } else { None }
        }
    };

    let mut config = AppConfig::load(content.as_deref(), |key| std::env::var(key).ok())?;
    apply_overrides(&mut config, overrides);
    debug!(?config, "configuration loaded");
    Ok(config)
}

fn apply_overrides(config: &mut AppConfig, overrides: &ConfigOverrides) {
    if let Some(env) = &overrides.env {
        config.trigger.override_env = Some(env.clone());
    }
    if let Some(branch) = &overrides.branch {
        config.trigger.branch = Some(branch.clone());
    }
    if let Some(dir) = &overrides.jobs_dir {
        config.paths.jobs_dir = dir.clone();
    }
    if let Some(dir) = &overrides.templates_dir {
        config.paths.templates_dir = dir.clone();
    }
}

fn create_context(config: &AppConfig, generate: bool) -> Result<FilesystemContext, AppError> {
    let jobs = FilesystemJobSource::new(&config.paths.jobs_dir, &config.paths.templates_dir);
    let generator = if generate {
        text_generator::from_settings(&config.generator)?
    } else {
        ContentGenerator::Absent
    };
    Ok(AppContext::new(jobs, MinijinjaTemplateRenderer::new(), generator))
}

/// Open the object store backing `namespace`.
fn open_store(
    namespace: &Namespace,
    storage: &StorageConfig,
) -> Result<Box<dyn ObjectStore>, AppError> {
    match namespace.destination() {
        Destination::Bucket(bucket) => Ok(Box::new(S3ObjectStore::open(bucket, storage)?)),
        Destination::Directory(dir) => Ok(Box::new(DirectoryObjectStore::new(dir))),
    }
}

// =============================================================================
// Environment API
// =============================================================================

/// Select the target environment for the current trigger context.
pub fn select_env(overrides: &ConfigOverrides) -> Result<Environment, AppError> {
    select_env_with_config(&load_config(overrides)?)
}

/// Select the environment from an already-built configuration.
pub fn select_env_with_config(config: &AppConfig) -> Result<Environment, AppError> {
    let probe = GitBranchProbe::new(std::env::current_dir()?);
    env::execute(config, &probe)
}

// =============================================================================
// Publish API
// =============================================================================

/// Render every job and publish it to the namespace of the selected environment.
pub fn publish(options: &PublishOptions) -> Result<RunReport, AppError> {
    let config = load_config(&options.overrides)?;
    publish_with_config(&config, options.report.as_deref())
}

/// Publish using an already-built configuration.
///
/// Configuration problems (environment, bucket, region, generator settings)
/// fail before any job is read.
pub fn publish_with_config(
    config: &AppConfig,
    report_path: Option<&Path>,
) -> Result<RunReport, AppError> {
    let environment = select_env_with_config(config)?;
    let namespace = config.namespace(environment)?;
    let store = open_store(&namespace, &config.storage)?;
    let index_path = OutputPath::parse(&config.paths.index_path)?;
    let index = IndexPage { path: &index_path, template: index_template()? };
    let ctx = create_context(config, true)?;

    info!(
        environment = %environment,
        destination = %namespace.destination(),
        prefix = namespace.prefix(),
        "publishing"
    );
    let publisher = Publisher::new(&namespace, store.as_ref());
    let report = publish::execute(&ctx, &publisher, &index, Utc::now())?;

    if let Some(path) = report_path {
        write_report(path, &report)?;
    }
    Ok(report)
}

// =============================================================================
// Render API
// =============================================================================

/// Render every job into a local directory without touching the object store.
pub fn render(options: &RenderOptions) -> Result<RunReport, AppError> {
    let config = load_config(&options.overrides)?;
    render_with_config(&config, &options.out_dir, options.generate)
}

/// Render using an already-built configuration.
pub fn render_with_config(
    config: &AppConfig,
    out_dir: &Path,
    generate: bool,
) -> Result<RunReport, AppError> {
    let ctx = create_context(config, generate)?;
    let namespace = Namespace::local(out_dir);
    let store = DirectoryObjectStore::new(out_dir);
    let publisher = Publisher::new(&namespace, &store);
    render::execute(&ctx, &publisher, Utc::now())
}

fn write_report(path: &Path, report: &RunReport) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, report.to_json()?)?;
    Ok(())
}
