//! Build the run configuration from the config file and process environment.

use url::Url;

use super::settings::{
    EnvironmentsConfig, FileConfig, GeneratorSettings, PathsConfig, StorageConfig,
};
use crate::domain::{AppError, Destination, Environment, Namespace, TriggerContext};

pub const DEPLOY_ENV: &str = "DEPLOY_ENV";
pub const BRANCH_VARS: [&str; 2] = ["GITHUB_REF_NAME", "BRANCH_NAME"];
pub const PRIMARY_BRANCH: &str = "PRIMARY_BRANCH";
pub const S3_BUCKET_BETA: &str = "S3_BUCKET_BETA";
pub const S3_BUCKET_PROD: &str = "S3_BUCKET_PROD";
pub const BETA_PREFIX: &str = "BETA_PREFIX";
pub const PROD_PREFIX: &str = "PROD_PREFIX";
pub const REGION_VARS: [&str; 2] = ["AWS_REGION", "AWS_DEFAULT_REGION"];
pub const S3_ENDPOINT: &str = "S3_ENDPOINT";
pub const GENERATOR_API_URL: &str = "GENERATOR_API_URL";
pub const GENERATOR_MODEL: &str = "GENERATOR_MODEL";
pub const GENERATOR_API_KEY: &str = "GENERATOR_API_KEY";

/// Fully resolved configuration for one run, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub environments: EnvironmentsConfig,
    pub storage: StorageConfig,
    pub generator: GeneratorSettings,
    pub trigger: TriggerContext,
}

impl AppConfig {
    /// Parse `file` (if any), overlay variables from `lookup`, and validate.
    pub fn load<F>(file: Option<&str>, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_config = match file {
            Some(content) => parse_config_content(content)?,
            None => FileConfig::default(),
        };

        let mut config = AppConfig {
            paths: file_config.paths,
            environments: file_config.environments,
            storage: file_config.storage,
            generator: file_config.generator,
            trigger: TriggerContext::default(),
        };
        config.apply_env(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.paths.validate()?;
        self.environments.validate()?;
        self.generator.validate()?;
        Ok(())
    }

    /// Namespace for `environment`. A missing bucket is fatal.
    pub fn namespace(&self, environment: Environment) -> Result<Namespace, AppError> {
        let (identifier, prefix, variable) = match environment {
            Environment::Beta => (
                self.environments.beta_bucket.as_deref(),
                self.environments.beta_prefix.as_str(),
                S3_BUCKET_BETA,
            ),
            Environment::Prod => (
                self.environments.prod_bucket.as_deref(),
                self.environments.prod_prefix.as_str(),
                S3_BUCKET_PROD,
            ),
        };

        let identifier = identifier.map(str::trim).filter(|value| !value.is_empty()).ok_or_else(
            || {
                AppError::config_error(format!(
                    "No bucket defined for environment '{}'. Set {} and try again.",
                    environment, variable
                ))
            },
        )?;

        Ok(Namespace::new(environment, Destination::parse(identifier)?, prefix))
    }

    fn apply_env<F>(&mut self, lookup: &F) -> Result<(), AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let first = |keys: &[&str]| keys.iter().find_map(|key| var(*key));

        if let Some(value) = var(DEPLOY_ENV) {
            self.trigger.override_env = Some(value);
        }
        if let Some(value) = first(&BRANCH_VARS) {
            self.trigger.branch = Some(value);
        }
        if let Some(value) = var(PRIMARY_BRANCH) {
            self.environments.primary_branch = value;
        }
        if let Some(value) = var(S3_BUCKET_BETA) {
            self.environments.beta_bucket = Some(value);
        }
        if let Some(value) = var(S3_BUCKET_PROD) {
            self.environments.prod_bucket = Some(value);
        }
        // Prefixes may be deliberately set to the empty string.
        if let Some(value) = lookup(BETA_PREFIX) {
            self.environments.beta_prefix = value;
        }
        if let Some(value) = lookup(PROD_PREFIX) {
            self.environments.prod_prefix = value;
        }
        if let Some(value) = first(&REGION_VARS) {
            self.storage.region = Some(value);
        }
        if let Some(value) = var(S3_ENDPOINT) {
            self.storage.endpoint = Some(value);
        }
        if let Some(value) = var(GENERATOR_API_URL) {
            let url = Url::parse(&value).map_err(|err| {
                AppError::config_error(format!("{} is not a valid URL: {}", GENERATOR_API_URL, err))
            })?;
            self.generator.api_url = Some(url);
        }
        if let Some(value) = var(GENERATOR_MODEL) {
            self.generator.model = value;
        }
        self.generator.api_key = var(GENERATOR_API_KEY);
        Ok(())
    }
}

/// Parse `promptsite.toml` content.
pub fn parse_config_content(content: &str) -> Result<FileConfig, AppError> {
    let config: FileConfig = toml::from_str(content)?;
    Ok(config)
}
