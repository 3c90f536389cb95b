//! Configuration models loaded from `promptsite.toml`.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::domain::output_path::check_relative_path;
use crate::domain::{AppError, OutputPath};

/// Contents of `promptsite.toml`. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub environments: EnvironmentsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub generator: GeneratorSettings,
}

/// Where job files and templates live, and where the index is published.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    #[serde(default = "default_jobs_dir")]
    pub jobs_dir: PathBuf,
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,
    #[serde(default = "default_index_path")]
    pub index_path: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            jobs_dir: default_jobs_dir(),
            templates_dir: default_templates_dir(),
            index_path: default_index_path(),
        }
    }
}

impl PathsConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        OutputPath::parse(&self.index_path).map_err(|err| {
            AppError::config_error(format!("paths.index_path is invalid: {}", err))
        })?;
        Ok(())
    }
}

fn default_jobs_dir() -> PathBuf {
    PathBuf::from("prompts")
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("prompt_templates")
}

fn default_index_path() -> String {
    "index.html".to_string()
}

/// Branch-to-environment mapping and the per-environment destinations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentsConfig {
    #[serde(default = "default_primary_branch")]
    pub primary_branch: String,
    #[serde(default = "default_beta_prefix")]
    pub beta_prefix: String,
    #[serde(default = "default_prod_prefix")]
    pub prod_prefix: String,
    #[serde(default)]
    pub beta_bucket: Option<String>,
    #[serde(default)]
    pub prod_bucket: Option<String>,
}

impl Default for EnvironmentsConfig {
    fn default() -> Self {
        Self {
            primary_branch: default_primary_branch(),
            beta_prefix: default_beta_prefix(),
            prod_prefix: default_prod_prefix(),
            beta_bucket: None,
            prod_bucket: None,
        }
    }
}

impl EnvironmentsConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.primary_branch.trim().is_empty() {
            return Err(AppError::config_error("primary_branch must not be empty"));
        }
        let prefixes = [("beta_prefix", &self.beta_prefix), ("prod_prefix", &self.prod_prefix)];
        for (name, prefix) in prefixes {
            let trimmed = prefix.trim().trim_matches('/');
            if !trimmed.is_empty() {
                check_relative_path(trimmed).map_err(|reason| {
                    AppError::config_error(format!("{} '{}' is invalid: {}", name, prefix, reason))
                })?;
            }
        }
        Ok(())
    }
}

fn default_primary_branch() -> String {
    "main".to_string()
}

fn default_beta_prefix() -> String {
    "beta/".to_string()
}

fn default_prod_prefix() -> String {
    "prod/".to_string()
}

/// Object store connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default)]
    pub region: Option<String>,
    /// Custom S3-compatible endpoint (MinIO, LocalStack).
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Wire protocol spoken by the text generation endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorProtocol {
    /// Anthropic Messages API: `x-api-key` + `anthropic-version` headers.
    #[default]
    Messages,
    /// Bedrock `InvokeModel`: bearer token, version in the body, model in the URL.
    Bedrock,
}

impl GeneratorProtocol {
    pub fn default_version(&self) -> &'static str {
        match self {
            GeneratorProtocol::Messages => "2023-06-01",
            GeneratorProtocol::Bedrock => "bedrock-2023-05-31",
        }
    }
}

/// Text generation settings. Generation is disabled when `api_url` is unset.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSettings {
    #[serde(default)]
    pub api_url: Option<Url>,
    #[serde(default)]
    pub protocol: GeneratorProtocol,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub anthropic_version: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Read from the environment only, never from the file.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            api_url: None,
            protocol: GeneratorProtocol::default(),
            model: default_model(),
            anthropic_version: None,
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            api_key: None,
        }
    }
}

impl fmt::Debug for GeneratorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorSettings")
            .field("api_url", &self.api_url.as_ref().map(Url::as_str))
            .field("protocol", &self.protocol)
            .field("model", &self.model)
            .field("anthropic_version", &self.anthropic_version)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GeneratorSettings {
    pub fn is_enabled(&self) -> bool {
        self.api_url.is_some()
    }

    /// Version string sent to the endpoint, falling back to the protocol default.
    pub fn version(&self) -> &str {
        self.anthropic_version.as_deref().unwrap_or_else(|| self.protocol.default_version())
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_tokens == 0 {
            return Err(AppError::config_error("max_tokens must be greater than 0"));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("timeout_secs must be greater than 0"));
        }
        if self.max_retries == 0 {
            return Err(AppError::config_error("max_retries must be greater than 0"));
        }
        if self.retry_delay_ms == 0 {
            return Err(AppError::config_error("retry_delay_ms must be greater than 0"));
        }
        if self.protocol == GeneratorProtocol::Messages && self.model.trim().is_empty() {
            return Err(AppError::config_error("model must not be empty for the messages protocol"));
        }
        Ok(())
    }
}

fn default_model() -> String {
    "claude-3-sonnet-20240229".to_string()
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_conventional_layout() {
        let config = FileConfig::default();
        assert_eq!(config.paths.jobs_dir, PathBuf::from("prompts"));
        assert_eq!(config.paths.templates_dir, PathBuf::from("prompt_templates"));
        assert_eq!(config.paths.index_path, "index.html");
        assert_eq!(config.environments.primary_branch, "main");
        assert_eq!(config.environments.beta_prefix, "beta/");
        assert_eq!(config.environments.prod_prefix, "prod/");
        assert!(!config.generator.is_enabled());
        assert_eq!(config.generator.max_tokens, 2000);
    }

    #[test]
    fn validate_rejects_zero_retry_settings() {
        let settings = GeneratorSettings { max_retries: 0, ..Default::default() };
        assert!(settings.validate().is_err());

        let settings = GeneratorSettings { retry_delay_ms: 0, ..Default::default() };
        assert!(settings.validate().is_err());

        let settings = GeneratorSettings { timeout_secs: 0, ..Default::default() };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_rejects_traversing_prefix() {
        let environments =
            EnvironmentsConfig { beta_prefix: "../beta/".to_string(), ..Default::default() };
        assert!(environments.validate().is_err());

        let environments = EnvironmentsConfig { prod_prefix: String::new(), ..Default::default() };
        assert!(environments.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unsafe_index_path() {
        let paths = PathsConfig { index_path: "../index.html".to_string(), ..Default::default() };
        let err = paths.validate().unwrap_err();
        assert!(matches!(err, AppError::Configuration(msg) if msg.contains("index_path")));
    }

    #[test]
    fn version_falls_back_to_protocol_default() {
        let mut settings = GeneratorSettings::default();
        assert_eq!(settings.version(), "2023-06-01");
        settings.protocol = GeneratorProtocol::Bedrock;
        assert_eq!(settings.version(), "bedrock-2023-05-31");
        settings.anthropic_version = Some("custom".to_string());
        assert_eq!(settings.version(), "custom");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let settings =
            GeneratorSettings { api_key: Some("sk-secret".to_string()), ..Default::default() };
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
