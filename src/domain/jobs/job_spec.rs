//! Typed job records and their validation.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::AppError;
use crate::domain::output_path::check_relative_path;

/// Suffix stripped from a job file stem to find its topic.
pub const JOB_FILE_SUFFIX: &str = "_prompt";

/// Serialization format of a job file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobFormat {
    Json,
    Yaml,
}

impl JobFormat {
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(JobFormat::Json),
            "yml" | "yaml" => Some(JobFormat::Yaml),
            _ => None,
        }
    }
}

/// One render-and-publish unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub output_file_template: String,
    pub variables: BTreeMap<String, String>,
    pub make_index: bool,
    /// Template file name relative to the templates directory, if not derived from the topic.
    pub template: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawJobSpec {
    #[serde(default, alias = "output_file")]
    output_file_template: Option<String>,
    #[serde(default)]
    variables: Option<BTreeMap<String, ScalarValue>>,
    #[serde(default)]
    make_index: Option<bool>,
    #[serde(default)]
    template: Option<String>,
}

/// Variable values are text; plain numbers and booleans are accepted and stringified.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScalarValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl ScalarValue {
    fn into_text(self) -> String {
        match self {
            ScalarValue::Text(value) => value,
            ScalarValue::Integer(value) => value.to_string(),
            ScalarValue::Float(value) => value.to_string(),
            ScalarValue::Bool(value) => value.to_string(),
        }
    }
}

impl JobSpec {
    /// Parse and validate the content of job file `job`.
    pub fn parse(job: &str, format: JobFormat, content: &str) -> Result<Self, AppError> {
        let parse_error = |details: String| AppError::JobParse { job: job.to_string(), details };

        let raw: RawJobSpec = match format {
            JobFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
            JobFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
        };

        let output_file_template =
            raw.output_file_template.filter(|template| !template.trim().is_empty());

        let mut missing = Vec::new();
        if output_file_template.is_none() {
            missing.push("output_file_template".to_string());
        }
        if raw.variables.is_none() {
            missing.push("variables".to_string());
        }

        let (Some(output_file_template), Some(variables)) = (output_file_template, raw.variables)
        else {
            return Err(AppError::MissingFields { job: job.to_string(), fields: missing });
        };

        if let Some(template) = &raw.template {
            check_relative_path(template).map_err(|reason| {
                parse_error(format!(
                    "template '{}' is not a safe relative path: {}",
                    template, reason
                ))
            })?;
        }

        Ok(JobSpec {
            output_file_template,
            variables: variables.into_iter().map(|(k, v)| (k, v.into_text())).collect(),
            make_index: raw.make_index.unwrap_or(false),
            template: raw.template,
        })
    }

    /// Template file name for job file `job`: explicit field, else `<topic>.txt`.
    pub fn template_name(&self, job: &str) -> String {
        match &self.template {
            Some(template) => template.clone(),
            None => format!("{}.txt", topic_of(job)),
        }
    }
}

/// Topic of a job file: its stem without the `_prompt` suffix.
pub fn topic_of(job: &str) -> &str {
    let stem = match job.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => job,
    };
    stem.strip_suffix(JOB_FILE_SUFFIX).filter(|topic| !topic.is_empty()).unwrap_or(stem)
}
