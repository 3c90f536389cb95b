//! Destination scope an environment publishes into.

use std::fmt;
use std::path::PathBuf;

use crate::domain::{AppError, Environment, OutputPath};

const FILE_SCHEME: &str = "file://";

/// Where a namespace lives: an S3 bucket or a local directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Bucket(String),
    Directory(PathBuf),
}

impl Destination {
    /// Parse a destination identifier: `file://<dir>` or a bucket name.
    pub fn parse(identifier: &str) -> Result<Self, AppError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(AppError::config_error("Destination identifier is empty"));
        }

        if let Some(dir) = identifier.strip_prefix(FILE_SCHEME) {
            if dir.is_empty() {
                return Err(AppError::config_error(format!(
                    "Destination '{}' does not name a directory",
                    identifier
                )));
            }
            return Ok(Destination::Directory(PathBuf::from(dir)));
        }

        if identifier.contains('/') || identifier.chars().any(char::is_whitespace) {
            return Err(AppError::config_error(format!(
                "Invalid bucket name '{}'",
                identifier
            )));
        }

        Ok(Destination::Bucket(identifier.to_string()))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Bucket(bucket) => write!(f, "s3://{}", bucket),
            Destination::Directory(dir) => write!(f, "{}{}", FILE_SCHEME, dir.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    environment: Option<Environment>,
    destination: Destination,
    prefix: String,
}

impl Namespace {
    pub fn new(environment: Environment, destination: Destination, prefix: &str) -> Self {
        Self { environment: Some(environment), destination, prefix: normalize_prefix(prefix) }
    }

    /// Namespace rooted at a local directory, not tied to an environment.
    pub fn local(dir: impl Into<PathBuf>) -> Self {
        Self {
            environment: None,
            destination: Destination::Directory(dir.into()),
            prefix: String::new(),
        }
    }

    pub fn environment(&self) -> Option<Environment> {
        self.environment
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Object key for an artifact path.
    pub fn key_for(&self, path: &OutputPath) -> String {
        format!("{}{}", self.prefix, path)
    }
}

/// `"beta"`, `"/beta/"` and `"beta/"` all become `"beta/"`; blank stays empty.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() { String::new() } else { format!("{}/", trimmed) }
}
