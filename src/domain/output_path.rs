use std::fmt;

use crate::domain::AppError;

/// A validated, URL-safe relative path inside a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputPath(String);

impl OutputPath {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        check_relative_path(raw).map_err(|reason| AppError::InvalidOutputPath {
            path: raw.to_string(),
            reason: reason.to_string(),
        })?;
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File extension of the last segment, lower-cased.
    pub fn extension(&self) -> Option<String> {
        let file_name = self.0.rsplit('/').next()?;
        let (stem, ext) = file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

impl fmt::Display for OutputPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OutputPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check that `raw` is a non-empty relative path of safe segments.
pub(crate) fn check_relative_path(raw: &str) -> Result<(), &'static str> {
    if raw.trim().is_empty() {
        return Err("path is empty");
    }
    if raw.starts_with('/') {
        return Err("path must be relative");
    }
    if let Some(ch) = raw.chars().find(|ch| !is_safe_char(*ch)) {
        return Err(if ch == '\\' {
            "use '/' as the separator"
        } else {
            "only letters, digits, '.', '_', '-', '~' and '/' are allowed"
        });
    }
    for segment in raw.split('/') {
        match segment {
            "" => return Err("path contains an empty segment"),
            "." | ".." => return Err("path must not contain '.' or '..' segments"),
            _ => {}
        }
    }
    Ok(())
}

fn is_safe_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-' | '~' | '/')
}
