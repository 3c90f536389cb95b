use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::domain::AppError;
use crate::ports::ObjectStore;

/// Object store backed by a local directory; keys map to relative file paths.
#[derive(Debug, Clone)]
pub struct DirectoryObjectStore {
    root: PathBuf,
}

impl DirectoryObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, key: &str) -> PathBuf {
        key.split('/').fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

impl ObjectStore for DirectoryObjectStore {
    fn put(&self, key: &str, body: &[u8], _content_type: &str) -> Result<(), AppError> {
        let target = self.resolve(key);
        let publish_error = |err: std::io::Error| AppError::Publish {
            key: key.to_string(),
            message: format!("Failed to write {}: {}", target.display(), err),
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(publish_error)?;
        }
        fs::write(&target, body).map_err(publish_error)?;
        debug!(path = %target.display(), "wrote object");
        Ok(())
    }

    fn location(&self, key: &str) -> String {
        format!("file://{}", self.resolve(key).display())
    }
}
