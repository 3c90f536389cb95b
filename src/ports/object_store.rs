//! Object store port definition.

use crate::domain::AppError;

/// Port for writing objects into one destination (bucket or directory).
pub trait ObjectStore {
    /// Write `body` at `key`, replacing any existing object.
    fn put(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), AppError>;

    /// Human-readable location of `key`, e.g. `s3://bucket/key`.
    fn location(&self, key: &str) -> String;
}
