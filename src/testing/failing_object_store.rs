use crate::adapters::memory_object_store::MemoryObjectStore;
use crate::domain::AppError;
use crate::ports::ObjectStore;

/// Memory store that rejects writes to one key.
#[derive(Debug, Clone)]
pub struct FailingObjectStore {
    failing_key: String,
    inner: MemoryObjectStore,
}

impl FailingObjectStore {
    pub fn failing_on(key: impl Into<String>) -> Self {
        Self { failing_key: key.into(), inner: MemoryObjectStore::new() }
    }

    pub fn inner(&self) -> &MemoryObjectStore {
        &self.inner
    }
}

impl ObjectStore for FailingObjectStore {
    fn put(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), AppError> {
        if key == self.failing_key {
            return Err(AppError::Publish {
                key: key.to_string(),
                message: "simulated write failure".to_string(),
            });
        }
        self.inner.put(key, body, content_type)
    }

    fn location(&self, key: &str) -> String {
        self.inner.location(key)
    }
}
