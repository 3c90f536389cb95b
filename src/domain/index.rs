//! Aggregate listing of the artifacts published in a run.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub path: String,
    pub generated_at: String,
}

/// Ordered index entries; a path published twice keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexRecord {
    entries: Vec<IndexEntry>,
}

impl IndexRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: &str, generated_at: DateTime<Utc>) {
        let generated_at = generated_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        match self.entries.iter_mut().find(|entry| entry.path == path) {
            Some(entry) => entry.generated_at = generated_at,
            None => self.entries.push(IndexEntry { path: path.to_string(), generated_at }),
        }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
