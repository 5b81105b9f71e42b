//! Package metadata as seen by the evaluator
//!
//! The evaluator runs on an immutable snapshot: one entry per selected
//! package, either the fetched metadata or the error that prevented the
//! fetch. Failed entries evaluate as if they declared nothing, so a fetch
//! failure degrades one package's report without poisoning the rest.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The slice of PyPI metadata the compatibility checks consume
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Raw `requires_dist` strings, unparsed
    pub requirements: Vec<String>,
    /// Trove classifier strings
    pub classifiers: Vec<String>,
}

impl PackageMetadata {
    /// Create metadata from requirement and classifier lists
    pub fn new(requirements: Vec<String>, classifiers: Vec<String>) -> Self {
        Self {
            requirements,
            classifiers,
        }
    }
}

/// Snapshot entry for one selected package
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotEntry {
    /// Metadata was fetched successfully
    Available(PackageMetadata),
    /// The fetch failed; the message is surfaced in that package's report
    Missing(String),
}

impl SnapshotEntry {
    /// Metadata to evaluate with; a missing entry declares nothing
    pub fn metadata(&self) -> Option<&PackageMetadata> {
        match self {
            SnapshotEntry::Available(metadata) => Some(metadata),
            SnapshotEntry::Missing(_) => None,
        }
    }

    /// The fetch error, if the entry is degraded
    pub fn fetch_error(&self) -> Option<&str> {
        match self {
            SnapshotEntry::Available(_) => None,
            SnapshotEntry::Missing(message) => Some(message),
        }
    }
}

/// Immutable metadata snapshot keyed by lowercased package name
#[derive(Debug, Clone, Default)]
pub struct MetadataSnapshot {
    entries: HashMap<String, SnapshotEntry>,
}

impl MetadataSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Record fetched metadata for a package
    pub fn insert(&mut self, name: impl Into<String>, metadata: PackageMetadata) {
        self.entries.insert(
            name.into().to_lowercase(),
            SnapshotEntry::Available(metadata),
        );
    }

    /// Record a fetch failure for a package
    pub fn insert_missing(&mut self, name: impl Into<String>, error: impl Into<String>) {
        self.entries
            .insert(name.into().to_lowercase(), SnapshotEntry::Missing(error.into()));
    }

    /// Look up the entry for a package
    pub fn get(&self, name: &str) -> Option<&SnapshotEntry> {
        self.entries.get(&name.to_lowercase())
    }

    /// Number of entries in the snapshot
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
