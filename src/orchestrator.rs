//! Check orchestrator coordinating the validate workflow
//!
//! This module provides:
//! - Workflow coordination: validate selection → fetch snapshot → evaluate
//! - Parallel metadata fetches under a concurrency limit
//! - Partial continuation: one package's fetch failure degrades only that
//!   package, never the whole check
//! - The versions / suggest flows backed by the same registry

use crate::compat::{evaluate, EvaluationReport};
use crate::domain::{MetadataSnapshot, SelectedPackage};
use crate::error::{RegistryError, SelectionError};
use crate::progress::Progress;
use crate::registry::{CachedRegistry, HttpClient, PackageRegistry, PyPiRegistry};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Concurrency limit for metadata fetches
const DEFAULT_CONCURRENCY: usize = 10;

/// Maximum number of suggestions returned for a prefix
const SUGGEST_LIMIT: usize = 50;

/// Orchestrator for the compatibility check workflow
pub struct Orchestrator {
    /// Registry the snapshot is fetched from (cached PyPI in production,
    /// a stub in tests)
    registry: Arc<dyn PackageRegistry>,
    /// Semaphore bounding concurrent fetches
    semaphore: Arc<Semaphore>,
}

/// Result of running a check
pub struct CheckOutcome {
    /// The evaluation report for the selection
    pub report: EvaluationReport,
    /// Fetch errors encountered while building the snapshot; these are
    /// also reflected as degraded entries in the report
    pub errors: Vec<String>,
}

impl Orchestrator {
    /// Create an orchestrator backed by the cached PyPI registry
    pub fn new() -> Result<Self, RegistryError> {
        let client = HttpClient::new()?;
        let registry = CachedRegistry::new(PyPiRegistry::new(client));
        Ok(Self::with_registry(Arc::new(registry)))
    }

    /// Create an orchestrator with a custom registry (for testing)
    pub fn with_registry(registry: Arc<dyn PackageRegistry>) -> Self {
        Self {
            registry,
            semaphore: Arc::new(Semaphore::new(DEFAULT_CONCURRENCY)),
        }
    }

    /// Run a compatibility check for the given selection.
    ///
    /// Rejects an empty selection before any network activity. Fetches
    /// metadata for all packages concurrently, then evaluates the
    /// immutable snapshot.
    pub async fn check(
        &self,
        selection: &[SelectedPackage],
        python_version: Option<&str>,
        progress: &mut Progress,
    ) -> Result<CheckOutcome, SelectionError> {
        if selection.is_empty() {
            return Err(SelectionError::EmptySelection);
        }

        progress.start(selection.len() as u64, "Fetching package metadata");

        let mut handles = Vec::with_capacity(selection.len());
        for package in selection {
            let registry = Arc::clone(&self.registry);
            let semaphore = Arc::clone(&self.semaphore);
            let name = package.name.clone();
            let version = package.pinned_version.clone();
            handles.push(tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("fetch semaphore closed");
                let result = registry.fetch_metadata(&name, version.as_deref()).await;
                (name, result)
            }));
        }

        let mut snapshot = MetadataSnapshot::new();
        let mut errors = Vec::new();
        for handle in handles {
            let (name, result) = handle.await.expect("metadata fetch task panicked");
            progress.inc();
            match result {
                Ok(metadata) => snapshot.insert(&name, metadata),
                Err(error) => {
                    let message = error.to_string();
                    snapshot.insert_missing(&name, &message);
                    errors.push(message);
                }
            }
        }

        progress.finish("Metadata fetched");

        let report = evaluate(selection, &snapshot, python_version);
        Ok(CheckOutcome { report, errors })
    }

    /// List a package's release versions, latest first
    pub async fn versions(&self, name: &str) -> Result<Vec<String>, RegistryError> {
        self.registry.fetch_release_versions(name).await
    }

    /// Suggest package names starting with the given prefix
    pub async fn suggest(&self, prefix: &str) -> Result<Vec<String>, RegistryError> {
        let prefix = prefix.trim().to_lowercase();
        let names = self.registry.fetch_index_names().await?;
        Ok(names
            .into_iter()
            .filter(|name| name.to_lowercase().starts_with(&prefix))
            .take(SUGGEST_LIMIT)
            .collect())
    }
}
