//! PyPI access layer
//!
//! This module provides:
//! - The `PackageRegistry` trait the rest of the crate depends on
//! - HTTP client shared foundation with retry logic
//! - PyPI JSON API adapter
//! - TTL cache decorator (injected, never global)

mod cache;
mod client;
mod pypi;

pub use cache::{CacheConfig, CachedRegistry};
pub use client::HttpClient;
pub use pypi::PyPiRegistry;

use crate::domain::PackageMetadata;
use crate::error::RegistryError;
use async_trait::async_trait;

/// Capability the compatibility checker needs from a package index.
///
/// Implementations must return within bounded time (the HTTP client
/// enforces a timeout) and are free to serve from cache.
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// Fetch metadata for a package, optionally at a specific version.
    ///
    /// `None` means the latest release.
    async fn fetch_metadata(
        &self,
        name: &str,
        version: Option<&str>,
    ) -> Result<PackageMetadata, RegistryError>;

    /// Fetch the package's release versions, sorted latest-first
    async fn fetch_release_versions(&self, name: &str) -> Result<Vec<String>, RegistryError>;

    /// Fetch all package names from the simple index
    async fn fetch_index_names(&self) -> Result<Vec<String>, RegistryError>;
}
