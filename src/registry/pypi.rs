//! PyPI JSON API adapter
//!
//! Endpoints:
//! - Metadata: `https://pypi.org/pypi/{package}/json` (or
//!   `/{package}/{version}/json` for a pinned version)
//! - Simple index: `https://pypi.org/simple/` (anchor-tag scrape)

use crate::domain::{sort_latest_first, PackageMetadata};
use crate::error::RegistryError;
use crate::registry::{HttpClient, PackageRegistry};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

/// PyPI API base URL
const PYPI_API_URL: &str = "https://pypi.org/pypi";

/// PyPI simple index URL
const PYPI_SIMPLE_URL: &str = "https://pypi.org/simple/";

/// Anchor tags in the simple index: `<a href="...">name</a>`
static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<a[^>]*>([^<]+)</a>").unwrap());

/// PyPI adapter
pub struct PyPiRegistry {
    client: HttpClient,
}

/// PyPI package metadata response
#[derive(Debug, Deserialize)]
struct PyPiResponse {
    /// The `info` block carrying requirements and classifiers
    info: PyPiInfo,
    /// Release files keyed by version; only the keys matter here
    #[serde(default)]
    releases: HashMap<String, Value>,
}

/// The subset of the `info` block this tool consumes
#[derive(Debug, Default, Deserialize)]
struct PyPiInfo {
    /// Raw requirement strings; may be null for packages with no deps
    #[serde(default)]
    requires_dist: Option<Vec<String>>,
    /// Trove classifiers
    #[serde(default)]
    classifiers: Vec<String>,
}

impl PyPiRegistry {
    /// Create a new PyPI adapter
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Build the metadata URL for a package, optionally at a version
    fn build_url(&self, package: &str, version: Option<&str>) -> String {
        match version {
            Some(version) => format!("{}/{}/{}/json", PYPI_API_URL, package, version),
            None => format!("{}/{}/json", PYPI_API_URL, package),
        }
    }

    async fn fetch_response(
        &self,
        package: &str,
        version: Option<&str>,
    ) -> Result<PyPiResponse, RegistryError> {
        let url = self.build_url(package, version);
        self.client.get_json(&url, package).await
    }
}

#[async_trait]
impl PackageRegistry for PyPiRegistry {
    async fn fetch_metadata(
        &self,
        name: &str,
        version: Option<&str>,
    ) -> Result<PackageMetadata, RegistryError> {
        let response = self.fetch_response(name, version).await?;
        Ok(PackageMetadata::new(
            response.info.requires_dist.unwrap_or_default(),
            response.info.classifiers,
        ))
    }

    async fn fetch_release_versions(&self, name: &str) -> Result<Vec<String>, RegistryError> {
        let response = self.fetch_response(name, None).await?;
        let mut versions: Vec<String> = response.releases.into_keys().collect();
        sort_latest_first(&mut versions);
        Ok(versions)
    }

    async fn fetch_index_names(&self) -> Result<Vec<String>, RegistryError> {
        let html = self.client.get_text(PYPI_SIMPLE_URL, "simple index").await?;
        Ok(parse_simple_index(&html))
    }
}

/// Extract package names from the simple index HTML
fn parse_simple_index(html: &str) -> Vec<String> {
    ANCHOR_RE
        .captures_iter(html)
        .map(|caps| caps[1].to_string())
        .collect()
}
