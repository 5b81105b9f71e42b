//! TTL cache decorator for a package registry
//!
//! Wraps any [`PackageRegistry`] and memoizes responses keyed by
//! `name@version` (`latest` when unpinned). Failures are cached too, on a
//! much shorter TTL, so a misspelled package does not hammer the index on
//! every keystroke while still recovering quickly.
//!
//! The cache is an injected collaborator owned by its constructor's
//! caller. There is no global state; two checkers with two caches never
//! observe each other.

use crate::domain::{PackageMetadata, LATEST};
use crate::error::RegistryError;
use crate::registry::PackageRegistry;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Cache freshness configuration
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// How long successful responses stay fresh
    pub ttl: Duration,
    /// How long failure entries stay fresh
    pub failure_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(6 * 60 * 60),
            failure_ttl: Duration::from_secs(60),
        }
    }
}

/// A cached value with its insertion time
struct Entry<T> {
    value: T,
    inserted_at: Instant,
}

impl<T> Entry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
        }
    }

    fn fresh(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() < ttl
    }
}

/// A failure stored in the cache; `RegistryError` is not `Clone`, so the
/// distinguishing parts are kept and the error rebuilt on replay
#[derive(Debug, Clone)]
struct CachedFailure {
    not_found: bool,
    message: String,
}

impl CachedFailure {
    fn from_error(error: &RegistryError) -> Self {
        Self {
            not_found: error.is_not_found(),
            message: error.to_string(),
        }
    }

    fn to_error(&self, package: &str) -> RegistryError {
        if self.not_found {
            RegistryError::package_not_found(package)
        } else {
            RegistryError::network_error(package, self.message.clone())
        }
    }
}

type MetadataEntry = Entry<Result<PackageMetadata, CachedFailure>>;

/// Caching decorator over any [`PackageRegistry`]
pub struct CachedRegistry<R> {
    inner: R,
    config: CacheConfig,
    metadata: Mutex<HashMap<String, MetadataEntry>>,
    versions: Mutex<HashMap<String, Entry<Vec<String>>>>,
    index: Mutex<Option<Entry<Vec<String>>>>,
}

impl<R: PackageRegistry> CachedRegistry<R> {
    /// Wrap a registry with default TTLs
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, CacheConfig::default())
    }

    /// Wrap a registry with explicit TTLs
    pub fn with_config(inner: R, config: CacheConfig) -> Self {
        Self {
            inner,
            config,
            metadata: Mutex::new(HashMap::new()),
            versions: Mutex::new(HashMap::new()),
            index: Mutex::new(None),
        }
    }

    fn metadata_key(name: &str, version: Option<&str>) -> String {
        format!("{}@{}", name.to_lowercase(), version.unwrap_or(LATEST))
    }

    /// Look up a fresh metadata entry; success and failure entries age on
    /// different TTLs
    fn cached_metadata(&self, key: &str) -> Option<Result<PackageMetadata, CachedFailure>> {
        let cache = self.metadata.lock().expect("metadata cache lock poisoned");
        let entry = cache.get(key)?;
        let ttl = match entry.value {
            Ok(_) => self.config.ttl,
            Err(_) => self.config.failure_ttl,
        };
        if entry.fresh(ttl) {
            Some(entry.value.clone())
        } else {
            None
        }
    }
}

#[async_trait]
impl<R: PackageRegistry> PackageRegistry for CachedRegistry<R> {
    async fn fetch_metadata(
        &self,
        name: &str,
        version: Option<&str>,
    ) -> Result<PackageMetadata, RegistryError> {
        let key = Self::metadata_key(name, version);

        if let Some(cached) = self.cached_metadata(&key) {
            return cached.map_err(|failure| failure.to_error(name));
        }

        let result = self.inner.fetch_metadata(name, version).await;
        let stored = match &result {
            Ok(metadata) => Ok(metadata.clone()),
            Err(error) => Err(CachedFailure::from_error(error)),
        };
        self.metadata
            .lock()
            .expect("metadata cache lock poisoned")
            .insert(key, Entry::new(stored));
        result
    }

    async fn fetch_release_versions(&self, name: &str) -> Result<Vec<String>, RegistryError> {
        let key = name.to_lowercase();

        {
            let cache = self.versions.lock().expect("versions cache lock poisoned");
            if let Some(entry) = cache.get(&key) {
                if entry.fresh(self.config.ttl) {
                    return Ok(entry.value.clone());
                }
            }
        }

        let versions = self.inner.fetch_release_versions(name).await?;
        self.versions
            .lock()
            .expect("versions cache lock poisoned")
            .insert(key, Entry::new(versions.clone()));
        Ok(versions)
    }

    async fn fetch_index_names(&self) -> Result<Vec<String>, RegistryError> {
        {
            let cache = self.index.lock().expect("index cache lock poisoned");
            if let Some(entry) = cache.as_ref() {
                if entry.fresh(self.config.ttl) {
                    return Ok(entry.value.clone());
                }
            }
        }

        let names = self.inner.fetch_index_names().await?;
        *self.index.lock().expect("index cache lock poisoned") = Some(Entry::new(names.clone()));
        Ok(names)
    }
}
