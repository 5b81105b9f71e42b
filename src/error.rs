//! Application error types using thiserror
//!
//! Error hierarchy:
//! - SelectionError: Issues with the user's package selection
//! - RegistryError: Issues with PyPI communication
//!
//! Specifier parse failures are deliberately NOT errors: malformed
//! requirement strings and unsupported clauses are dropped at parse time
//! and never surface here.

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Selection related errors
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors related to the user's package selection
#[derive(Error, Debug)]
pub enum SelectionError {
    /// The selection contained no packages
    #[error("no packages selected: provide at least one package to check")]
    EmptySelection,

    /// A package token could not be parsed
    #[error("invalid package spec '{spec}': expected 'name' or 'name==version'")]
    InvalidPackageSpec { spec: String },
}

impl SelectionError {
    /// Creates a new InvalidPackageSpec error
    pub fn invalid_package_spec(spec: impl Into<String>) -> Self {
        SelectionError::InvalidPackageSpec { spec: spec.into() }
    }
}

/// Errors related to PyPI communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package (or the requested version of it) not found on PyPI
    #[error("package '{package}' not found on PyPI")]
    PackageNotFound { package: String },

    /// Network request failed
    #[error("failed to fetch '{package}' from PyPI: {message}")]
    NetworkError { package: String, message: String },

    /// Rate limit exceeded
    #[error("rate limit exceeded for PyPI")]
    RateLimitExceeded,

    /// Invalid response from PyPI
    #[error("invalid response from PyPI for '{package}': {message}")]
    InvalidResponse { package: String, message: String },

    /// Timeout
    #[error("timeout while fetching '{package}' from PyPI")]
    Timeout { package: String },
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(package: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(package: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
        }
    }

    /// Whether this error means the package does not exist (as opposed to
    /// a transient failure)
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::PackageNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_error_empty() {
        let err = SelectionError::EmptySelection;
        let msg = format!("{}", err);
        assert!(msg.contains("no packages selected"));
    }

    #[test]
    fn test_selection_error_invalid_spec() {
        let err = SelectionError::invalid_package_spec("numpy==");
        let msg = format!("{}", err);
        assert!(msg.contains("invalid package spec"));
        assert!(msg.contains("numpy=="));
    }

    #[test]
    fn test_registry_error_package_not_found() {
        let err = RegistryError::package_not_found("nonexistent-package");
        let msg = format!("{}", err);
        assert!(msg.contains("'nonexistent-package' not found"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_registry_error_network() {
        let err = RegistryError::network_error("requests", "connection refused");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to fetch"));
        assert!(msg.contains("connection refused"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_registry_error_invalid_response() {
        let err = RegistryError::invalid_response("numpy", "unexpected JSON shape");
        let msg = format!("{}", err);
        assert!(msg.contains("invalid response"));
        assert!(msg.contains("unexpected JSON shape"));
    }

    #[test]
    fn test_registry_error_timeout() {
        let err = RegistryError::timeout("pandas");
        let msg = format!("{}", err);
        assert!(msg.contains("timeout"));
        assert!(msg.contains("pandas"));
    }

    #[test]
    fn test_registry_error_rate_limit() {
        let err = RegistryError::RateLimitExceeded;
        let msg = format!("{}", err);
        assert!(msg.contains("rate limit exceeded"));
    }

    #[test]
    fn test_app_error_from_selection_error() {
        let app_err: AppError = SelectionError::EmptySelection.into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("no packages selected"));
    }

    #[test]
    fn test_app_error_from_registry_error() {
        let app_err: AppError = RegistryError::package_not_found("pkg").into();
        let msg = format!("{}", app_err);
        assert!(msg.contains("'pkg' not found"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = RegistryError::package_not_found("x");
        let debug = format!("{:?}", err);
        assert!(debug.contains("PackageNotFound"));
    }
}
