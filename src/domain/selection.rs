//! User selection types and compatibility status
//!
//! A selection is the ordered list of packages the user wants to check,
//! each optionally pinned to a concrete version. Statuses form a small
//! ordered scale and only ever escalate within one package's evaluation.

use crate::error::SelectionError;
use serde::Serialize;
use std::fmt;

/// Sentinel version meaning "no pin"
pub const LATEST: &str = "latest";

/// A user-chosen package, optionally pinned to a concrete version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPackage {
    /// Package name, lowercased (PyPI names are case-insensitive)
    pub name: String,
    /// Pinned version, or `None` for "latest"
    pub pinned_version: Option<String>,
}

impl SelectedPackage {
    /// Create a selection entry
    pub fn new(name: impl Into<String>, pinned_version: Option<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            pinned_version,
        }
    }

    /// Parse a CLI token: `name`, `name==version`, or `name==latest`
    pub fn parse(token: &str) -> Result<Self, SelectionError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SelectionError::invalid_package_spec(token));
        }

        let (name, version) = match token.split_once("==") {
            Some((name, version)) => (name.trim(), Some(version.trim())),
            None => (token, None),
        };

        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(SelectionError::invalid_package_spec(token));
        }

        let pinned_version = match version {
            None => None,
            Some("") => return Err(SelectionError::invalid_package_spec(token)),
            Some(LATEST) => None,
            Some(v) => Some(v.to_string()),
        };

        Ok(Self::new(name, pinned_version))
    }

    /// Version label used in reports: the pin, or `latest`
    pub fn version_label(&self) -> &str {
        self.pinned_version.as_deref().unwrap_or(LATEST)
    }
}

impl fmt::Display for SelectedPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pinned_version {
            Some(version) => write!(f, "{}=={}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Per-package compatibility status.
///
/// Ordered: `Ok < Warning < Conflict`. Evaluation only ever escalates via
/// [`Status::raise_to`], never downgrades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// No issues detected
    #[default]
    Ok,
    /// Advisory finding: unpinned mention, missing classifier, degraded metadata
    Warning,
    /// Provably incompatible constraint pair
    Conflict,
}

impl Status {
    /// Escalate to the higher of the two statuses
    pub fn raise_to(&mut self, other: Status) {
        *self = (*self).max(other);
    }

    /// Status label as it appears in output
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Warning => "warning",
            Status::Conflict => "conflict",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
