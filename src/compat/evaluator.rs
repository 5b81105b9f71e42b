//! Pairwise compatibility evaluation
//!
//! The evaluator is a pure function over an immutable metadata snapshot:
//! no fetching, no caching, no shared state. For each selected package it
//! runs three checks:
//! 1. Runtime classifier check against the target Python version
//! 2. Direct-mention check: does this package constrain another selected
//!    package in a way its pin cannot satisfy?
//! 3. Shared-dependency check: do two selected packages constrain the same
//!    downstream package with disjoint ranges?
//!
//! Statuses only escalate (`ok` → `warning` → `conflict`) and every finding
//! appends its own detail line; details are never deduplicated, so a pair
//! that trips multiple checks reports each one.

use crate::domain::{
    specifier_overlap, MetadataSnapshot, Requirement, SelectedPackage, Status,
};
use serde::Serialize;
use std::collections::HashMap;

/// Classifier prefix that marks a package as declaring Python support
const PYTHON_CLASSIFIER_PREFIX: &str = "Programming Language :: Python";

/// Evaluation outcome for one selected package
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
    /// Package name (lowercased)
    pub name: String,
    /// Pinned version, or `latest`
    pub version: String,
    /// Worst status any check raised for this package
    pub status: Status,
    /// Human-readable findings, in check order
    pub details: Vec<String>,
    /// The package's parsed direct requirements
    pub requirements: Vec<Requirement>,
}

/// Full evaluation outcome for a selection
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    /// True iff every package's status is exactly `ok`
    pub overall_compatible: bool,
    /// The target Python version, if one was given
    pub python_version: Option<String>,
    /// Per-package reports, in selection order
    pub packages: Vec<PackageReport>,
}

/// Evaluate a selection against a metadata snapshot.
///
/// Pure function: same inputs, same report. Packages whose metadata is
/// missing from the snapshot evaluate with empty requirement and
/// classifier lists (absence of information is treated as compatible) and
/// carry a warning detail of their own.
pub fn evaluate(
    selection: &[SelectedPackage],
    snapshot: &MetadataSnapshot,
    python_version: Option<&str>,
) -> EvaluationReport {
    // Parse every package's requirement list once, keyed by name
    let requirements_by_name: HashMap<&str, Vec<Requirement>> = selection
        .iter()
        .map(|pkg| (pkg.name.as_str(), parse_requirements(snapshot, &pkg.name)))
        .collect();

    let packages: Vec<PackageReport> = selection
        .iter()
        .map(|pkg| evaluate_package(pkg, selection, snapshot, &requirements_by_name, python_version))
        .collect();

    let overall_compatible = packages.iter().all(|report| report.status == Status::Ok);

    EvaluationReport {
        overall_compatible,
        python_version: python_version.map(str::to_string),
        packages,
    }
}

/// Parse one package's declared requirements out of the snapshot.
///
/// Missing metadata and unparseable requirement strings both contribute
/// nothing.
fn parse_requirements(snapshot: &MetadataSnapshot, name: &str) -> Vec<Requirement> {
    snapshot
        .get(name)
        .and_then(|entry| entry.metadata())
        .map(|metadata| {
            metadata
                .requirements
                .iter()
                .filter_map(|raw| Requirement::parse(raw))
                .collect()
        })
        .unwrap_or_default()
}

fn evaluate_package(
    package: &SelectedPackage,
    selection: &[SelectedPackage],
    snapshot: &MetadataSnapshot,
    requirements_by_name: &HashMap<&str, Vec<Requirement>>,
    python_version: Option<&str>,
) -> PackageReport {
    let mut status = Status::Ok;
    let mut details = Vec::new();

    // Degraded metadata is its own finding, not a conflict
    match snapshot.get(&package.name) {
        Some(entry) => {
            if let Some(error) = entry.fetch_error() {
                details.push(format!(
                    "metadata unavailable for {}: {}",
                    package.name, error
                ));
                status.raise_to(Status::Warning);
            }
        }
        None => {
            details.push(format!("metadata unavailable for {}", package.name));
            status.raise_to(Status::Warning);
        }
    }

    check_python_classifiers(package, snapshot, python_version, &mut status, &mut details);

    let empty = Vec::new();
    let requirements = requirements_by_name
        .get(package.name.as_str())
        .unwrap_or(&empty);

    check_direct_mentions(package, selection, requirements, &mut status, &mut details);
    check_shared_dependencies(
        package,
        selection,
        requirements,
        requirements_by_name,
        &mut status,
        &mut details,
    );

    PackageReport {
        name: package.name.clone(),
        version: package.version_label().to_string(),
        status,
        details,
        requirements: requirements.clone(),
    }
}

/// Warn when a package declares Python classifiers but none covers the
/// target version (exact match or same major version).
///
/// A package with no Python classifiers at all is skipped: unknown support
/// is assumed fine.
fn check_python_classifiers(
    package: &SelectedPackage,
    snapshot: &MetadataSnapshot,
    python_version: Option<&str>,
    status: &mut Status,
    details: &mut Vec<String>,
) {
    let Some(target) = python_version else {
        return;
    };
    let Some(metadata) = snapshot.get(&package.name).and_then(|e| e.metadata()) else {
        return;
    };

    let python_classifiers: Vec<&String> = metadata
        .classifiers
        .iter()
        .filter(|c| c.starts_with(PYTHON_CLASSIFIER_PREFIX))
        .collect();
    if python_classifiers.is_empty() {
        return;
    }

    let wanted = format!("{} :: {}", PYTHON_CLASSIFIER_PREFIX, target);
    let major = target.split('.').next().unwrap_or(target);
    let major_prefix = format!("{} :: {}", PYTHON_CLASSIFIER_PREFIX, major);

    let matches = python_classifiers
        .iter()
        .any(|c| **c == wanted || c.starts_with(&major_prefix));

    if !matches {
        details.push(format!(
            "package classifiers do not explicitly list Python {}",
            target
        ));
        status.raise_to(Status::Warning);
    }
}

/// Check this package's requirements against the other selected packages.
///
/// A mention with a specifier that cannot satisfy the other package's pin
/// is a conflict; a mention of an unpinned package is advisory only.
fn check_direct_mentions(
    package: &SelectedPackage,
    selection: &[SelectedPackage],
    requirements: &[Requirement],
    status: &mut Status,
    details: &mut Vec<String>,
) {
    for other in selection {
        if other.name == package.name {
            continue;
        }
        let Some(mention) = requirements.iter().find(|r| r.name == other.name) else {
            continue;
        };
        if mention.specifier.is_empty() {
            continue;
        }

        match &other.pinned_version {
            Some(pinned) => {
                let pin_specifier = format!("=={}", pinned);
                if !specifier_overlap(&mention.specifier, &pin_specifier) {
                    details.push(format!(
                        "{} requires {} {} (selected {})",
                        package.name, other.name, mention.specifier, pinned
                    ));
                    status.raise_to(Status::Conflict);
                }
            }
            None => {
                // Unpinned mention: informational, not a conflict
                details.push(format!(
                    "{} requires {} {}",
                    package.name, other.name, mention.specifier
                ));
                status.raise_to(Status::Warning);
            }
        }
    }
}

/// Check every pair of requirements naming the same downstream package.
///
/// Each package reports the conflict from its own side of the pair, so a
/// disjoint shared dependency shows up on both owners.
fn check_shared_dependencies(
    package: &SelectedPackage,
    selection: &[SelectedPackage],
    requirements: &[Requirement],
    requirements_by_name: &HashMap<&str, Vec<Requirement>>,
    status: &mut Status,
    details: &mut Vec<String>,
) {
    for other in selection {
        if other.name == package.name {
            continue;
        }
        let Some(other_requirements) = requirements_by_name.get(other.name.as_str()) else {
            continue;
        };
        for ours in requirements {
            for theirs in other_requirements {
                if ours.name != theirs.name {
                    continue;
                }
                if !specifier_overlap(&ours.specifier, &theirs.specifier) {
                    details.push(format!(
                        "conflicting specifiers for {}: {}({}) vs {}({})",
                        ours.name, package.name, ours.specifier, other.name, theirs.specifier
                    ));
                    status.raise_to(Status::Conflict);
                }
            }
        }
    }
}
