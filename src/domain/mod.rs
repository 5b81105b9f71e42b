//! Core domain models for pipcheck
//!
//! This module contains the fundamental types used throughout the application:
//! - Segment-wise version comparison (deliberately simplified ordering)
//! - Requirement and version-specifier parsing
//! - Constraint ranges and overlap testing
//! - Selection, status and metadata snapshot types

mod metadata;
mod range;
mod requirement;
mod selection;
mod version;

pub use metadata::{MetadataSnapshot, PackageMetadata, SnapshotEntry};
pub use range::{specifier_overlap, Bound, VersionRange};
pub use requirement::{parse_constraints, Constraint, ConstraintOp, Requirement};
pub use selection::{SelectedPackage, Status, LATEST};
pub use version::{compare_release_versions, compare_versions, sort_latest_first};
