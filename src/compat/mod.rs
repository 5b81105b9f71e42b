//! Compatibility resolution core
//!
//! Pure, synchronous evaluation of a package selection against an
//! already-fetched metadata snapshot.

mod evaluator;

pub use evaluator::{evaluate, EvaluationReport, PackageReport};
