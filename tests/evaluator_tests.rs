//! Integration tests for the compatibility evaluation pipeline
//!
//! These tests drive the public API end-to-end on in-memory metadata:
//! comparator ordering, specifier parsing, range overlap, and full
//! selection evaluation scenarios.

use pipcheck::compat::evaluate;
use pipcheck::domain::{
    compare_versions, parse_constraints, specifier_overlap, MetadataSnapshot, PackageMetadata,
    SelectedPackage, Status, VersionRange,
};
use std::cmp::Ordering;

fn selected(name: &str, version: Option<&str>) -> SelectedPackage {
    SelectedPackage::new(name, version.map(str::to_string))
}

fn metadata(requirements: &[&str], classifiers: &[&str]) -> PackageMetadata {
    PackageMetadata::new(
        requirements.iter().map(|s| s.to_string()).collect(),
        classifiers.iter().map(|s| s.to_string()).collect(),
    )
}

mod comparator {
    use super::*;

    #[test]
    fn test_compare_is_reflexive() {
        for v in ["1.0.0", "2024.1.post1", "weird", ""] {
            assert_eq!(compare_versions(v, v), Ordering::Equal);
        }
    }

    #[test]
    fn test_compare_is_antisymmetric() {
        let samples = ["1.2.0", "1.10.0", "1.0", "2.0a", "0"];
        for a in samples {
            for b in samples {
                assert_eq!(
                    compare_versions(a, b),
                    compare_versions(b, a).reverse(),
                    "compare({a}, {b})"
                );
            }
        }
    }

    #[test]
    fn test_numeric_segments_compare_numerically() {
        assert_eq!(compare_versions("1.2.0", "1.10.0"), Ordering::Less);
    }
}

mod ranges {
    use super::*;

    #[test]
    fn test_exact_constraint_produces_point_range() {
        let constraints = parse_constraints("==1.2.0");
        assert_eq!(constraints.len(), 1);

        let range = VersionRange::from_constraints(&constraints);
        let lower = range.lower.unwrap();
        let upper = range.upper.unwrap();
        assert_eq!(lower.version, "1.2.0");
        assert!(lower.inclusive);
        assert_eq!(upper.version, "1.2.0");
        assert!(upper.inclusive);
    }

    #[test]
    fn test_adjacent_ranges_do_not_overlap() {
        // upper=(2.0, exclusive) meets lower=(2.0, inclusive): disjoint
        assert!(!specifier_overlap(">=1.0,<2.0", ">=2.0"));
    }

    #[test]
    fn test_empty_specifier_assumes_compatible() {
        assert!(specifier_overlap("", ">=5.0"));
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn test_unpinned_mention_is_warning() {
        // a requires b >=2.0, b is selected unpinned
        let selection = vec![selected("a", Some("1.0")), selected("b", None)];
        let mut snapshot = MetadataSnapshot::new();
        snapshot.insert("a", metadata(&["b (>=2.0)"], &[]));
        snapshot.insert("b", metadata(&[], &[]));

        let report = evaluate(&selection, &snapshot, None);
        assert!(!report.overall_compatible);

        let a = &report.packages[0];
        assert_eq!(a.status, Status::Warning);
        assert!(a.details.iter().any(|d| d.contains("a requires b >=2.0")));
    }

    #[test]
    fn test_pinned_mention_below_requirement_is_conflict() {
        // a requires b >=2.0, b pinned to 1.0
        let selection = vec![selected("a", Some("1.0")), selected("b", Some("1.0"))];
        let mut snapshot = MetadataSnapshot::new();
        snapshot.insert("a", metadata(&["b (>=2.0)"], &[]));
        snapshot.insert("b", metadata(&[], &[]));

        let report = evaluate(&selection, &snapshot, None);
        assert!(!report.overall_compatible);
        assert_eq!(report.packages[0].status, Status::Conflict);
    }

    #[test]
    fn test_unrelated_packages_are_compatible() {
        let selection = vec![selected("a", Some("1.0")), selected("b", Some("1.0"))];
        let mut snapshot = MetadataSnapshot::new();
        snapshot.insert("a", metadata(&["left (>=1.0)"], &[]));
        snapshot.insert("b", metadata(&["right (<2.0)"], &[]));

        let report = evaluate(&selection, &snapshot, None);
        assert!(report.overall_compatible);
        assert!(report.packages.iter().all(|p| p.status == Status::Ok));
    }

    #[test]
    fn test_shared_dependency_with_disjoint_specifiers() {
        // Neither package requires the other, but both constrain c
        let selection = vec![selected("a", None), selected("b", None)];
        let mut snapshot = MetadataSnapshot::new();
        snapshot.insert("a", metadata(&["c (==1.0)"], &[]));
        snapshot.insert("b", metadata(&["c (>=2.0)"], &[]));

        let report = evaluate(&selection, &snapshot, None);
        assert!(!report.overall_compatible);

        let conflicted: Vec<_> = report
            .packages
            .iter()
            .filter(|p| p.status == Status::Conflict)
            .collect();
        assert!(!conflicted.is_empty());
        assert!(conflicted
            .iter()
            .all(|p| p.details.iter().any(|d| d.contains("c"))));
    }

    #[test]
    fn test_marker_clauses_do_not_poison_evaluation() {
        // The marker clause is dropped, the version clause still applies
        let selection = vec![selected("a", Some("1.0")), selected("b", Some("1.0"))];
        let mut snapshot = MetadataSnapshot::new();
        snapshot.insert(
            "a",
            metadata(&["b (>=2.0; python_version >= \"3.8\")"], &[]),
        );
        snapshot.insert("b", metadata(&[], &[]));

        let report = evaluate(&selection, &snapshot, None);
        assert_eq!(report.packages[0].status, Status::Conflict);
    }

    #[test]
    fn test_degraded_package_does_not_block_others() {
        let selection = vec![
            selected("gone", None),
            selected("a", Some("1.0")),
            selected("b", Some("1.0")),
        ];
        let mut snapshot = MetadataSnapshot::new();
        snapshot.insert_missing("gone", "package 'gone' not found on PyPI");
        snapshot.insert("a", metadata(&["b (>=2.0)"], &[]));
        snapshot.insert("b", metadata(&[], &[]));

        let report = evaluate(&selection, &snapshot, None);

        // The degraded package is a warning with its error surfaced
        assert_eq!(report.packages[0].status, Status::Warning);
        assert!(report.packages[0].details[0].contains("metadata unavailable"));

        // The conflict between the healthy packages is still found
        assert_eq!(report.packages[1].status, Status::Conflict);
    }

    #[test]
    fn test_python_classifier_mismatch_is_warning_only() {
        let selection = vec![selected("legacy", Some("1.0"))];
        let mut snapshot = MetadataSnapshot::new();
        snapshot.insert(
            "legacy",
            metadata(&[], &["Programming Language :: Python :: 2.7"]),
        );

        let report = evaluate(&selection, &snapshot, Some("3.11"));
        assert!(!report.overall_compatible);
        assert_eq!(report.packages[0].status, Status::Warning);
        assert_eq!(report.python_version.as_deref(), Some("3.11"));
    }

    #[test]
    fn test_compatible_release_specifier_in_scenario() {
        // ~=1.4 means >=1.4,<2.0 under the documented approximation, so a
        // pin at 2.1 conflicts
        let selection = vec![selected("a", None), selected("b", Some("2.1"))];
        let mut snapshot = MetadataSnapshot::new();
        snapshot.insert("a", metadata(&["b (~=1.4)"], &[]));
        snapshot.insert("b", metadata(&[], &[]));

        let report = evaluate(&selection, &snapshot, None);
        assert_eq!(report.packages[0].status, Status::Conflict);

        // A pin inside the window is fine
        let selection = vec![selected("a", None), selected("b", Some("1.9"))];
        let report = evaluate(&selection, &snapshot, None);
        assert!(report.overall_compatible);
    }
}
