//! Canonical version ranges derived from constraint lists
//!
//! A list of constraints folds into a single lower/upper bound pair, and
//! two ranges can be tested for overlap. The fold applies constraints in
//! input order: later clauses can tighten bounds, and an exact pin (`==`)
//! overwrites both bounds entirely.
//!
//! Policy: absence of information is never a conflict. A specifier that
//! parses to zero constraints overlaps everything; an absent bound is
//! unbounded in that direction. False negatives are preferred over false
//! positives throughout.

use crate::domain::requirement::{parse_constraints, Constraint, ConstraintOp};
use crate::domain::version::compare_versions;
use serde::Serialize;
use std::cmp::Ordering;

/// One endpoint of a version range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bound {
    /// The version at the endpoint
    pub version: String,
    /// Whether the endpoint itself is included
    pub inclusive: bool,
}

impl Bound {
    fn inclusive(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            inclusive: true,
        }
    }

    fn exclusive(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            inclusive: false,
        }
    }
}

/// Lower/upper bound pair derived from a constraint list.
///
/// Recomputed per evaluation, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionRange {
    /// Lower bound; `None` means unbounded below
    pub lower: Option<Bound>,
    /// Upper bound; `None` means unbounded above
    pub upper: Option<Bound>,
}

impl VersionRange {
    /// Fold a constraint list into a canonical range.
    ///
    /// `~=` uses a documented approximation of the compatible-release
    /// rule: `~=X.Y` becomes `>=X.Y, <(X+1).0`, bumping the major segment
    /// rather than the next-to-last one.
    pub fn from_constraints(constraints: &[Constraint]) -> Self {
        let mut range = VersionRange::default();
        for constraint in constraints {
            let v = constraint.version.as_str();
            match constraint.op {
                ConstraintOp::Greater => {
                    if range.tightens_lower(v, false) {
                        range.lower = Some(Bound::exclusive(v));
                    }
                }
                ConstraintOp::GreaterOrEqual => {
                    if range.tightens_lower(v, true) {
                        range.lower = Some(Bound::inclusive(v));
                    }
                }
                ConstraintOp::Less => {
                    if range.tightens_upper(v, false) {
                        range.upper = Some(Bound::exclusive(v));
                    }
                }
                ConstraintOp::LessOrEqual => {
                    if range.tightens_upper(v, true) {
                        range.upper = Some(Bound::inclusive(v));
                    }
                }
                ConstraintOp::Exact => {
                    // An exact pin overwrites both bounds; last one wins
                    range.lower = Some(Bound::inclusive(v));
                    range.upper = Some(Bound::inclusive(v));
                }
                ConstraintOp::Compatible => {
                    let major: u64 = v
                        .split('.')
                        .next()
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(0);
                    range.lower = Some(Bound::inclusive(v));
                    range.upper = Some(Bound::exclusive(format!("{}.0", major + 1)));
                }
            }
        }
        range
    }

    /// Whether a candidate lower bound is tighter than the current one
    fn tightens_lower(&self, version: &str, inclusive: bool) -> bool {
        match &self.lower {
            None => true,
            Some(current) => match compare_versions(version, &current.version) {
                Ordering::Greater => true,
                // >=v tightens >v at the same version only in the sense of
                // replacing an exclusive bound; >v never replaces >=v
                Ordering::Equal => inclusive && !current.inclusive,
                Ordering::Less => false,
            },
        }
    }

    /// Whether a candidate upper bound is tighter than the current one
    fn tightens_upper(&self, version: &str, inclusive: bool) -> bool {
        match &self.upper {
            None => true,
            Some(current) => match compare_versions(version, &current.version) {
                Ordering::Less => true,
                Ordering::Equal => inclusive && !current.inclusive,
                Ordering::Greater => false,
            },
        }
    }

    /// Test whether two ranges can both be satisfied by some version.
    ///
    /// Ranges fail to overlap only when one's upper bound falls strictly
    /// below the other's lower bound, or meets it with either endpoint
    /// exclusive. An absent bound is unbounded in that direction.
    pub fn overlaps(&self, other: &VersionRange) -> bool {
        bounds_permit(&self.upper, &other.lower) && bounds_permit(&other.upper, &self.lower)
    }
}

/// True when this upper/lower pair does not separate the two ranges
fn bounds_permit(upper: &Option<Bound>, lower: &Option<Bound>) -> bool {
    if let (Some(up), Some(low)) = (upper, lower) {
        match compare_versions(&up.version, &low.version) {
            Ordering::Less => return false,
            Ordering::Equal => {
                if !(up.inclusive && low.inclusive) {
                    return false;
                }
            }
            Ordering::Greater => {}
        }
    }
    true
}

/// Overlap test on raw specifier texts.
///
/// Either side parsing to zero constraints means "no information" and is
/// treated as compatible with anything.
pub fn specifier_overlap(a: &str, b: &str) -> bool {
    let constraints_a = parse_constraints(a);
    let constraints_b = parse_constraints(b);
    if constraints_a.is_empty() || constraints_b.is_empty() {
        return true;
    }
    VersionRange::from_constraints(&constraints_a)
        .overlaps(&VersionRange::from_constraints(&constraints_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_of(specifier: &str) -> VersionRange {
        VersionRange::from_constraints(&parse_constraints(specifier))
    }

    #[test]
    fn test_exact_pin_sets_both_bounds() {
        let range = range_of("==1.2.0");
        assert_eq!(range.lower, Some(Bound::inclusive("1.2.0")));
        assert_eq!(range.upper, Some(Bound::inclusive("1.2.0")));
    }

    #[test]
    fn test_exact_pin_overwrites_prior_bounds() {
        let range = range_of(">=1.0,<3.0,==2.0");
        assert_eq!(range.lower, Some(Bound::inclusive("2.0")));
        assert_eq!(range.upper, Some(Bound::inclusive("2.0")));
    }

    #[test]
    fn test_last_exact_pin_wins() {
        let range = range_of("==1.0,==2.0");
        assert_eq!(range.lower, Some(Bound::inclusive("2.0")));
        assert_eq!(range.upper, Some(Bound::inclusive("2.0")));
    }

    #[test]
    fn test_lower_bound_tightening() {
        let range = range_of(">=1.0,>=1.5");
        assert_eq!(range.lower, Some(Bound::inclusive("1.5")));

        // A looser lower bound does not replace a tighter one
        let range = range_of(">=2.0,>=1.0");
        assert_eq!(range.lower, Some(Bound::inclusive("2.0")));
    }

    #[test]
    fn test_exclusive_lower_replaced_by_inclusive_at_same_version() {
        let range = range_of(">1.0,>=1.0");
        assert_eq!(range.lower, Some(Bound::inclusive("1.0")));
    }

    #[test]
    fn test_inclusive_lower_not_replaced_by_exclusive() {
        let range = range_of(">=1.0,>1.0");
        // >1.0 at the same version is not "strictly greater", bound stays
        assert_eq!(range.lower, Some(Bound::inclusive("1.0")));
    }

    #[test]
    fn test_upper_bound_tightening() {
        let range = range_of("<3.0,<=2.0");
        assert_eq!(range.upper, Some(Bound::inclusive("2.0")));

        let range = range_of("<2.0,<3.0");
        assert_eq!(range.upper, Some(Bound::exclusive("2.0")));
    }

    #[test]
    fn test_compatible_release_bounds() {
        let range = range_of("~=2.5");
        assert_eq!(range.lower, Some(Bound::inclusive("2.5")));
        assert_eq!(range.upper, Some(Bound::exclusive("3.0")));
    }

    #[test]
    fn test_compatible_release_unparseable_major() {
        let range = range_of("~=x.1");
        assert_eq!(range.lower, Some(Bound::inclusive("x.1")));
        // Major falls back to 0, upper becomes 1.0
        assert_eq!(range.upper, Some(Bound::exclusive("1.0")));
    }

    #[test]
    fn test_empty_constraints_yield_unbounded_range() {
        let range = range_of("");
        assert!(range.lower.is_none());
        assert!(range.upper.is_none());
    }

    #[test]
    fn test_overlap_basic() {
        assert!(range_of(">=1.0,<2.0").overlaps(&range_of(">=1.5")));
        assert!(range_of("==1.2.0").overlaps(&range_of(">=1.0,<2.0")));
    }

    #[test]
    fn test_overlap_adjacent_exclusive_boundary() {
        // upper=(2.0, exclusive) vs lower=(2.0, inclusive): no overlap
        assert!(!range_of(">=1.0,<2.0").overlaps(&range_of(">=2.0")));
    }

    #[test]
    fn test_overlap_adjacent_inclusive_boundary() {
        // Both endpoints inclusive at the same version: overlap
        assert!(range_of(">=1.0,<=2.0").overlaps(&range_of(">=2.0")));
    }

    #[test]
    fn test_overlap_disjoint() {
        assert!(!range_of("<1.0").overlaps(&range_of(">=2.0")));
        assert!(!range_of("==1.0").overlaps(&range_of("==2.0")));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = range_of(">=1.0,<2.0");
        let b = range_of(">=2.0");
        assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn test_overlap_unbounded_sides() {
        assert!(range_of(">=1.0").overlaps(&range_of("<=1.0")));
        assert!(VersionRange::default().overlaps(&range_of("==5.0")));
    }

    #[test]
    fn test_specifier_overlap_empty_means_compatible() {
        assert!(specifier_overlap("", ">=5.0"));
        assert!(specifier_overlap(">=5.0", ""));
        assert!(specifier_overlap("", ""));
    }

    #[test]
    fn test_specifier_overlap_unparseable_means_compatible() {
        // A specifier that parses to zero constraints carries no information
        assert!(specifier_overlap("python_version >= \"3.8\"", "==1.0"));
    }

    #[test]
    fn test_specifier_overlap_conflict() {
        assert!(!specifier_overlap("==1.0", ">=2.0"));
        assert!(!specifier_overlap(">=1.0,<2.0", ">=2.0"));
    }

    #[test]
    fn test_specifier_overlap_numeric_comparison() {
        // 1.10 is above 1.2, so ranges around them behave numerically
        assert!(specifier_overlap(">=1.2", "==1.10"));
        assert!(!specifier_overlap("<1.2", "==1.10"));
    }
}
