//! Segment-wise version comparison
//!
//! PyPI version identifiers are compared with a deliberately simple rule:
//! split into segments, compare numerically where both sides are integers,
//! lexicographically otherwise. Pre-release suffixes are opaque trailing
//! tokens, not ordered the PEP 440 way. The simplification is intentional
//! and load-bearing: "latest first" version listings are sorted with this
//! exact ordering.

use std::cmp::Ordering;

/// One decomposed segment of a version identifier
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Num(u64),
    Text(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Segment::Num(0);
        }
        match raw.parse::<u64>() {
            Ok(n) => Segment::Num(n),
            Err(_) => Segment::Text(raw.to_string()),
        }
    }
}

/// Decompose a version string on the given separators
fn segments(version: &str, separators: &[char]) -> Vec<Segment> {
    version.split(separators).map(Segment::parse).collect()
}

/// Compare two segments; a number against a text segment is compared
/// lexicographically with the number coerced to its string form
fn compare_segments(a: &Segment, b: &Segment) -> Ordering {
    match (a, b) {
        (Segment::Num(na), Segment::Num(nb)) => na.cmp(nb),
        (Segment::Num(na), Segment::Text(tb)) => na.to_string().as_str().cmp(tb.as_str()),
        (Segment::Text(ta), Segment::Num(nb)) => ta.as_str().cmp(nb.to_string().as_str()),
        (Segment::Text(ta), Segment::Text(tb)) => ta.cmp(tb),
    }
}

fn compare_decomposed(a: &[Segment], b: &[Segment]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        // Missing positions default to integer 0
        let zero = Segment::Num(0);
        let sa = a.get(i).unwrap_or(&zero);
        let sb = b.get(i).unwrap_or(&zero);
        match compare_segments(sa, sb) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Compare two version identifiers, splitting on `.` only.
///
/// This is the ordering used for all specifier/range logic. It is total:
/// any pair of strings yields a deterministic result, never an error.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    compare_decomposed(&segments(a, &['.']), &segments(b, &['.']))
}

/// Compare two release version strings, additionally splitting on
/// `-`, `_` and `+` so that local/dev suffixes become their own segments.
///
/// Used for sorting release listings latest-first.
pub fn compare_release_versions(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    const SEPS: [char; 4] = ['.', '-', '_', '+'];
    compare_decomposed(&segments(a, &SEPS), &segments(b, &SEPS))
}

/// Sort version strings in place, latest first
pub fn sort_latest_first(versions: &mut [String]) {
    versions.sort_by(|a, b| compare_release_versions(b, a));
}
