//! Requirement and version-specifier parsing
//!
//! Handles the requirement strings found in PyPI `requires_dist` metadata:
//! - Bare name: `numpy`
//! - Parenthesized specifier: `numpy (>=1.20)`, `pandas (>=1.0,<2.0)`
//! - Multi-clause specifiers joined by `,`, `;` or the word `and`
//!
//! Parsing is permissive on purpose: clauses that do not match the
//! supported operator grammar (environment markers, extras and the rest of
//! the PEP 508 surface) are dropped silently rather than failing the whole
//! requirement. A dropped clause simply contributes no constraint.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Leading package name with an optional parenthesized specifier
static REQUIREMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z0-9_.-]+)\s*(?:\(([^)]+)\))?").unwrap());

/// Operator token followed by a version string
static CONSTRAINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([<>=!~]{1,2})\s*(.+)$").unwrap());

/// Clause separators: comma, semicolon, or the word "and"
static CLAUSE_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[,;]|\s+and\s+").unwrap());

/// A single dependency declared by one package's metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    /// Dependency name, lowercased for all downstream keying
    pub name: String,
    /// Raw specifier text (may be empty for an unconstrained mention)
    pub specifier: String,
}

impl Requirement {
    /// Parse a raw requirement string such as `numpy (>=1.20)`.
    ///
    /// Returns `None` for empty or unmatched input.
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = REQUIREMENT_RE.captures(raw)?;
        let name = caps.get(1)?.as_str().to_lowercase();
        if name.is_empty() {
            return None;
        }
        let specifier = caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        Some(Self { name, specifier })
    }

    /// Constraints parsed from this requirement's specifier text
    pub fn constraints(&self) -> Vec<Constraint> {
        parse_constraints(&self.specifier)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.specifier.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.specifier)
        }
    }
}

/// Comparison operator of a single constraint clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintOp {
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `==`
    Exact,
    /// `~=` or `~` (compatible release)
    Compatible,
}

impl ConstraintOp {
    /// Map an operator token to its variant; unsupported tokens (such as
    /// `!=`) yield `None` and the clause is dropped
    fn from_token(token: &str) -> Option<Self> {
        match token {
            ">" => Some(ConstraintOp::Greater),
            ">=" => Some(ConstraintOp::GreaterOrEqual),
            "<" => Some(ConstraintOp::Less),
            "<=" => Some(ConstraintOp::LessOrEqual),
            "==" => Some(ConstraintOp::Exact),
            "~=" | "~" => Some(ConstraintOp::Compatible),
            _ => None,
        }
    }

    /// The operator's source token
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintOp::Greater => ">",
            ConstraintOp::GreaterOrEqual => ">=",
            ConstraintOp::Less => "<",
            ConstraintOp::LessOrEqual => "<=",
            ConstraintOp::Exact => "==",
            ConstraintOp::Compatible => "~=",
        }
    }
}

/// A single operator + version pair parsed from a specifier clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constraint {
    /// The comparison operator
    pub op: ConstraintOp,
    /// The version string the operator applies to
    pub version: String,
}

impl Constraint {
    /// Create a new constraint
    pub fn new(op: ConstraintOp, version: impl Into<String>) -> Self {
        Self {
            op,
            version: version.into(),
        }
    }

    /// Parse one clause such as `>=1.2.0`; `None` for unmatched clauses
    fn parse_clause(clause: &str) -> Option<Self> {
        let caps = CONSTRAINT_RE.captures(clause)?;
        let op = ConstraintOp::from_token(caps.get(1)?.as_str())?;
        let version = caps.get(2)?.as_str().trim().to_string();
        if version.is_empty() {
            return None;
        }
        Some(Self { op, version })
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.as_str(), self.version)
    }
}

/// Parse a full specifier text (`">=1.0, <2.0"`) into its constraints.
///
/// Clauses that do not match the operator grammar are ignored, so a
/// specifier carrying an environment marker still yields the constraints
/// around it.
pub fn parse_constraints(specifier: &str) -> Vec<Constraint> {
    if specifier.trim().is_empty() {
        return Vec::new();
    }
    CLAUSE_SPLIT_RE
        .split(specifier)
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .filter_map(Constraint::parse_clause)
        .collect()
}
