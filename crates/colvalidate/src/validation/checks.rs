//! Check identifiers and the per-value predicate family.
//!
//! A [`CheckPlan`] is the ordered list of checks a validator gated on for one
//! call. Evaluating it over a coerced column yields one [`CheckResult`] per
//! check, each a boolean mask aligned with the input (`true` = failed).

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::coercion::Coerced;
use crate::column::{CanonicalValue, ValueKind};
use crate::rules::Case;

/// Identifier of a single check.
///
/// The declaration order is the canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    InvalidType,
    Nullable,
    Nonunique,
    NonInteger,
    TooShort,
    TooLow,
    TooEarly,
    TooLong,
    TooHigh,
    TooLate,
    NotInWhitelist,
    InBlacklist,
    WrongCase,
    Newlines,
    TrailingWhitespace,
    Whitespace,
    Pattern,
    ForbiddenPattern,
}

const DATE_CHECKS: &[CheckId] = &[
    CheckId::InvalidType,
    CheckId::Nullable,
    CheckId::Nonunique,
    CheckId::TooEarly,
    CheckId::TooLate,
];

const NUMERIC_CHECKS: &[CheckId] = &[
    CheckId::InvalidType,
    CheckId::Nullable,
    CheckId::Nonunique,
    CheckId::NonInteger,
    CheckId::TooLow,
    CheckId::TooHigh,
];

const STRING_CHECKS: &[CheckId] = &[
    CheckId::InvalidType,
    CheckId::Nullable,
    CheckId::Nonunique,
    CheckId::TooShort,
    CheckId::TooLong,
    CheckId::NotInWhitelist,
    CheckId::InBlacklist,
    CheckId::WrongCase,
    CheckId::Newlines,
    CheckId::TrailingWhitespace,
    CheckId::Whitespace,
    CheckId::Pattern,
    CheckId::ForbiddenPattern,
];

impl CheckId {
    /// All checks a validator of `kind` knows about, in canonical order.
    pub fn applicable(kind: ValueKind) -> &'static [CheckId] {
        match kind {
            ValueKind::Date | ValueKind::Timestamp => DATE_CHECKS,
            ValueKind::Number => NUMERIC_CHECKS,
            ValueKind::Text => STRING_CHECKS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckId::InvalidType => "invalid_type",
            CheckId::Nullable => "nullable",
            CheckId::Nonunique => "nonunique",
            CheckId::NonInteger => "non_integer",
            CheckId::TooShort => "too_short",
            CheckId::TooLow => "too_low",
            CheckId::TooEarly => "too_early",
            CheckId::TooLong => "too_long",
            CheckId::TooHigh => "too_high",
            CheckId::TooLate => "too_late",
            CheckId::NotInWhitelist => "not_in_whitelist",
            CheckId::InBlacklist => "in_blacklist",
            CheckId::WrongCase => "wrong_case",
            CheckId::Newlines => "newlines",
            CheckId::TrailingWhitespace => "trailing_whitespace",
            CheckId::Whitespace => "whitespace",
            CheckId::Pattern => "pattern",
            CheckId::ForbiddenPattern => "forbidden_pattern",
        }
    }

    /// Report clause for this check on a validator of `kind`.
    pub fn clause(&self, kind: ValueKind) -> &'static str {
        match (self, kind) {
            (CheckId::InvalidType, ValueKind::Date) => "Value(s) not of type date set as NaT",
            (CheckId::InvalidType, ValueKind::Timestamp) => {
                "Value(s) not of type timestamp set as NaT"
            }
            (CheckId::InvalidType, ValueKind::Number) => "Non-numeric value(s) set as NaN",
            (CheckId::InvalidType, ValueKind::Text) => "Non-string value(s) set as NaN",
            (CheckId::Nullable, ValueKind::Date | ValueKind::Timestamp) => "NaT value(s)",
            (CheckId::Nullable, _) => "NaN value(s)",
            (CheckId::Nonunique, _) => "duplicates",
            (CheckId::NonInteger, _) => "non-integer(s)",
            (CheckId::TooShort, _) => "string(s) too short",
            (CheckId::TooLong, _) => "string(s) too long",
            (CheckId::TooLow, _) => "value(s) too low",
            (CheckId::TooHigh, _) => "value(s) too high",
            (CheckId::TooEarly, ValueKind::Timestamp) => "timestamp(s) too early",
            (CheckId::TooEarly, _) => "date(s) too early",
            (CheckId::TooLate, ValueKind::Timestamp) => "timestamp(s) too late",
            (CheckId::TooLate, _) => "date(s) too late",
            (CheckId::NotInWhitelist, _) => "string(s) not in whitelist",
            (CheckId::InBlacklist, _) => "string(s) in blacklist",
            (CheckId::WrongCase, _) => "wrong case letter(s)",
            (CheckId::Newlines, _) => "newline character(s)",
            (CheckId::TrailingWhitespace, _) => "trailing whitespace",
            (CheckId::Whitespace, _) => "whitespace",
            (CheckId::Pattern, _) => "mismatch(es) for \"matching regular expression\"",
            (CheckId::ForbiddenPattern, _) => "match(es) for \"non-matching regular expression\"",
        }
    }

    /// Which positions the check is meaningful for.
    pub fn scope(&self) -> CheckScope {
        match self {
            CheckId::InvalidType | CheckId::Nullable | CheckId::Nonunique => CheckScope::AllRows,
            _ => CheckScope::PresentOnly,
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positions at which a check produces a meaningful result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckScope {
    /// Evaluated at every position.
    AllRows,
    /// Not applicable where the canonical value is missing.
    PresentOnly,
}

/// The mask produced by one check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub id: CheckId,
    /// `true` = failed at that position.
    pub mask: Vec<bool>,
}

impl CheckResult {
    pub fn new(id: CheckId, mask: Vec<bool>) -> Self {
        Self { id, mask }
    }

    /// True if any position failed.
    pub fn fired(&self) -> bool {
        self.mask.iter().any(|m| *m)
    }

    /// Number of failing positions.
    pub fn failures(&self) -> usize {
        self.mask.iter().filter(|m| **m).count()
    }

    /// Row indices that failed.
    pub fn failing_rows(&self) -> Vec<usize> {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.then_some(i))
            .collect()
    }

    /// Tri-state cells: `None` where the check does not apply to the value.
    pub fn cells(&self, values: &[CanonicalValue]) -> Vec<Option<bool>> {
        match self.id.scope() {
            CheckScope::AllRows => self.mask.iter().map(|m| Some(*m)).collect(),
            CheckScope::PresentOnly => self
                .mask
                .iter()
                .zip(values)
                .map(|(m, v)| (!v.is_missing()).then_some(*m))
                .collect(),
        }
    }
}

/// An inclusive range limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Bound {
    Number(f64),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl Bound {
    /// Ordering of `value` relative to the bound, if comparable.
    fn compare(&self, value: &CanonicalValue) -> Option<Ordering> {
        match (self, value) {
            (Bound::Number(b), CanonicalValue::Number(v)) => v.partial_cmp(b),
            (Bound::Date(b), CanonicalValue::Date(v)) => Some(v.cmp(b)),
            (Bound::Timestamp(b), CanonicalValue::Timestamp(v)) => Some(v.cmp(b)),
            _ => None,
        }
    }

    /// Compare two bounds of the same shape.
    pub fn order(&self, other: &Bound) -> Option<Ordering> {
        match (self, other) {
            (Bound::Number(a), Bound::Number(b)) => a.partial_cmp(b),
            (Bound::Date(a), Bound::Date(b)) => Some(a.cmp(b)),
            (Bound::Timestamp(a), Bound::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Number(n) => write!(f, "{n}"),
            Bound::Date(d) => write!(f, "{d}"),
            Bound::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
        }
    }
}

/// A configured check, ready to evaluate.
#[derive(Debug, Clone)]
pub(crate) enum Check {
    InvalidType,
    Nullable,
    Unique,
    Min(Bound),
    Max(Bound),
    Integer,
    MinLength(usize),
    MaxLength(usize),
    Whitelist(HashSet<String>),
    Blacklist(HashSet<String>),
    Case(Case),
    NoNewlines,
    NoTrailingWhitespace,
    NoWhitespace,
    Pattern(Regex),
    ForbiddenPattern(Regex),
}

impl Check {
    pub fn id(&self) -> CheckId {
        match self {
            Check::InvalidType => CheckId::InvalidType,
            Check::Nullable => CheckId::Nullable,
            Check::Unique => CheckId::Nonunique,
            Check::Min(Bound::Number(_)) => CheckId::TooLow,
            Check::Min(_) => CheckId::TooEarly,
            Check::Max(Bound::Number(_)) => CheckId::TooHigh,
            Check::Max(_) => CheckId::TooLate,
            Check::Integer => CheckId::NonInteger,
            Check::MinLength(_) => CheckId::TooShort,
            Check::MaxLength(_) => CheckId::TooLong,
            Check::Whitelist(_) => CheckId::NotInWhitelist,
            Check::Blacklist(_) => CheckId::InBlacklist,
            Check::Case(_) => CheckId::WrongCase,
            Check::NoNewlines => CheckId::Newlines,
            Check::NoTrailingWhitespace => CheckId::TrailingWhitespace,
            Check::NoWhitespace => CheckId::Whitespace,
            Check::Pattern(_) => CheckId::Pattern,
            Check::ForbiddenPattern(_) => CheckId::ForbiddenPattern,
        }
    }

    /// Evaluate the check over a coerced column. One linear pass.
    pub fn evaluate(&self, coerced: &Coerced) -> CheckResult {
        let values = &coerced.values;
        let mask = match self {
            Check::InvalidType => coerced.mismatch.clone(),
            Check::Nullable => values.iter().map(CanonicalValue::is_missing).collect(),
            Check::Unique => duplicates(values),
            Check::Min(bound) => present(values, |v| bound.compare(v) == Some(Ordering::Less)),
            Check::Max(bound) => present(values, |v| bound.compare(v) == Some(Ordering::Greater)),
            Check::Integer => present(values, |v| v.as_number().is_some_and(|n| n.fract() != 0.0)),
            Check::MinLength(min) => text(values, |s| s.chars().count() < *min),
            Check::MaxLength(max) => text(values, |s| s.chars().count() > *max),
            Check::Whitelist(allowed) => text(values, |s| !allowed.contains(s)),
            Check::Blacklist(denied) => text(values, |s| denied.contains(s)),
            Check::Case(case) => text(values, |s| !case.matches(s)),
            Check::NoNewlines => text(values, |s| s.contains(['\n', '\r'])),
            Check::NoTrailingWhitespace => text(values, |s| {
                s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace)
            }),
            Check::NoWhitespace => text(values, |s| s.contains(char::is_whitespace)),
            // is_match never resolves capture groups
            Check::Pattern(re) => text(values, |s| !re.is_match(s)),
            Check::ForbiddenPattern(re) => text(values, |s| re.is_match(s)),
        };
        CheckResult::new(self.id(), mask)
    }
}

/// Flag every repeat of a non-missing value; first occurrences pass.
fn duplicates(values: &[CanonicalValue]) -> Vec<bool> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .iter()
        .map(|v| v.key().is_some_and(|key| !seen.insert(key)))
        .collect()
}

fn present<F>(values: &[CanonicalValue], failed: F) -> Vec<bool>
where
    F: Fn(&CanonicalValue) -> bool,
{
    values.iter().map(|v| !v.is_missing() && failed(v)).collect()
}

fn text<F>(values: &[CanonicalValue], failed: F) -> Vec<bool>
where
    F: Fn(&str) -> bool,
{
    values
        .iter()
        .map(|v| v.as_text().is_some_and(&failed))
        .collect()
}

/// Ordered set of checks gated on for a single validation call.
///
/// Plans only come out of [`Validator::plan`](super::Validator::plan), which
/// checks the configuration first, so a plan cannot be assembled by hand:
///
/// ```compile_fail
/// use colvalidate::ValueKind;
/// use colvalidate::validation::CheckPlan;
///
/// let plan = CheckPlan::new(ValueKind::Number);
/// ```
#[derive(Debug, Clone)]
pub struct CheckPlan {
    kind: ValueKind,
    checks: Vec<Check>,
}

impl CheckPlan {
    /// Create a plan holding only the type check, which always runs.
    pub(crate) fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            checks: vec![Check::InvalidType],
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Add a check, keeping canonical order.
    pub(crate) fn push(&mut self, check: Check) {
        debug_assert!(
            CheckId::applicable(self.kind).contains(&check.id()),
            "{} does not apply to {} columns",
            check.id(),
            self.kind
        );
        self.checks.push(check);
        self.checks.sort_by_key(Check::id);
    }

    /// Add a check when `gate` holds.
    pub(crate) fn push_if(&mut self, gate: bool, check: impl FnOnce() -> Check) {
        if gate {
            self.push(check());
        }
    }

    pub fn ids(&self) -> Vec<CheckId> {
        self.checks.iter().map(Check::id).collect()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Evaluate every check, in canonical order.
    pub fn evaluate(&self, coerced: &Coerced) -> Vec<CheckResult> {
        self.checks.iter().map(|c| c.evaluate(coerced)).collect()
    }
}
