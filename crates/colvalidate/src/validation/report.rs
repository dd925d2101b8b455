//! Human-readable rendering of fired checks.

use std::fmt;

use serde::Serialize;

use crate::column::ValueKind;

use super::checks::CheckId;

/// Prefix shared by every report line.
pub const REPORT_TAG: &str = "[RangeWarning]";

/// The rendered outcome of one validation call.
///
/// Only built when at least one check fired.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Column display name.
    pub column: Option<String>,
    /// Fired checks, in canonical order.
    pub checks: Vec<CheckId>,
    /// Clause text for each fired check.
    pub clauses: Vec<&'static str>,
}

impl ValidationReport {
    /// Build a report, or `None` if nothing fired.
    pub fn build(column: Option<&str>, kind: ValueKind, fired: &[CheckId]) -> Option<Self> {
        if fired.is_empty() {
            return None;
        }

        let mut checks = fired.to_vec();
        checks.sort();
        checks.dedup();
        let clauses = checks.iter().map(|id| id.clause(kind)).collect();

        Some(Self {
            column: column.map(str::to_string),
            checks,
            clauses,
        })
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{REPORT_TAG}: ")?;
        match &self.column {
            Some(name) => write!(f, "'{name}'")?,
            None => f.write_str("None")?,
        }
        write!(f, ": {}.", self.clauses.join("; "))
    }
}
