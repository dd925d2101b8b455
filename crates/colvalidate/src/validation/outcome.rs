//! Payload shapes returned to the caller.

use indexmap::IndexMap;
use serde::Serialize;

use crate::coercion::Coerced;
use crate::column::{CanonicalValue, ValueKind};
use crate::rules::ReturnType;

use super::aggregate::Aggregate;
use super::checks::{CheckId, CheckResult};

/// One column per applicable check; `None` cells were not evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaskTable {
    rows: usize,
    columns: IndexMap<CheckId, Vec<Option<bool>>>,
}

impl MaskTable {
    /// Lay out check results over every check `kind` supports.
    ///
    /// Checks that were not gated on become columns of `None`.
    pub fn new(kind: ValueKind, results: &[CheckResult], values: &[CanonicalValue]) -> Self {
        let rows = values.len();
        let columns = CheckId::applicable(kind)
            .iter()
            .map(|id| {
                let cells = results
                    .iter()
                    .find(|r| r.id == *id)
                    .map_or_else(|| vec![None; rows], |r| r.cells(values));
                (*id, cells)
            })
            .collect();

        Self { rows, columns }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Check ids in column order.
    pub fn check_ids(&self) -> impl Iterator<Item = CheckId> + '_ {
        self.columns.keys().copied()
    }

    /// Get one check's cells.
    pub fn column(&self, id: CheckId) -> Option<&[Option<bool>]> {
        self.columns.get(&id).map(Vec::as_slice)
    }

    /// Get a single cell.
    pub fn get(&self, row: usize, id: CheckId) -> Option<bool> {
        self.columns.get(&id).and_then(|c| c.get(row).copied().flatten())
    }

    /// Row-wise OR, treating not-evaluated cells as passing.
    pub fn any_failed(&self) -> Vec<bool> {
        let mut out = vec![false; self.rows];
        for cells in self.columns.values() {
            for (slot, cell) in out.iter_mut().zip(cells) {
                *slot |= cell.unwrap_or(false);
            }
        }
        out
    }
}

/// Caller-selected result shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Payload {
    /// Report only.
    None,
    /// Coerced values; failing positions replaced by missing.
    Values(Vec<CanonicalValue>),
    /// `true` = the row failed validation. Note the inversion from "valid".
    FailureMask(Vec<bool>),
    MaskTable(MaskTable),
}

impl Payload {
    /// Shape the pipeline's output according to `return_type`.
    pub fn shape(
        return_type: ReturnType,
        kind: ValueKind,
        coerced: Coerced,
        results: &[CheckResult],
        aggregate: &Aggregate,
    ) -> Self {
        match return_type {
            ReturnType::None => Payload::None,
            ReturnType::Values => {
                let values = coerced
                    .values
                    .into_iter()
                    .zip(&aggregate.overall)
                    .map(|(v, failed)| if *failed { CanonicalValue::Missing } else { v })
                    .collect();
                Payload::Values(values)
            }
            ReturnType::MaskSeries => Payload::FailureMask(aggregate.overall.clone()),
            ReturnType::MaskFrame => {
                Payload::MaskTable(MaskTable::new(kind, results, &coerced.values))
            }
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Payload::None)
    }

    pub fn values(&self) -> Option<&[CanonicalValue]> {
        match self {
            Payload::Values(v) => Some(v),
            _ => None,
        }
    }

    pub fn failure_mask(&self) -> Option<&[bool]> {
        match self {
            Payload::FailureMask(m) => Some(m),
            _ => None,
        }
    }

    pub fn mask_table(&self) -> Option<&MaskTable> {
        match self {
            Payload::MaskTable(t) => Some(t),
            _ => None,
        }
    }
}

/// Result of one validation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    /// Rendered report; `None` when no check fired.
    pub report: Option<String>,
    /// Checks that fired, in canonical order.
    pub fired: Vec<CheckId>,
    pub payload: Payload,
}

impl ValidationOutcome {
    /// True if no check fired.
    pub fn is_valid(&self) -> bool {
        self.fired.is_empty()
    }

    /// Split into the `(payload, report)` pair.
    pub fn into_parts(self) -> (Payload, Option<String>) {
        (self.payload, self.report)
    }
}
