//! Combination of per-check masks into one decision per row.

use super::checks::{CheckId, CheckResult};

/// Overall failure mask and the checks that fired.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregate {
    /// `true` where at least one check failed.
    pub overall: Vec<bool>,
    /// Checks with at least one failure, in canonical order.
    pub fired: Vec<CheckId>,
}

impl Aggregate {
    /// OR together every result's mask. All masks must have length `rows`.
    pub fn from_results(results: &[CheckResult], rows: usize) -> Self {
        let mut overall = vec![false; rows];
        let mut fired = Vec::new();

        for result in results {
            debug_assert_eq!(result.mask.len(), rows, "mask length for {}", result.id);
            let mut any = false;
            for (slot, failed) in overall.iter_mut().zip(&result.mask) {
                if *failed {
                    *slot = true;
                    any = true;
                }
            }
            if any {
                fired.push(result.id);
            }
        }

        fired.sort();
        Self { overall, fired }
    }

    /// Number of rows failing at least one check.
    pub fn failed_rows(&self) -> usize {
        self.overall.iter().filter(|f| **f).count()
    }

    pub fn is_clean(&self) -> bool {
        self.fired.is_empty()
    }

    pub fn has_fired(&self, id: CheckId) -> bool {
        self.fired.contains(&id)
    }
}
