//! Validation engine: checks, aggregation, reporting and result shaping.

mod aggregate;
mod checks;
mod outcome;
mod report;
mod validators;

pub use aggregate::Aggregate;
pub use checks::{CheckId, CheckPlan, CheckResult, CheckScope};
pub use outcome::{MaskTable, Payload, ValidationOutcome};
pub use report::{REPORT_TAG, ValidationReport};
pub use validators::{
    Validator, run, validate, validate_date, validate_numeric, validate_string, validate_timestamp,
};
