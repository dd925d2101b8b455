//! The validation pipeline and the four column validators.
//!
//! Every call runs the same synchronous pass:
//! coerce → evaluate gated checks → aggregate → render report → shape payload.
//! Configuration is checked before the column is touched.

use std::cmp::Ordering;
use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use crate::coercion::coerce;
use crate::column::{Column, ValueKind};
use crate::error::{Result, ValidationError};
use crate::rules::{Case, ColumnRules, DateRules, NumericRules, ReturnType, StringRules, TimestampRules};

use super::aggregate::Aggregate;
use super::checks::{Bound, Check, CheckPlan};
use super::outcome::{Payload, ValidationOutcome};
use super::report::ValidationReport;

/// A rule set that can validate a column.
pub trait Validator {
    /// Value kind the column is coerced into.
    fn kind(&self) -> ValueKind;

    /// Requested payload shape.
    fn return_type(&self) -> ReturnType;

    /// Check the configuration and gate the checks it enables.
    fn plan(&self) -> Result<CheckPlan>;

    /// Validate a column. Fails only on invalid configuration.
    fn validate(&self, column: &Column) -> Result<ValidationOutcome> {
        let plan = self.plan()?;
        Ok(run(column, &plan, self.return_type()))
    }
}

/// Run a prepared plan over a column.
pub fn run(column: &Column, plan: &CheckPlan, return_type: ReturnType) -> ValidationOutcome {
    let kind = plan.kind();
    let name = column.name.as_deref();
    debug!(
        column = name.unwrap_or("<unnamed>"),
        kind = %kind,
        rows = column.len(),
        checks = plan.len(),
        "validating column"
    );

    let coerced = coerce(column, kind);
    let results = plan.evaluate(&coerced);
    let aggregate = Aggregate::from_results(&results, column.len());

    let report = ValidationReport::build(name, kind, &aggregate.fired).map(|r| r.to_string());
    if !aggregate.is_clean() {
        debug!(
            column = name.unwrap_or("<unnamed>"),
            fired = ?aggregate.fired,
            failed_rows = aggregate.failed_rows(),
            "validation failures"
        );
    }

    let payload = Payload::shape(return_type, kind, coerced, &results, &aggregate);
    ValidationOutcome {
        report,
        fired: aggregate.fired,
        payload,
    }
}

/// Validate a column of calendar dates.
pub fn validate_date(column: &Column, rules: &DateRules) -> Result<ValidationOutcome> {
    rules.validate(column)
}

/// Validate a column of UTC timestamps.
pub fn validate_timestamp(column: &Column, rules: &TimestampRules) -> Result<ValidationOutcome> {
    rules.validate(column)
}

/// Validate a numeric column.
pub fn validate_numeric(column: &Column, rules: &NumericRules) -> Result<ValidationOutcome> {
    rules.validate(column)
}

/// Validate a string column.
pub fn validate_string(column: &Column, rules: &StringRules) -> Result<ValidationOutcome> {
    rules.validate(column)
}

/// Validate a column against any rule set.
pub fn validate(column: &Column, rules: &ColumnRules) -> Result<ValidationOutcome> {
    rules.validate(column)
}

fn check_range(option: &'static str, min: Option<Bound>, max: Option<Bound>) -> Result<()> {
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo.order(&hi) == Some(Ordering::Greater) {
            return Err(ValidationError::InvalidRange {
                option,
                min: lo.to_string(),
                max: hi.to_string(),
            });
        }
    }
    Ok(())
}

/// Shared gates: nullability, uniqueness and an inclusive range.
fn base_plan(
    kind: ValueKind,
    nullable: bool,
    unique: bool,
    range: (&'static str, Option<Bound>, Option<Bound>),
) -> Result<CheckPlan> {
    let (option, min, max) = range;
    check_range(option, min, max)?;

    let mut plan = CheckPlan::new(kind);
    plan.push_if(!nullable, || Check::Nullable);
    plan.push_if(unique, || Check::Unique);
    if let Some(min) = min {
        plan.push(Check::Min(min));
    }
    if let Some(max) = max {
        plan.push(Check::Max(max));
    }
    Ok(plan)
}

impl Validator for DateRules {
    fn kind(&self) -> ValueKind {
        ValueKind::Date
    }

    fn return_type(&self) -> ReturnType {
        self.return_type
    }

    fn plan(&self) -> Result<CheckPlan> {
        base_plan(
            ValueKind::Date,
            self.nullable,
            self.unique,
            (
                "min_date/max_date",
                self.min_date.map(Bound::Date),
                self.max_date.map(Bound::Date),
            ),
        )
    }
}

impl Validator for TimestampRules {
    fn kind(&self) -> ValueKind {
        ValueKind::Timestamp
    }

    fn return_type(&self) -> ReturnType {
        self.return_type
    }

    fn plan(&self) -> Result<CheckPlan> {
        base_plan(
            ValueKind::Timestamp,
            self.nullable,
            self.unique,
            (
                "min_timestamp/max_timestamp",
                self.min_timestamp.map(Bound::Timestamp),
                self.max_timestamp.map(Bound::Timestamp),
            ),
        )
    }
}

impl Validator for NumericRules {
    fn kind(&self) -> ValueKind {
        ValueKind::Number
    }

    fn return_type(&self) -> ReturnType {
        self.return_type
    }

    fn plan(&self) -> Result<CheckPlan> {
        for (option, bound) in [("min_value", self.min_value), ("max_value", self.max_value)] {
            if let Some(value) = bound.filter(|v| v.is_nan()) {
                return Err(ValidationError::InvalidBound {
                    option,
                    value: value.to_string(),
                });
            }
        }

        let mut plan = base_plan(
            ValueKind::Number,
            self.nullable,
            self.unique,
            (
                "min_value/max_value",
                self.min_value.map(Bound::Number),
                self.max_value.map(Bound::Number),
            ),
        )?;
        plan.push_if(self.integer, || Check::Integer);
        Ok(plan)
    }
}

fn value_set(list: Option<&Vec<String>>) -> Option<HashSet<String>> {
    list.filter(|l| !l.is_empty())
        .map(|l| l.iter().cloned().collect())
}

impl Validator for StringRules {
    fn kind(&self) -> ValueKind {
        ValueKind::Text
    }

    fn return_type(&self) -> ReturnType {
        self.return_type
    }

    fn plan(&self) -> Result<CheckPlan> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(ValidationError::InvalidRange {
                    option: "min_length/max_length",
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
        }
        let pattern = self.pattern.as_deref().map(Regex::new).transpose()?;
        let forbidden = self.forbidden_pattern.as_deref().map(Regex::new).transpose()?;

        let mut plan = CheckPlan::new(ValueKind::Text);
        plan.push_if(!self.nullable, || Check::Nullable);
        plan.push_if(self.unique, || Check::Unique);
        if let Some(min) = self.min_length {
            plan.push(Check::MinLength(min));
        }
        if let Some(max) = self.max_length {
            plan.push(Check::MaxLength(max));
        }
        if let Some(allowed) = value_set(self.whitelist.as_ref()) {
            plan.push(Check::Whitelist(allowed));
        }
        if let Some(denied) = value_set(self.blacklist.as_ref()) {
            plan.push(Check::Blacklist(denied));
        }
        plan.push_if(self.case != Case::None, || Check::Case(self.case));
        plan.push_if(!self.newlines, || Check::NoNewlines);
        plan.push_if(!self.trailing_whitespace, || Check::NoTrailingWhitespace);
        plan.push_if(!self.whitespace, || Check::NoWhitespace);
        if let Some(re) = pattern {
            plan.push(Check::Pattern(re));
        }
        if let Some(re) = forbidden {
            plan.push(Check::ForbiddenPattern(re));
        }
        Ok(plan)
    }
}

impl Validator for ColumnRules {
    fn kind(&self) -> ValueKind {
        ColumnRules::kind(self)
    }

    fn return_type(&self) -> ReturnType {
        match self {
            ColumnRules::Date(r) => r.return_type,
            ColumnRules::Timestamp(r) => r.return_type,
            ColumnRules::Numeric(r) => r.return_type,
            ColumnRules::String(r) => r.return_type,
        }
    }

    fn plan(&self) -> Result<CheckPlan> {
        match self {
            ColumnRules::Date(r) => r.plan(),
            ColumnRules::Timestamp(r) => r.plan(),
            ColumnRules::Numeric(r) => r.plan(),
            ColumnRules::String(r) => r.plan(),
        }
    }
}
