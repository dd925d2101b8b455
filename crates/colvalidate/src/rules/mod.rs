//! Caller configuration for the column validators.

mod config;
mod types;

pub use config::{ColumnRules, DateRules, NumericRules, StringRules, TimestampRules};
pub use types::{Case, ReturnType};
