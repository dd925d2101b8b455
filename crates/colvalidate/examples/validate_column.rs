//! Example: validate a column against rules loaded from JSON.
//!
//! Usage:
//!   cargo run --example validate_column
//!   cargo run --example validate_column -- '{"type": "string", "max_length": 4}'

use std::env;

use colvalidate::{Column, ColumnRules, Payload, RawValue, validate};

const DEFAULT_RULES: &str = r#"{
    "type": "string",
    "nullable": false,
    "unique": true,
    "min_length": 2,
    "max_length": 10,
    "case": "lower",
    "whitespace": false,
    "blacklist": ["blacklist"],
    "return_type": "mask_frame"
}"#;

fn main() -> colvalidate::Result<()> {
    let json = env::args().nth(1).unwrap_or_else(|| DEFAULT_RULES.to_string());
    let rules = ColumnRules::from_json(&json)?;

    let column = Column::new(
        "StringTest",
        vec![
            RawValue::from("goodstring"),
            "1".into(),
            "CaseTEST".into(),
            "abc abc".into(),
            "blacklist".into(),
            "goodstring".into(),
            RawValue::Int(123456),
            RawValue::Null,
        ],
    );

    let separator = "=".repeat(80);
    println!("{separator}");
    println!(
        "Validating '{}' ({} rows) as {}",
        column.name.as_deref().unwrap_or("None"),
        column.len(),
        rules.kind()
    );
    println!("{separator}");

    let outcome = validate(&column, &rules)?;
    match &outcome.report {
        Some(report) => println!("{report}"),
        None => println!("No issues found."),
    }
    println!();

    match &outcome.payload {
        Payload::None => {}
        Payload::Values(values) => {
            for (row, value) in values.iter().enumerate() {
                println!("{row:>4}  {value}");
            }
        }
        Payload::FailureMask(mask) => {
            for (row, failed) in mask.iter().enumerate() {
                println!("{row:>4}  {}", if *failed { "FAIL" } else { "ok" });
            }
        }
        Payload::MaskTable(table) => {
            for id in table.check_ids() {
                let failing: Vec<String> = (0..table.rows())
                    .filter(|row| table.get(*row, id) == Some(true))
                    .map(|row| row.to_string())
                    .collect();
                if !failing.is_empty() {
                    println!("{:<20} rows {}", id.as_str(), failing.join(", "));
                }
            }
        }
    }

    Ok(())
}
