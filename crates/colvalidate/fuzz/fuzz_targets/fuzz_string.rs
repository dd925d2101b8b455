//! Fuzz target for string validation.
//!
//! This fuzzer tests that the string validator:
//! 1. Never panics on arbitrary cell contents
//! 2. Rejects malformed patterns as configuration errors
//! 3. Keeps every mask aligned with the input column

#![no_main]

use arbitrary::Arbitrary;
use colvalidate::{Column, ReturnType, StringRules, validate_string};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    cells: Vec<Option<String>>,
    pattern: Option<String>,
    min_length: Option<u8>,
    max_length: Option<u8>,
    blacklist: Vec<String>,
    unique: bool,
    whitespace: bool,
}

fuzz_target!(|input: Input| {
    if input.cells.len() > 1_000 {
        return;
    }

    let rows = input.cells.len();
    let mut rules = StringRules::new()
        .with_unique(input.unique)
        .with_whitespace(input.whitespace)
        .with_blacklist(input.blacklist)
        .with_return_type(ReturnType::MaskFrame);
    if let Some(min) = input.min_length {
        rules = rules.with_min_length(min.into());
    }
    if let Some(max) = input.max_length {
        rules = rules.with_max_length(max.into());
    }
    if let Some(pattern) = input.pattern {
        rules = rules.with_pattern(pattern);
    }

    if let Ok(outcome) = validate_string(&Column::unnamed(input.cells), &rules) {
        if let Some(table) = outcome.payload.mask_table() {
            assert_eq!(table.rows(), rows);
        }
    }
});
