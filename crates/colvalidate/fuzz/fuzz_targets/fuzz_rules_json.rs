//! Fuzz target for rule loading.
//!
//! Arbitrary JSON must either fail to load or produce rules that validate
//! a small fixed column without panicking.

#![no_main]

use colvalidate::{Column, ColumnRules, RawValue, validate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(rules) = ColumnRules::from_json(json) else {
        return;
    };

    let column = Column::new(
        "fuzz",
        vec![
            RawValue::Int(1),
            RawValue::Float(2.5),
            RawValue::from("text"),
            RawValue::Null,
        ],
    );
    let _ = validate(&column, &rules);
});
