//! Integration tests for colvalidate.

use chrono::{NaiveDate, TimeZone, Utc};

use colvalidate::column::to_text;
use colvalidate::validation::run;
use colvalidate::{
    Case, CanonicalValue, CheckId, Column, ColumnRules, DateRules, NumericRules, RawValue,
    ReturnType, StringRules, TimestampRules, ValidationError, Validator, ValueKind, validate,
    validate_date, validate_numeric, validate_string, validate_timestamp,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Mixed-content string column used across the string tests.
fn string_test_column() -> Column {
    Column::new(
        "StringTest",
        vec![
            RawValue::Float(f64::NAN),
            RawValue::Null,
            "1".into(),
            "12345678901".into(),
            "CaseTEST".into(),
            "casetest".into(),
            "ab\nab".into(),
            "abab\n".into(),
            "abc abc".into(),
            " abcabc ".into(),
            "goodstring".into(),
            "badstring".into(),
            "whitelist".into(),
            "blacklist".into(),
            "goodstring".into(),
            RawValue::Bytes(b"abcd".to_vec()),
            RawValue::Int(0xc0ffee),
            RawValue::Int(123456),
            RawValue::Float(123.456),
            "abc 123".into(),
            "abc123".into(),
            "accepted".into(),
            "helloworld".into(),
        ],
    )
}

// =============================================================================
// Numeric
// =============================================================================

#[test]
fn test_numeric_end_to_end() {
    let column = Column::new(
        "NumericTest",
        vec![
            RawValue::Int(13),
            RawValue::Int(42),
            RawValue::Int(73),
            RawValue::Int(73),
            RawValue::Float(3.14159),
            RawValue::Float(1.1618033),
            RawValue::Null,
        ],
    );
    let rules = NumericRules::new()
        .with_nullable(false)
        .with_unique(true)
        .with_integer(true)
        .with_min_value(15.0)
        .with_max_value(100.0)
        .with_return_type(ReturnType::MaskFrame);

    let outcome = validate_numeric(&column, &rules).expect("valid config");

    assert_eq!(
        outcome.fired,
        vec![
            CheckId::Nullable,
            CheckId::Nonunique,
            CheckId::NonInteger,
            CheckId::TooLow,
        ]
    );
    assert_eq!(
        outcome.report.as_deref(),
        Some("[RangeWarning]: 'NumericTest': NaN value(s); duplicates; non-integer(s); value(s) too low.")
    );

    let table = outcome.payload.mask_table().expect("mask table");
    assert_eq!(
        table.column(CheckId::TooLow).unwrap(),
        &[
            Some(true),
            Some(false),
            Some(false),
            Some(false),
            Some(true),
            Some(true),
            None,
        ]
    );
    assert_eq!(table.column(CheckId::TooHigh).unwrap(), &[
        Some(false),
        Some(false),
        Some(false),
        Some(false),
        Some(false),
        Some(false),
        None,
    ]);
    assert_eq!(
        table.column(CheckId::Nonunique).unwrap(),
        &[
            Some(false),
            Some(false),
            Some(false),
            Some(true),
            Some(false),
            Some(false),
            Some(false),
        ]
    );
}

#[test]
fn test_numeric_duplicate_convention() {
    let column = Column::unnamed(vec![1_i64, 1, 2]);
    let rules = NumericRules::new()
        .with_unique(true)
        .with_return_type(ReturnType::MaskSeries);

    let outcome = validate_numeric(&column, &rules).unwrap();
    assert_eq!(outcome.payload.failure_mask().unwrap(), &[false, true, false]);
}

#[test]
fn test_numeric_int_and_float_are_duplicates() {
    let column = Column::unnamed(vec![RawValue::Int(2), RawValue::Float(2.0)]);
    let rules = NumericRules::new().with_unique(true);
    let outcome = validate_numeric(&column, &rules).unwrap();
    assert_eq!(outcome.fired, vec![CheckId::Nonunique]);
}

#[test]
fn test_numeric_inclusive_bounds() {
    let rules = NumericRules::new()
        .with_min_value(2.0)
        .with_max_value(2.0)
        .with_return_type(ReturnType::MaskFrame);

    let ok = validate_numeric(&Column::unnamed(vec![2_i64]), &rules).unwrap();
    assert!(ok.fired.is_empty());
    assert!(ok.report.is_none());

    let low = validate_numeric(&Column::unnamed(vec![1_i64]), &rules).unwrap();
    assert_eq!(low.fired, vec![CheckId::TooLow]);
    let table = low.payload.mask_table().unwrap();
    assert_eq!(table.get(0, CheckId::TooLow), Some(true));
    assert_eq!(table.get(0, CheckId::TooHigh), Some(false));
}

#[test]
fn test_numeric_rejects_strings_without_parsing() {
    let column = Column::new(
        "NumericTest",
        vec![RawValue::Int(13), "42".into(), RawValue::Bool(true), RawValue::Int(42)],
    );
    let rules = NumericRules::new().with_return_type(ReturnType::Values);

    let outcome = validate_numeric(&column, &rules).unwrap();
    assert_eq!(outcome.fired, vec![CheckId::InvalidType]);
    assert_eq!(
        outcome.report.as_deref(),
        Some("[RangeWarning]: 'NumericTest': Non-numeric value(s) set as NaN.")
    );
    assert_eq!(
        outcome.payload.values().unwrap(),
        &[
            CanonicalValue::Number(13.0),
            CanonicalValue::Missing,
            CanonicalValue::Missing,
            CanonicalValue::Number(42.0),
        ]
    );
}

// =============================================================================
// Date / Timestamp
// =============================================================================

#[test]
fn test_date_values() {
    let column = Column::new(
        "DateTest",
        vec![
            RawValue::Date(date(2010, 10, 7)),
            RawValue::Date(date(2014, 8, 13)),
            RawValue::Date(date(2015, 12, 31)),
            RawValue::Date(date(2014, 2, 2)),
            RawValue::Date(date(2014, 8, 13)),
            RawValue::Date(date(2018, 3, 15)),
            RawValue::Null,
        ],
    );
    let rules = DateRules::new()
        .with_nullable(false)
        .with_unique(true)
        .with_min_date(date(2013, 1, 1))
        .with_max_date(date(2015, 12, 31))
        .with_return_type(ReturnType::Values);

    let outcome = validate_date(&column, &rules).unwrap();
    assert_eq!(
        outcome.report.as_deref(),
        Some("[RangeWarning]: 'DateTest': NaT value(s); duplicates; date(s) too early; date(s) too late.")
    );
    assert_eq!(
        outcome.payload.values().unwrap(),
        &[
            CanonicalValue::Missing,
            CanonicalValue::Date(date(2014, 8, 13)),
            CanonicalValue::Date(date(2015, 12, 31)),
            CanonicalValue::Date(date(2014, 2, 2)),
            CanonicalValue::Missing,
            CanonicalValue::Missing,
            CanonicalValue::Missing,
        ]
    );
}

#[test]
fn test_date_rejects_strings_and_datetimes() {
    let column = Column::new(
        "DateTest",
        vec![
            RawValue::Date(date(2014, 8, 13)),
            "2014-02-02".into(),
            RawValue::DateTime(date(2014, 8, 13).and_hms_opt(10, 0, 0).unwrap()),
        ],
    );
    let outcome = validate_date(
        &column,
        &DateRules::new().with_return_type(ReturnType::MaskSeries),
    )
    .unwrap();

    assert_eq!(outcome.fired, vec![CheckId::InvalidType]);
    assert_eq!(
        outcome.report.as_deref(),
        Some("[RangeWarning]: 'DateTest': Value(s) not of type date set as NaT.")
    );
    assert_eq!(outcome.payload.failure_mask().unwrap(), &[false, true, true]);
}

#[test]
fn test_timestamp_scenario() {
    let ts = |y, m, d| Utc.with_ymd_and_hms(y, m, d, 12, 30, 0).unwrap();
    let column = Column::new(
        "TimestampTest",
        vec![
            RawValue::Timestamp(ts(2010, 10, 7)),
            RawValue::Timestamp(ts(2014, 8, 13)),
            RawValue::Timestamp(ts(2014, 8, 13)),
            RawValue::Timestamp(ts(2018, 3, 15)),
            RawValue::Date(date(2014, 8, 13)),
            RawValue::Null,
        ],
    );
    let rules = TimestampRules::new()
        .with_nullable(false)
        .with_unique(true)
        .with_min_timestamp(Utc.with_ymd_and_hms(2013, 1, 1, 0, 0, 0).unwrap())
        .with_max_timestamp(Utc.with_ymd_and_hms(2015, 12, 31, 0, 0, 0).unwrap())
        .with_return_type(ReturnType::MaskSeries);

    let outcome = validate_timestamp(&column, &rules).unwrap();
    assert_eq!(
        outcome.report.as_deref(),
        Some(
            "[RangeWarning]: 'TimestampTest': Value(s) not of type timestamp set as NaT; \
             NaT value(s); duplicates; timestamp(s) too early; timestamp(s) too late."
        )
    );
    assert_eq!(
        outcome.payload.failure_mask().unwrap(),
        &[true, false, true, true, true, true]
    );
}

// =============================================================================
// String
// =============================================================================

#[test]
fn test_string_short_scenario() {
    let column = Column::new(
        "StringTest",
        vec![
            RawValue::from("1"),
            "ab\n".into(),
            "Ab".into(),
            "AB".into(),
            RawValue::Null,
        ],
    );
    let rules = StringRules::new()
        .with_nullable(false)
        .with_unique(true)
        .with_min_length(2)
        .with_max_length(2)
        .with_case(Case::Lower)
        .with_newlines(false)
        .with_whitespace(false)
        .with_return_type(ReturnType::MaskFrame);

    let outcome = validate_string(&column, &rules).unwrap();
    for id in [
        CheckId::Nullable,
        CheckId::TooShort,
        CheckId::WrongCase,
        CheckId::Newlines,
    ] {
        assert!(outcome.fired.contains(&id), "{id} should fire");
    }
    assert!(!outcome.fired.contains(&CheckId::Nonunique));

    let table = outcome.payload.mask_table().unwrap();
    assert_eq!(
        table.column(CheckId::TooShort).unwrap(),
        &[Some(true), Some(false), Some(false), Some(false), None]
    );
    assert_eq!(
        table.column(CheckId::WrongCase).unwrap(),
        &[Some(false), Some(false), Some(true), Some(true), None]
    );
    assert_eq!(
        table.column(CheckId::Newlines).unwrap(),
        &[Some(false), Some(true), Some(false), Some(false), None]
    );
    // "ab\n" is three characters long
    assert_eq!(
        table.column(CheckId::TooLong).unwrap(),
        &[Some(false), Some(true), Some(false), Some(false), None]
    );
    assert_eq!(table.column(CheckId::Pattern).unwrap(), &[None::<bool>; 5]);
}

#[test]
fn test_string_full_fixture() {
    let rules = StringRules::new()
        .with_unique(true)
        .with_min_length(2)
        .with_max_length(10)
        .with_case(Case::Lower)
        .with_newlines(false)
        .with_whitespace(false)
        .with_blacklist(["blacklist", "blocked", "ignore"])
        .with_return_type(ReturnType::MaskSeries);

    let outcome = validate_string(&string_test_column(), &rules).unwrap();
    assert_eq!(
        outcome.report.as_deref(),
        Some(
            "[RangeWarning]: 'StringTest': Non-string value(s) set as NaN; duplicates; \
             string(s) too short; string(s) too long; string(s) in blacklist; \
             wrong case letter(s); newline character(s); whitespace."
        )
    );

    let mask = outcome.payload.failure_mask().unwrap();
    let failing: Vec<usize> = mask
        .iter()
        .enumerate()
        .filter_map(|(i, f)| f.then_some(i))
        .collect();
    assert_eq!(
        failing,
        vec![2, 3, 4, 6, 7, 8, 9, 13, 14, 15, 16, 17, 18, 19]
    );
}

#[test]
fn test_string_whitelist_and_patterns() {
    let rules = StringRules::new()
        .with_whitelist(["goodstring", "abc123", "accepted"])
        .with_pattern(r"^(good|abc)")
        .with_forbidden_pattern(r"(\d{3})")
        .with_trailing_whitespace(false)
        .with_return_type(ReturnType::MaskFrame);

    let outcome = validate_string(&string_test_column(), &rules).unwrap();
    assert_eq!(
        outcome.fired,
        vec![
            CheckId::InvalidType,
            CheckId::NotInWhitelist,
            CheckId::TrailingWhitespace,
            CheckId::Pattern,
            CheckId::ForbiddenPattern,
        ]
    );

    let table = outcome.payload.mask_table().unwrap();
    // "goodstring"
    assert_eq!(table.get(10, CheckId::NotInWhitelist), Some(false));
    assert_eq!(table.get(10, CheckId::Pattern), Some(false));
    // "abc123" matches both the required and the forbidden pattern
    assert_eq!(table.get(20, CheckId::Pattern), Some(false));
    assert_eq!(table.get(20, CheckId::ForbiddenPattern), Some(true));
    // " abcabc "
    assert_eq!(table.get(9, CheckId::TrailingWhitespace), Some(true));
    // bytes are not evaluated beyond the type check
    assert_eq!(table.get(15, CheckId::InvalidType), Some(true));
    assert_eq!(table.column(CheckId::Pattern).unwrap()[15], None);
}

#[test]
fn test_string_title_case() {
    let column = Column::new("names", vec!["Ada Lovelace", "alan Turing", "GRACE HOPPER"]);
    let rules = StringRules::new()
        .with_case(Case::Title)
        .with_return_type(ReturnType::MaskSeries);

    let outcome = validate_string(&column, &rules).unwrap();
    assert_eq!(outcome.payload.failure_mask().unwrap(), &[false, true, true]);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_errors_abort_before_data() {
    let column = Column::unnamed(vec![date(2014, 1, 1)]);
    let rules = DateRules::new()
        .with_min_date(date(2015, 1, 1))
        .with_max_date(date(2014, 1, 1));

    let err = validate_date(&column, &rules).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidRange { .. }));
    assert!(err.to_string().contains("2015-01-01"));
}

#[test]
fn test_unknown_options_from_text() {
    assert!(matches!(
        "something invalid".parse::<ReturnType>(),
        Err(ValidationError::UnknownReturnType(_))
    ));
    assert!(matches!(
        "sentence".parse::<Case>(),
        Err(ValidationError::UnknownCase(_))
    ));
}

#[test]
fn test_rules_from_json() {
    let rules = ColumnRules::from_json(
        r#"{
            "type": "string",
            "nullable": false,
            "min_length": 2,
            "case": "upper",
            "return_type": "mask_series"
        }"#,
    )
    .unwrap();
    let column = Column::new("codes", vec![Some("AB"), Some("c"), None]);

    let outcome = validate(&column, &rules).unwrap();
    assert_eq!(
        outcome.fired,
        vec![CheckId::Nullable, CheckId::TooShort, CheckId::WrongCase]
    );
    assert_eq!(outcome.payload.failure_mask().unwrap(), &[false, true, true]);
}

#[test]
fn test_outcome_serializes_to_json() {
    let column = Column::new("n", vec![1_i64, 1]);
    let rules = NumericRules::new()
        .with_unique(true)
        .with_return_type(ReturnType::MaskFrame);
    let outcome = validate_numeric(&column, &rules).unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["fired"], serde_json::json!(["nonunique"]));
    assert_eq!(json["payload"]["kind"], "mask_table");
    assert_eq!(
        json["payload"]["data"]["columns"]["nonunique"],
        serde_json::json!([false, true])
    );
    assert_eq!(
        json["payload"]["data"]["columns"]["too_low"],
        serde_json::json!([null, null])
    );
}

#[test]
fn test_unknown_options_from_json() {
    let err = ColumnRules::from_json(r#"{"type": "string", "case": "camel"}"#).unwrap_err();
    assert!(matches!(err, ValidationError::UnknownCase(_)));

    let err = ColumnRules::from_json(r#"{"type": "numeric", "return_type": "bogus"}"#).unwrap_err();
    assert!(matches!(err, ValidationError::UnknownReturnType(_)));
    assert!(err.to_string().starts_with("Unknown return type 'bogus'"));
}

#[test]
fn test_prepared_plan_matches_direct_validation() {
    let bad = NumericRules::new().with_min_value(10.0).with_max_value(1.0);
    assert!(matches!(bad.plan(), Err(ValidationError::InvalidRange { .. })));

    let rules = NumericRules::new()
        .with_unique(true)
        .with_min_value(15.0)
        .with_return_type(ReturnType::MaskSeries);
    let plan = rules.plan().unwrap();
    assert_eq!(plan.kind(), ValueKind::Number);

    for column in [
        Column::new("a", vec![1_i64, 20, 20]),
        Column::new("b", vec![RawValue::Float(15.0), RawValue::Null, "x".into()]),
    ] {
        let prepared = run(&column, &plan, rules.return_type());
        assert_eq!(prepared, validate_numeric(&column, &rules).unwrap());
    }
}

// =============================================================================
// Text Rendering
// =============================================================================

#[test]
fn test_to_text_renders_for_string_validation() {
    let column = Column::new(
        "mixed",
        vec![
            RawValue::Int(7),
            RawValue::Date(date(2014, 1, 7)),
            RawValue::Null,
        ],
    );
    let text = to_text(&column, "%d/%m/%Y").unwrap();

    let rules = StringRules::new()
        .with_pattern(r"^\d+(/\d+/\d+)?$")
        .with_return_type(ReturnType::MaskSeries);
    let outcome = validate_string(&text, &rules).unwrap();
    assert!(outcome.is_valid());
    assert_eq!(text.values[1], RawValue::from("07/01/2014"));
}

#[test]
fn test_to_text_rejects_bad_format() {
    let column = Column::unnamed(vec![date(2014, 1, 7)]);
    let err = to_text(&column, "%Q").unwrap_err();
    assert!(matches!(err, ValidationError::InvalidFormat(_)));
}
