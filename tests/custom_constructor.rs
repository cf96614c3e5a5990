use std::error::Error;

use fieldwise::{
    custom_constructor, has_custom_constructor, json, record, CustomConstructor,
};
use rstest::rstest;

record! {
    #[derive(Debug, Clone, PartialEq)]
    pub struct RawRange {
        pub lo: i64,
        pub hi: i64,
    }
}

/// A range whose bounds are ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    lo: i64,
    hi: i64,
}

impl CustomConstructor for Range {
    type Raw = RawRange;

    fn from_raw(raw: RawRange) -> Result<Self, Box<dyn Error + Send + Sync>> {
        if raw.lo == i64::MIN {
            panic!("lower bound is unbounded");
        }
        if raw.lo > raw.hi {
            return Err(format!("lower bound {} exceeds upper bound {}", raw.lo, raw.hi).into());
        }
        Ok(Range {
            lo: raw.lo,
            hi: raw.hi,
        })
    }

    fn to_raw(&self) -> RawRange {
        RawRange {
            lo: self.lo,
            hi: self.hi,
        }
    }
}

custom_constructor!(Range);

record! {
    #[derive(Debug, PartialEq)]
    pub struct Window {
        pub name: String,
        pub range: Range,
    }
}

#[rstest]
fn test_dispatch_is_known_at_compile_time() {
    const CUSTOM: bool = has_custom_constructor::<Range>();
    assert!(CUSTOM);
    assert!(!has_custom_constructor::<RawRange>());
    assert!(!has_custom_constructor::<Window>());
}

#[rstest]
fn test_round_trip_goes_through_raw() {
    let input = r#"{"name":"day","range":{"lo":1,"hi":5}}"#;
    let window: Window = json::read(input).unwrap();
    assert_eq!(window.range, Range { lo: 1, hi: 5 });
    assert_eq!(json::write(&window), input);
}

#[rstest]
fn test_constructor_error_becomes_parse_error() {
    let err = json::read::<Window>(r#"{"name":"day","range":{"lo":5,"hi":1}}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to parse field 'range': lower bound 5 exceeds upper bound 1"
    );
}

#[rstest]
fn test_constructor_panic_becomes_parse_error() {
    let input = format!(r#"{{"name":"day","range":{{"lo":{},"hi":0}}}}"#, i64::MIN);
    let err = json::read::<Window>(&input).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to parse field 'range': lower bound is unbounded"
    );
}

#[rstest]
fn test_raw_errors_are_reported_before_construction() {
    let err = json::read::<Range>(r#"{"lo":"one"}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Found 2 errors:\n\
         1) Failed to parse field 'lo': Could not cast to int.\n\
         2) Field named 'hi' not found."
    );
}
