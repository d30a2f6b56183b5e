//! Golden tests - fixture-based tests that lock expected behavior
//!
//! These tests use JSON fixtures to verify that name parsing and record
//! validation produce the expected outputs. Any change in behavior will
//! cause these tests to fail, signaling a potential breaking change.
//!
//! Run with: cargo test --test golden_tests

use serde::Deserialize;
use std::fs;

use design_kb::domain::NameError;

#[derive(Debug, Deserialize)]
struct TestCase {
    name: String,
    input: String,
    expected: Expected,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Expected {
    Ok { ok: String },
    Err { err: String },
}

#[derive(Debug, Deserialize)]
struct Fixture {
    test_cases: Vec<TestCase>,
}

fn load_fixture<T: for<'de> Deserialize<'de>>(path: &str) -> T {
    let content =
        fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e));
    serde_json::from_str(&content).expect("Failed to parse fixture JSON")
}

fn error_name(err: NameError) -> &'static str {
    match err {
        NameError::NotAString => "NotAString",
        NameError::Empty => "Empty",
        NameError::InvalidChars => "InvalidChars",
    }
}

fn check_cases<F>(fixture: Fixture, parse: F)
where
    F: Fn(&str) -> Result<String, NameError>,
{
    for case in fixture.test_cases {
        let result = parse(&case.input);

        match case.expected {
            Expected::Ok { ok } => {
                assert!(
                    result.is_ok(),
                    "Case '{}': expected Ok({:?}), got Err({:?})",
                    case.name,
                    ok,
                    result.err()
                );
                assert_eq!(
                    result.unwrap(),
                    ok,
                    "Case '{}': parsed value mismatch",
                    case.name
                );
            }
            Expected::Err { err } => {
                assert!(
                    result.is_err(),
                    "Case '{}': expected Err({}), got Ok({:?})",
                    case.name,
                    err,
                    result.ok()
                );
                assert_eq!(
                    error_name(result.unwrap_err()),
                    err,
                    "Case '{}': error variant mismatch",
                    case.name
                );
            }
        }
    }
}

// ============================================================================
// NAME PARSING GOLDEN TESTS
// ============================================================================

mod name_golden {
    use super::*;
    use design_kb::{FeatureName, TermName};

    #[test]
    fn test_feature_name_golden() {
        let fixture: Fixture = load_fixture(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/feature_names.json"
        ));
        check_cases(fixture, |raw| {
            FeatureName::parse(raw).map(|n| n.as_str().to_string())
        });
    }

    #[test]
    fn test_term_name_golden() {
        let fixture: Fixture = load_fixture(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/term_names.json"
        ));
        check_cases(fixture, |raw| TermName::parse(raw).map(|n| n.as_str().to_string()));
    }
}

// ============================================================================
// RECORD VALIDATION GOLDEN TESTS
// ============================================================================

mod validation_golden {
    use super::*;
    use design_kb::domain::validate_feature;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    #[derive(Debug, Deserialize)]
    struct ValidationCase {
        name: String,
        input: Value,
        errors: Vec<String>,
    }

    #[derive(Debug, Deserialize)]
    struct ValidationFixture {
        test_cases: Vec<ValidationCase>,
    }

    #[test]
    fn test_feature_validation_golden() {
        let fixture: ValidationFixture = load_fixture(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/feature_validation.json"
        ));

        for case in fixture.test_cases {
            let result = validate_feature(&case.input);
            assert_eq!(
                result.errors, case.errors,
                "Case '{}': error list mismatch",
                case.name
            );
            assert_eq!(result.is_valid, case.errors.is_empty(), "Case '{}'", case.name);
        }
    }
}
