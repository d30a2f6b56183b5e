//! Validated name values used as record keys
//!
//! Names are trimmed before checking; two names are equal when their
//! trimmed values are equal.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{DesignError, Result};

static FEATURE_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").unwrap());

static TERM_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9\p{Han}\p{Hiragana}\p{Katakana}ー _\-]+$").unwrap()
});

/// Reasons a raw string is rejected as a name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    NotAString,
    Empty,
    InvalidChars,
}

impl std::fmt::Display for NameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameError::NotAString => write!(f, "name must be a string"),
            NameError::Empty => write!(f, "name cannot be empty"),
            NameError::InvalidChars => write!(f, "name contains characters that are not allowed"),
        }
    }
}

impl std::error::Error for NameError {}

fn parse_name(raw: &str, pattern: &Regex) -> std::result::Result<String, NameError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }
    if !pattern.is_match(trimmed) {
        return Err(NameError::InvalidChars);
    }
    Ok(trimmed.to_string())
}

/// Identity of a feature definition.
///
/// Starts with an ASCII letter, followed by letters, digits or underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureName(String);

impl FeatureName {
    /// Check a raw string without building an error message
    pub fn parse(raw: &str) -> std::result::Result<Self, NameError> {
        parse_name(raw, &FEATURE_NAME_PATTERN).map(Self)
    }

    pub fn create(raw: &str) -> Result<Self> {
        Self::parse(raw).map_err(|e| {
            DesignError::validation(format!(
                "Invalid feature name '{}': {}; must start with a letter and contain only letters, digits and underscores",
                raw, e
            ))
        })
    }

    /// Build from an untyped JSON value, rejecting non-strings
    pub fn from_value(value: &Value) -> Result<Self> {
        match value.as_str() {
            Some(raw) => Self::create(raw),
            None => Err(DesignError::validation(format!(
                "Invalid feature name: {}",
                NameError::NotAString
            ))),
        }
    }

    pub fn is_valid(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identity of a ubiquitous-language term.
///
/// Letters (ASCII and CJK), digits, spaces, hyphens and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TermName(String);

impl TermName {
    pub fn parse(raw: &str) -> std::result::Result<Self, NameError> {
        parse_name(raw, &TERM_NAME_PATTERN).map(Self)
    }

    pub fn create(raw: &str) -> Result<Self> {
        Self::parse(raw).map_err(|e| {
            DesignError::validation(format!(
                "Invalid term name '{}': {}; allowed are letters, digits, spaces, hyphens and underscores",
                raw, e
            ))
        })
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        match value.as_str() {
            Some(raw) => Self::create(raw),
            None => Err(DesignError::validation(format!(
                "Invalid term name: {}",
                NameError::NotAString
            ))),
        }
    }

    pub fn is_valid(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_name_traits {
    ($name:ty) => {
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = DesignError;

            fn from_str(s: &str) -> Result<Self> {
                Self::create(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }
    };
}

impl_name_traits!(FeatureName);
impl_name_traits!(TermName);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_name_pattern() {
        assert!(FeatureName::is_valid("Foo_1"));
        assert!(FeatureName::is_valid("checkout"));
        assert!(!FeatureName::is_valid("1Foo"));
        assert!(!FeatureName::is_valid(""));
        assert!(!FeatureName::is_valid("   "));
        assert!(!FeatureName::is_valid("Foo-Bar"));
        assert!(!FeatureName::is_valid("_private"));
    }

    #[test]
    fn test_feature_name_is_trimmed() {
        let a = FeatureName::create("  Checkout ").unwrap();
        let b = FeatureName::create("Checkout").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "Checkout");
    }

    #[test]
    fn test_feature_name_errors() {
        assert_eq!(FeatureName::parse(""), Err(NameError::Empty));
        assert_eq!(FeatureName::parse("a b"), Err(NameError::InvalidChars));

        let err = FeatureName::create("1Foo").unwrap_err();
        assert!(err.to_string().contains("1Foo"));
    }

    #[test]
    fn test_long_names_are_accepted() {
        let long = format!("A{}", "b".repeat(120));
        assert_eq!(FeatureName::create(&long).unwrap().as_str(), long);
        assert!(TermName::is_valid(&"注".repeat(300)));
    }

    #[test]
    fn test_from_value_rejects_non_strings() {
        assert!(FeatureName::from_value(&json!(42)).is_err());
        assert!(TermName::from_value(&json!(null)).is_err());
        assert!(TermName::from_value(&json!("Order")).is_ok());
    }

    #[test]
    fn test_term_name_pattern() {
        assert!(TermName::is_valid("Order"));
        assert!(TermName::is_valid("Order Line-Item_2"));
        assert!(TermName::is_valid("注文"));
        assert!(TermName::is_valid("カート"));
        assert!(!TermName::is_valid("Order!"));
        assert!(!TermName::is_valid("a/b"));
        assert!(!TermName::is_valid("\t"));
    }

    #[test]
    fn test_name_serializes_as_plain_string() {
        let name = TermName::create("Order").unwrap();
        assert_eq!(serde_json::to_value(&name).unwrap(), json!("Order"));
        assert_eq!(name.to_string(), "Order");
    }
}
