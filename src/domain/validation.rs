//! Structural validation of untrusted feature and term payloads
//!
//! Validation never stops at the first problem: every violation adds one
//! message to the result. Name charsets are not checked here, that is the
//! job of [`crate::domain::identity`].

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::{DesignError, Result};

/// Verdict of a structural validation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Convert into the crate result type, carrying all messages on failure
    pub fn into_result(self) -> Result<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(DesignError::Validation(self.errors))
        }
    }
}

fn child(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Accumulates violations while walking a payload
#[derive(Default)]
struct Checker {
    errors: Vec<String>,
}

impl Checker {
    fn push(&mut self, message: String) {
        self.errors.push(message);
    }

    /// Required nested object
    fn object<'a>(
        &mut self,
        parent: &'a Map<String, Value>,
        key: &str,
        parent_path: &str,
    ) -> Option<&'a Map<String, Value>> {
        let path = child(parent_path, key);
        match parent.get(key) {
            None | Some(Value::Null) => {
                self.push(format!("{} is required", path));
                None
            }
            Some(Value::Object(map)) => Some(map),
            Some(_) => {
                self.push(format!("{} must be an object", path));
                None
            }
        }
    }

    /// Optional free-form map; must be an object when present
    fn optional_object(&mut self, parent: &Map<String, Value>, key: &str, parent_path: &str) {
        match parent.get(key) {
            None | Some(Value::Null) | Some(Value::Object(_)) => {}
            Some(_) => self.push(format!("{} must be an object", child(parent_path, key))),
        }
    }

    /// Required string that must not be blank
    fn text(&mut self, parent: &Map<String, Value>, key: &str, parent_path: &str) {
        let path = child(parent_path, key);
        match parent.get(key) {
            None | Some(Value::Null) => self.push(format!("{} is required", path)),
            Some(Value::String(s)) if s.trim().is_empty() => {
                self.push(format!("{} must not be blank", path))
            }
            Some(Value::String(_)) => {}
            Some(_) => self.push(format!("{} must be a string", path)),
        }
    }

    /// Required array (may be empty)
    fn array<'a>(
        &mut self,
        parent: &'a Map<String, Value>,
        key: &str,
        parent_path: &str,
    ) -> Option<&'a Vec<Value>> {
        let path = child(parent_path, key);
        match parent.get(key) {
            None | Some(Value::Null) => {
                self.push(format!("{} is required", path));
                None
            }
            Some(Value::Array(items)) => Some(items),
            Some(_) => {
                self.push(format!("{} must be an array", path));
                None
            }
        }
    }

    /// Required array whose elements are all strings
    fn string_array(&mut self, parent: &Map<String, Value>, key: &str, parent_path: &str) {
        let path = child(parent_path, key);
        if let Some(items) = self.array(parent, key, parent_path) {
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    self.push(format!("{}[{}] must be a string", path, i));
                }
            }
        }
    }

    /// Walk each element of a required array of objects
    fn each_object<F>(&mut self, parent: &Map<String, Value>, key: &str, mut check: F)
    where
        F: FnMut(&mut Self, &Map<String, Value>, &str),
    {
        if let Some(items) = self.array(parent, key, "") {
            for (i, item) in items.iter().enumerate() {
                let path = format!("{}[{}]", key, i);
                match item.as_object() {
                    Some(obj) => check(self, obj, &path),
                    None => self.push(format!("{} must be an object", path)),
                }
            }
        }
    }

    fn nested_each_object<F>(
        &mut self,
        parent: &Map<String, Value>,
        key: &str,
        parent_path: &str,
        mut check: F,
    ) where
        F: FnMut(&mut Self, &Map<String, Value>, &str),
    {
        let base = child(parent_path, key);
        if let Some(items) = self.array(parent, key, parent_path) {
            for (i, item) in items.iter().enumerate() {
                let path = format!("{}[{}]", base, i);
                match item.as_object() {
                    Some(obj) => check(self, obj, &path),
                    None => self.push(format!("{} must be an object", path)),
                }
            }
        }
    }

    fn finish(self) -> ValidationResult {
        ValidationResult::from_errors(self.errors)
    }
}

/// Validate a raw feature payload
pub fn validate_feature(data: &Value) -> ValidationResult {
    let Some(root) = data.as_object() else {
        return ValidationResult::from_errors(vec![
            "feature record must be a JSON object".to_string()
        ]);
    };

    let mut c = Checker::default();

    if let Some(header) = c.object(root, "feature", "") {
        c.text(header, "name", "feature");
        c.text(header, "purpose", "feature");
    }

    c.string_array(root, "userStories", "");

    c.each_object(root, "inputs", |c, input, path| {
        c.text(input, "name", path);
        c.text(input, "dataTypeDescription", path);
        c.string_array(input, "constraints", path);
        c.text(input, "purpose", path);
    });

    c.each_object(root, "outputs", |c, output, path| {
        c.text(output, "condition", path);
        c.text(output, "dataDescription", path);
        c.optional_object(output, "structureHint", path);
    });

    let mut step_counts: BTreeMap<u64, usize> = BTreeMap::new();
    c.each_object(root, "coreLogicSteps", |c, step, path| {
        match step.get("stepNumber") {
            None | Some(Value::Null) => c.push(format!("{}.stepNumber is required", path)),
            Some(value) => match value.as_u64() {
                Some(n) if n >= 1 => *step_counts.entry(n).or_default() += 1,
                _ => c.push(format!("{}.stepNumber must be an integer >= 1", path)),
            },
        }
        c.text(step, "description", path);
        c.string_array(step, "inputs", path);
        c.text(step, "output", path);
    });
    for (number, count) in &step_counts {
        if *count > 1 {
            c.push(format!("coreLogicSteps: duplicate stepNumber {}", number));
        }
    }

    c.each_object(root, "errorHandling", |c, rule, path| {
        c.text(rule, "errorCondition", path);
        c.text(rule, "detectionPoint", path);
        c.text(rule, "handlingStrategyDescription", path);
        c.text(rule, "resultingOutputCondition", path);
    });

    c.each_object(root, "nonFunctionalRequirements", |c, nfr, path| {
        c.text(nfr, "requirement", path);
        c.text(nfr, "considerationsForLogic", path);
    });

    c.string_array(root, "documentationNotes", "");

    c.finish()
}

/// Validate a raw term payload
pub fn validate_term(data: &Value) -> ValidationResult {
    let Some(root) = data.as_object() else {
        return ValidationResult::from_errors(vec!["term record must be a JSON object".to_string()]);
    };

    let mut c = Checker::default();

    if let Some(header) = c.object(root, "term", "") {
        c.text(header, "name", "term");
        c.text(header, "definition", "term");
        c.string_array(header, "aliases", "term");
    }

    if let Some(context) = c.object(root, "context", "") {
        c.text(context, "boundedContext", "context");
        c.text(context, "scope", "context");
    }

    if let Some(details) = c.object(root, "details", "") {
        c.text(details, "category", "details");
        c.nested_each_object(details, "examples", "details", |c, example, path| {
            c.text(example, "scenario", path);
            c.text(example, "description", path);
        });
        c.string_array(details, "ambiguitiesAndBoundaries", "details");
    }

    if let Some(relationships) = c.object(root, "relationships", "") {
        c.nested_each_object(
            relationships,
            "relatedTerms",
            "relationships",
            |c, related, path| {
                c.text(related, "termName", path);
                c.text(related, "relationshipType", path);
            },
        );
        c.string_array(relationships, "associatedFunctions", "relationships");
    }

    if let Some(implementation) = c.object(root, "implementation", "") {
        c.text(implementation, "codeMapping", "implementation");
        c.optional_object(implementation, "dataStructureHint", "implementation");
        c.string_array(implementation, "constraints", "implementation");
    }

    c.finish()
}
