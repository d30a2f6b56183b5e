//! Field-by-field merge of partial updates into full record payloads
//!
//! Each record type lists its sections and the keys a patch may touch.
//! Keys outside those lists are ignored. Array fields are replaced, never
//! concatenated.

use serde_json::{Map, Value};

use crate::error::{DesignError, Result};

/// Mergeable sections of a feature record
const FEATURE_SECTIONS: &[(&str, &[&str])] = &[("feature", &["name", "purpose"])];

/// Top-level feature fields replaced wholesale
const FEATURE_LISTS: &[&str] = &[
    "userStories",
    "inputs",
    "outputs",
    "coreLogicSteps",
    "errorHandling",
    "nonFunctionalRequirements",
    "documentationNotes",
];

const TERM_SECTIONS: &[(&str, &[&str])] = &[
    ("term", &["name", "definition", "aliases"]),
    ("context", &["boundedContext", "scope"]),
    ("details", &["category", "examples", "ambiguitiesAndBoundaries"]),
    ("relationships", &["relatedTerms", "associatedFunctions"]),
    ("implementation", &["codeMapping", "dataStructureHint", "constraints"]),
];

fn patch_object<'a>(patch: &'a Value, kind: &str) -> Result<&'a Map<String, Value>> {
    patch
        .as_object()
        .ok_or_else(|| DesignError::InvalidInput(format!("{} update must be a JSON object", kind)))
}

fn merge_section(
    target: &mut Map<String, Value>,
    patch: &Map<String, Value>,
    section: &str,
    keys: &[&str],
) -> Result<()> {
    let Some(incoming) = patch.get(section) else {
        return Ok(());
    };
    let incoming = incoming
        .as_object()
        .ok_or_else(|| DesignError::InvalidInput(format!("{} must be an object", section)))?;

    let slot = target
        .entry(section.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    if let Value::Object(existing) = slot {
        for key in keys {
            if let Some(value) = incoming.get(*key) {
                existing.insert((*key).to_string(), value.clone());
            }
        }
    }
    Ok(())
}

fn base_object(current: &Value) -> Map<String, Value> {
    current.as_object().cloned().unwrap_or_default()
}

/// Merge a partial feature payload into a full one
pub fn merge_feature(current: &Value, patch: &Value) -> Result<Value> {
    let patch = patch_object(patch, "feature")?;
    let mut merged = base_object(current);

    for (section, keys) in FEATURE_SECTIONS {
        merge_section(&mut merged, patch, section, keys)?;
    }
    for key in FEATURE_LISTS {
        if let Some(value) = patch.get(*key) {
            merged.insert((*key).to_string(), value.clone());
        }
    }

    Ok(Value::Object(merged))
}

/// Merge a partial term payload into a full one
pub fn merge_term(current: &Value, patch: &Value) -> Result<Value> {
    let patch = patch_object(patch, "term")?;
    let mut merged = base_object(current);

    for (section, keys) in TERM_SECTIONS {
        merge_section(&mut merged, patch, section, keys)?;
    }

    Ok(Value::Object(merged))
}
