//! Core record types for the design knowledge base
//!
//! These are the typed projections of the JSON records kept in the
//! document. Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The two record collections held by the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Features,
    Terms,
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collection::Features => write!(f, "features"),
            Collection::Terms => write!(f, "terms"),
        }
    }
}

/// Header section of a feature record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureHeader {
    pub name: String,
    pub purpose: String,
}

/// A named input consumed by a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureInput {
    pub name: String,
    pub data_type_description: String,
    pub constraints: Vec<String>,
    pub purpose: String,
}

/// An output produced by a feature under some condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureOutput {
    pub condition: String,
    pub data_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_hint: Option<Map<String, Value>>,
}

/// One step of a feature's core logic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreLogicStep {
    pub step_number: u64,
    pub description: String,
    pub inputs: Vec<String>,
    pub output: String,
}

/// How a feature reacts to one error condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHandlingRule {
    pub error_condition: String,
    pub detection_point: String,
    pub handling_strategy_description: String,
    pub resulting_output_condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonFunctionalRequirement {
    pub requirement: String,
    pub considerations_for_logic: String,
}

/// Full payload of a feature definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureData {
    pub feature: FeatureHeader,
    pub user_stories: Vec<String>,
    pub inputs: Vec<FeatureInput>,
    pub outputs: Vec<FeatureOutput>,
    pub core_logic_steps: Vec<CoreLogicStep>,
    pub error_handling: Vec<ErrorHandlingRule>,
    pub non_functional_requirements: Vec<NonFunctionalRequirement>,
    pub documentation_notes: Vec<String>,
}

/// Header section of a term record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermHeader {
    pub name: String,
    pub definition: String,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermContext {
    pub bounded_context: String,
    pub scope: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermExample {
    pub scenario: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermDetails {
    pub category: String,
    pub examples: Vec<TermExample>,
    pub ambiguities_and_boundaries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedTerm {
    pub term_name: String,
    pub relationship_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermRelationships {
    pub related_terms: Vec<RelatedTerm>,
    /// Soft references to feature names; not checked against the feature collection
    pub associated_functions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermImplementation {
    pub code_mapping: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_structure_hint: Option<Map<String, Value>>,
    pub constraints: Vec<String>,
}

/// Full payload of a ubiquitous-language term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermData {
    pub term: TermHeader,
    pub context: TermContext,
    pub details: TermDetails,
    pub relationships: TermRelationships,
    pub implementation: TermImplementation,
}

/// Lightweight index entry for a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub name: String,
    pub purpose: String,
}

/// Lightweight index entry for a term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermSummary {
    pub name: String,
    pub definition: String,
    pub category: String,
}

/// Aggregate counts over the document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_features: usize,
    pub total_terms: usize,
    pub terms_by_category: BTreeMap<String, usize>,
    pub generated_at: DateTime<Utc>,
}

/// Liveness report for the backing document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub features: usize,
    pub terms: usize,
    pub data_path: String,
    pub latency_ms: f64,
}

/// Read a string at a dotted path inside an untyped record, if present
pub(crate) fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    current.as_str()
}
