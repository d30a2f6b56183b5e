//! Validated, immutable feature and term entities
//!
//! An entity only exists once both its identity and its full payload have
//! been accepted. Updates go back through [`FeatureEntity::create`] /
//! [`TermEntity::create`], so there is no path that skips validation.

use serde::Serialize;
use serde_json::{json, Value};
use std::fmt::Display;

use super::identity::{FeatureName, TermName};
use super::merge::{merge_feature, merge_term};
use super::validation::{validate_feature, validate_term};
use crate::error::{DesignError, Result};
use crate::types::{str_at, Collection, FeatureData, FeatureSummary, TermData, TermSummary};

/// Behaviour shared by every record kind the document stores
pub trait Record: Clone + Send + Sync + 'static {
    type Name: Clone + Eq + Display + AsRef<str> + Serialize + Send + Sync + 'static;
    type Summary: Serialize + Send + 'static;

    /// Human-readable record kind ("feature", "term")
    const KIND: &'static str;
    /// Section holding the record's name
    const HEADER: &'static str;
    const COLLECTION: Collection;

    fn create(data: &Value) -> Result<Self>;
    fn parse_name(raw: &str) -> Result<Self::Name>;
    fn name(&self) -> &Self::Name;
    fn to_value(&self) -> Value;

    /// Project a raw stored record without validating it
    fn summarize(raw: &Value) -> Self::Summary;

    /// Name of a raw stored record, if it has one
    fn raw_name(raw: &Value) -> Option<&str> {
        str_at(raw, &[Self::HEADER, "name"])
    }

    fn matches(raw: &Value, name: &Self::Name) -> bool {
        Self::raw_name(raw).is_some_and(|n| n.trim() == name.as_ref())
    }
}

fn decode<T: serde::de::DeserializeOwned>(data: &Value, kind: &str) -> Result<T> {
    serde_json::from_value(data.clone())
        .map_err(|e| DesignError::validation(format!("{} record could not be decoded: {}", kind, e)))
}

/// A feature definition
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEntity {
    name: FeatureName,
    data: FeatureData,
}

impl FeatureEntity {
    pub fn create(data: &Value) -> Result<Self> {
        let raw_name = data
            .get("feature")
            .and_then(|header| header.get("name"))
            .unwrap_or(&Value::Null);
        let name = FeatureName::from_value(raw_name)?;

        validate_feature(data).into_result()?;

        let mut typed: FeatureData = decode(data, "feature")?;
        typed.feature.name = name.as_str().to_string();

        Ok(Self { name, data: typed })
    }

    /// Build from an already-typed payload, still running full validation
    pub fn from_data(data: FeatureData) -> Result<Self> {
        Self::create(&json!(data))
    }

    /// Merge a partial payload into this feature and re-validate the result
    pub fn update(&self, partial: &Value) -> Result<Self> {
        let merged = merge_feature(&self.to_value(), partial)?;
        Self::create(&merged)
    }

    pub fn name(&self) -> &FeatureName {
        &self.name
    }

    pub fn purpose(&self) -> &str {
        &self.data.feature.purpose
    }

    pub fn data(&self) -> &FeatureData {
        &self.data
    }

    pub fn into_data(self) -> FeatureData {
        self.data
    }

    pub fn to_value(&self) -> Value {
        json!(self.data)
    }

    pub fn summary(&self) -> FeatureSummary {
        FeatureSummary {
            name: self.name.to_string(),
            purpose: self.purpose().to_string(),
        }
    }
}

impl Record for FeatureEntity {
    type Name = FeatureName;
    type Summary = FeatureSummary;

    const KIND: &'static str = "feature";
    const HEADER: &'static str = "feature";
    const COLLECTION: Collection = Collection::Features;

    fn create(data: &Value) -> Result<Self> {
        FeatureEntity::create(data)
    }

    fn parse_name(raw: &str) -> Result<FeatureName> {
        FeatureName::create(raw)
    }

    fn name(&self) -> &FeatureName {
        &self.name
    }

    fn to_value(&self) -> Value {
        FeatureEntity::to_value(self)
    }

    fn summarize(raw: &Value) -> FeatureSummary {
        FeatureSummary {
            name: str_at(raw, &["feature", "name"]).unwrap_or_default().to_string(),
            purpose: str_at(raw, &["feature", "purpose"]).unwrap_or_default().to_string(),
        }
    }
}

/// A ubiquitous-language term
#[derive(Debug, Clone, PartialEq)]
pub struct TermEntity {
    name: TermName,
    data: TermData,
}

impl TermEntity {
    pub fn create(data: &Value) -> Result<Self> {
        let raw_name = data
            .get("term")
            .and_then(|header| header.get("name"))
            .unwrap_or(&Value::Null);
        let name = TermName::from_value(raw_name)?;

        validate_term(data).into_result()?;

        let mut typed: TermData = decode(data, "term")?;
        typed.term.name = name.as_str().to_string();

        Ok(Self { name, data: typed })
    }

    pub fn from_data(data: TermData) -> Result<Self> {
        Self::create(&json!(data))
    }

    pub fn update(&self, partial: &Value) -> Result<Self> {
        let merged = merge_term(&self.to_value(), partial)?;
        Self::create(&merged)
    }

    pub fn name(&self) -> &TermName {
        &self.name
    }

    pub fn definition(&self) -> &str {
        &self.data.term.definition
    }

    pub fn category(&self) -> &str {
        &self.data.details.category
    }

    pub fn bounded_context(&self) -> &str {
        &self.data.context.bounded_context
    }

    pub fn associated_functions(&self) -> &[String] {
        &self.data.relationships.associated_functions
    }

    pub fn data(&self) -> &TermData {
        &self.data
    }

    pub fn into_data(self) -> TermData {
        self.data
    }

    pub fn to_value(&self) -> Value {
        json!(self.data)
    }

    pub fn summary(&self) -> TermSummary {
        TermSummary {
            name: self.name.to_string(),
            definition: self.definition().to_string(),
            category: self.category().to_string(),
        }
    }
}

impl Record for TermEntity {
    type Name = TermName;
    type Summary = TermSummary;

    const KIND: &'static str = "term";
    const HEADER: &'static str = "term";
    const COLLECTION: Collection = Collection::Terms;

    fn create(data: &Value) -> Result<Self> {
        TermEntity::create(data)
    }

    fn parse_name(raw: &str) -> Result<TermName> {
        TermName::create(raw)
    }

    fn name(&self) -> &TermName {
        &self.name
    }

    fn to_value(&self) -> Value {
        TermEntity::to_value(self)
    }

    fn summarize(raw: &Value) -> TermSummary {
        TermSummary {
            name: str_at(raw, &["term", "name"]).unwrap_or_default().to_string(),
            definition: str_at(raw, &["term", "definition"]).unwrap_or_default().to_string(),
            category: str_at(raw, &["details", "category"]).unwrap_or_default().to_string(),
        }
    }
}
