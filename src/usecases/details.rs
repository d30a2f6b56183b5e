//! Bulk lookup of features and terms by name

use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::domain::{FeatureEntity, FeatureName, Record, TermEntity, TermName};
use crate::error::{DesignError, Result};
use crate::storage::{Lookup, Repository};

/// Names to look up; an absent or empty list skips that collection entirely
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsRequest {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    #[serde(default)]
    pub term_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailsResult {
    pub features: Lookup<FeatureEntity, FeatureName>,
    pub terms: Lookup<TermEntity, TermName>,
}

impl DetailsResult {
    pub fn message(&self) -> String {
        format!(
            "Found {} feature(s) and {} term(s); {} feature(s) and {} term(s) not found",
            self.features.found.len(),
            self.terms.found.len(),
            self.features.not_found.len(),
            self.terms.not_found.len()
        )
    }

    pub fn to_json(&self) -> Value {
        json!({
            "features": {
                "found": self.features.found.iter().map(FeatureEntity::to_value).collect::<Vec<_>>(),
                "notFound": self.features.not_found,
            },
            "terms": {
                "found": self.terms.found.iter().map(TermEntity::to_value).collect::<Vec<_>>(),
                "notFound": self.terms.not_found,
            },
        })
    }
}

pub struct GetDetails {
    features: Arc<dyn Repository<FeatureEntity>>,
    terms: Arc<dyn Repository<TermEntity>>,
}

impl Clone for GetDetails {
    fn clone(&self) -> Self {
        Self {
            features: self.features.clone(),
            terms: self.terms.clone(),
        }
    }
}

fn check_name_list(root: &serde_json::Map<String, Value>, key: &str) -> Result<()> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Array(items)) if items.iter().all(Value::is_string) => Ok(()),
        Some(_) => Err(DesignError::InvalidInput(format!(
            "{} must be an array of strings",
            key
        ))),
    }
}

/// Parse every raw name, failing with all bad names at once
fn parse_names<R: Record>(raw: Option<&[String]>) -> Result<Vec<R::Name>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    let mut names = Vec::with_capacity(raw.len());
    let mut errors = Vec::new();
    for item in raw {
        match R::parse_name(item) {
            Ok(name) => names.push(name),
            Err(DesignError::Validation(mut messages)) => errors.append(&mut messages),
            Err(e) => errors.push(e.to_string()),
        }
    }

    if errors.is_empty() {
        Ok(names)
    } else {
        Err(DesignError::Validation(errors))
    }
}

impl GetDetails {
    pub fn new(
        features: Arc<dyn Repository<FeatureEntity>>,
        terms: Arc<dyn Repository<TermEntity>>,
    ) -> Self {
        Self { features, terms }
    }

    pub fn validate_input(&self, raw: &Value) -> Result<()> {
        match raw {
            Value::Null => Ok(()),
            Value::Object(root) => {
                check_name_list(root, "featureNames")?;
                check_name_list(root, "termNames")
            }
            _ => Err(DesignError::InvalidInput(
                "details request must be a JSON object".to_string(),
            )),
        }
    }

    pub async fn execute(&self, raw: &Value) -> Result<DetailsResult> {
        self.validate_input(raw)?;
        let request: DetailsRequest = if raw.is_null() {
            DetailsRequest::default()
        } else {
            serde_json::from_value(raw.clone())
                .map_err(|e| DesignError::InvalidInput(e.to_string()))?
        };
        self.lookup(&request).await
    }

    pub async fn lookup(&self, request: &DetailsRequest) -> Result<DetailsResult> {
        let feature_names = parse_names::<FeatureEntity>(request.feature_names.as_deref());
        let term_names = parse_names::<TermEntity>(request.term_names.as_deref());

        let (feature_names, term_names) = match (feature_names, term_names) {
            (Ok(f), Ok(t)) => (f, t),
            (Err(DesignError::Validation(mut a)), Err(DesignError::Validation(mut b))) => {
                a.append(&mut b);
                return Err(DesignError::Validation(a));
            }
            (Err(e), _) | (_, Err(e)) => return Err(e),
        };

        let features = if feature_names.is_empty() {
            Lookup::default()
        } else {
            self.features.find_by_names(&feature_names).await?
        };
        let terms = if term_names.is_empty() {
            Lookup::default()
        } else {
            self.terms.find_by_names(&term_names).await?
        };

        Ok(DetailsResult { features, terms })
    }
}
