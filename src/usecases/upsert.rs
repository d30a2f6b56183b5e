//! Add-or-update for features and terms

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::title;
use crate::domain::Record;
use crate::error::{DesignError, Result};
use crate::storage::Repository;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertResult {
    pub name: String,
    pub is_update: bool,
    pub message: String,
}

/// Validates a full record and stores it under its name
pub struct AddOrUpdate<R: Record> {
    repo: Arc<dyn Repository<R>>,
}

impl<R: Record> Clone for AddOrUpdate<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R: Record> AddOrUpdate<R> {
    pub fn new(repo: Arc<dyn Repository<R>>) -> Self {
        Self { repo }
    }

    /// Pre-flight shape check: an object with a named header section
    pub fn validate_input(&self, raw: &Value) -> Result<()> {
        let root = raw.as_object().ok_or_else(|| {
            DesignError::InvalidInput(format!("{} data must be a JSON object", R::KIND))
        })?;

        match root.get(R::HEADER) {
            Some(Value::Object(header)) => match header.get("name") {
                Some(Value::String(_)) => Ok(()),
                _ => Err(DesignError::InvalidInput(format!(
                    "{}.name is required and must be a string",
                    R::HEADER
                ))),
            },
            _ => Err(DesignError::InvalidInput(format!(
                "'{}' section is required",
                R::HEADER
            ))),
        }
    }

    pub async fn execute(&self, raw: &Value) -> Result<UpsertResult> {
        self.validate_input(raw)?;

        let entity = R::create(raw).map_err(|e| {
            tracing::warn!("Rejected {} payload: {}", R::KIND, e);
            e
        })?;

        // Informational only; the upsert decision is made by `save`.
        match self.repo.exists(entity.name()).await {
            Ok(existed) => tracing::debug!(
                "{} '{}' {}",
                R::KIND,
                entity.name(),
                if existed { "exists, replacing" } else { "is new" }
            ),
            Err(e) => tracing::warn!(
                "Could not check whether {} '{}' exists: {}",
                R::KIND,
                entity.name(),
                e
            ),
        }

        let outcome = self.repo.save(&entity).await?;
        let verb = if outcome.is_update { "updated" } else { "created" };

        Ok(UpsertResult {
            name: entity.name().to_string(),
            is_update: outcome.is_update,
            message: format!("{} '{}' {} successfully", title(R::KIND), entity.name(), verb),
        })
    }
}
