//! Read-only views: indexes, statistics and liveness

use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::domain::{FeatureEntity, TermEntity};
use crate::error::Result;
use crate::storage::Repository;
use crate::types::{FeatureSummary, HealthStatus, Statistics, TermSummary};

#[derive(Clone)]
pub struct Catalog {
    features: Arc<dyn Repository<FeatureEntity>>,
    terms: Arc<dyn Repository<TermEntity>>,
}

impl Catalog {
    pub fn new(
        features: Arc<dyn Repository<FeatureEntity>>,
        terms: Arc<dyn Repository<TermEntity>>,
    ) -> Self {
        Self { features, terms }
    }

    pub async fn feature_index(&self) -> Result<Vec<FeatureSummary>> {
        self.features.list().await
    }

    pub async fn term_index(&self) -> Result<Vec<TermSummary>> {
        self.terms.list().await
    }

    /// Counts built from the summary projection, so corrupt records still count
    pub async fn statistics(&self) -> Result<Statistics> {
        let total_features = self.features.count().await?;
        let terms = self.terms.list().await?;

        let mut terms_by_category: BTreeMap<String, usize> = BTreeMap::new();
        for term in &terms {
            *terms_by_category.entry(term.category.clone()).or_default() += 1;
        }

        Ok(Statistics {
            total_features,
            total_terms: terms.len(),
            terms_by_category,
            generated_at: Utc::now(),
        })
    }

    /// Load both collections and report how long it took
    pub async fn health(&self, data_path: &str) -> Result<HealthStatus> {
        let start = Instant::now();
        let features = self.features.count().await?;
        let terms = self.terms.count().await?;

        Ok(HealthStatus {
            status: "healthy".to_string(),
            features,
            terms,
            data_path: data_path.to_string(),
            latency_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}
