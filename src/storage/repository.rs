//! Repository contract over the JSON document
//!
//! Every call loads the document, works on it in memory and, for
//! mutations, writes it back. Reads that build entities are fail-fast: a
//! single stored record that does not pass entity validation fails the
//! whole call. The summary projection and `count` never validate.

use async_trait::async_trait;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;

use super::document::{DocumentStore, Mutation};
use crate::domain::{Record, TermEntity};
use crate::error::{DesignError, Result};

/// Result of an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutcome {
    pub is_update: bool,
}

/// Result of a delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub found: bool,
}

/// Bulk lookup partitioned into hits and misses, in request order
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup<E, N> {
    pub found: Vec<E>,
    pub not_found: Vec<N>,
}

impl<E, N> Default for Lookup<E, N> {
    fn default() -> Self {
        Self {
            found: Vec::new(),
            not_found: Vec::new(),
        }
    }
}

/// Storage contract for one record kind
#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    /// Exact-name lookup; absence is not an error
    async fn find_by_name(&self, name: &R::Name) -> Result<Option<R>>;

    async fn find_all(&self) -> Result<Vec<R>>;

    /// Lightweight index that skips full validation
    async fn list(&self) -> Result<Vec<R::Summary>>;

    /// Replace the entry with the same name, or append a new one
    async fn save(&self, entity: &R) -> Result<SaveOutcome>;

    async fn delete(&self, name: &R::Name) -> Result<DeleteOutcome>;

    async fn count(&self) -> Result<usize>;

    async fn find_by_names(&self, names: &[R::Name]) -> Result<Lookup<R, R::Name>>;

    async fn exists(&self, name: &R::Name) -> Result<bool> {
        Ok(self.find_by_name(name).await?.is_some())
    }
}

/// Attribute filters over terms, layered on `find_all`
#[async_trait]
pub trait TermQueries: Repository<TermEntity> {
    async fn find_by_category(&self, category: &str) -> Result<Vec<TermEntity>> {
        let terms = self.find_all().await?;
        Ok(terms.into_iter().filter(|t| t.category() == category).collect())
    }

    async fn find_by_bounded_context(&self, bounded_context: &str) -> Result<Vec<TermEntity>> {
        let terms = self.find_all().await?;
        Ok(terms
            .into_iter()
            .filter(|t| t.bounded_context() == bounded_context)
            .collect())
    }

    async fn find_by_associated_function(&self, feature_name: &str) -> Result<Vec<TermEntity>> {
        let terms = self.find_all().await?;
        Ok(terms
            .into_iter()
            .filter(|t| t.associated_functions().iter().any(|f| f == feature_name))
            .collect())
    }
}

impl<T: Repository<TermEntity> + ?Sized> TermQueries for T {}

/// Repository backed by the shared JSON document
pub struct JsonRepository<R: Record> {
    store: Arc<DocumentStore>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> JsonRepository<R> {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Turn a stored record into an entity, reporting corruption with context
    fn hydrate(raw: &serde_json::Value) -> Result<R> {
        R::create(raw).map_err(|e| DesignError::CorruptRecord {
            kind: R::KIND,
            name: R::raw_name(raw).unwrap_or("<unnamed>").to_string(),
            message: e.to_string(),
        })
    }
}

impl<R: Record> Clone for JsonRepository<R> {
    fn clone(&self) -> Self {
        Self::new(self.store.clone())
    }
}

#[async_trait]
impl<R: Record> Repository<R> for JsonRepository<R> {
    async fn find_by_name(&self, name: &R::Name) -> Result<Option<R>> {
        let document = self.store.load().await?;
        document
            .collection(R::COLLECTION)
            .iter()
            .find(|raw| R::matches(raw, name))
            .map(Self::hydrate)
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<R>> {
        let document = self.store.load().await?;
        document
            .collection(R::COLLECTION)
            .iter()
            .map(Self::hydrate)
            .collect()
    }

    async fn list(&self) -> Result<Vec<R::Summary>> {
        let document = self.store.load().await?;
        Ok(document
            .collection(R::COLLECTION)
            .iter()
            .map(R::summarize)
            .collect())
    }

    async fn save(&self, entity: &R) -> Result<SaveOutcome> {
        let value = entity.to_value();
        let name = entity.name().clone();

        let outcome = self
            .store
            .mutate(move |document| {
                let records = document.collection_mut(R::COLLECTION);
                let is_update = match records.iter().position(|raw| R::matches(raw, &name)) {
                    Some(index) => {
                        records[index] = value;
                        true
                    }
                    None => {
                        records.push(value);
                        false
                    }
                };
                Ok(Mutation::Persist(SaveOutcome { is_update }))
            })
            .await?;

        tracing::info!(
            "{} {} '{}'",
            if outcome.is_update { "Updated" } else { "Created" },
            R::KIND,
            entity.name()
        );
        Ok(outcome)
    }

    async fn delete(&self, name: &R::Name) -> Result<DeleteOutcome> {
        let outcome = self
            .store
            .mutate(|document| {
                let records = document.collection_mut(R::COLLECTION);
                match records.iter().position(|raw| R::matches(raw, name)) {
                    Some(index) => {
                        records.remove(index);
                        Ok(Mutation::Persist(DeleteOutcome { found: true }))
                    }
                    None => Ok(Mutation::Unchanged(DeleteOutcome { found: false })),
                }
            })
            .await?;

        if outcome.found {
            tracing::info!("Deleted {} '{}'", R::KIND, name);
        }
        Ok(outcome)
    }

    async fn count(&self) -> Result<usize> {
        let document = self.store.load().await?;
        Ok(document.collection(R::COLLECTION).len())
    }

    async fn find_by_names(&self, names: &[R::Name]) -> Result<Lookup<R, R::Name>> {
        let document = self.store.load().await?;
        let records = document.collection(R::COLLECTION);

        let mut lookup = Lookup::default();
        for name in names {
            match records.iter().find(|raw| R::matches(raw, name)) {
                Some(raw) => lookup.found.push(Self::hydrate(raw)?),
                None => lookup.not_found.push(name.clone()),
            }
        }
        Ok(lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{sample_feature, sample_term};
    use crate::domain::{FeatureEntity, FeatureName, TermName};
    use serde_json::json;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Arc<DocumentStore>) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(DocumentStore::new(dir.path().join("design.json")));
        (dir, store)
    }

    fn feature(name: &str) -> FeatureEntity {
        FeatureEntity::create(&sample_feature(name)).unwrap()
    }

    fn term(name: &str, context: &str) -> TermEntity {
        TermEntity::create(&sample_term(name, context)).unwrap()
    }

    #[tokio::test]
    async fn test_save_then_find_round_trip() {
        let (_dir, store) = setup();
        let repo = JsonRepository::<FeatureEntity>::new(store);

        let entity = feature("Checkout");
        repo.save(&entity).await.unwrap();

        let found = repo.find_by_name(entity.name()).await.unwrap().unwrap();
        assert_eq!(found, entity);
    }

    #[tokio::test]
    async fn test_upsert_reports_update_and_keeps_length() {
        let (_dir, store) = setup();
        let repo = JsonRepository::<FeatureEntity>::new(store);
        let entity = feature("Checkout");

        assert!(!repo.save(&entity).await.unwrap().is_update);
        assert!(repo.save(&entity).await.unwrap().is_update);
        assert_eq!(repo.count().await.unwrap(), 1);

        let changed = entity
            .update(&json!({"feature": {"purpose": "Changed"}}))
            .unwrap();
        assert!(repo.save(&changed).await.unwrap().is_update);
        let stored = repo.find_by_name(changed.name()).await.unwrap().unwrap();
        assert_eq!(stored.purpose(), "Changed");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_outcomes() {
        let (_dir, store) = setup();
        let repo = JsonRepository::<FeatureEntity>::new(store.clone());
        let ghost = FeatureName::create("Ghost").unwrap();

        assert!(!repo.delete(&ghost).await.unwrap().found);
        assert!(!repo.delete(&ghost).await.unwrap().found);
        // deleting an absent record never creates the file
        assert!(!store.path().exists());

        let entity = feature("Checkout");
        repo.save(&entity).await.unwrap();
        assert!(repo.delete(entity.name()).await.unwrap().found);
        assert!(!repo.delete(entity.name()).await.unwrap().found);
        assert!(!repo.exists(entity.name()).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_file_behaves_as_empty() {
        let (_dir, store) = setup();
        let features = JsonRepository::<FeatureEntity>::new(store.clone());
        let terms = JsonRepository::<TermEntity>::new(store);

        assert_eq!(features.count().await.unwrap(), 0);
        assert!(features.find_all().await.unwrap().is_empty());
        assert!(terms.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_names_partitions_in_request_order() {
        let (_dir, store) = setup();
        let repo = JsonRepository::<TermEntity>::new(store);
        repo.save(&term("Term1", "Sales")).await.unwrap();
        repo.save(&term("Term2", "Sales")).await.unwrap();

        let names = vec![
            TermName::create("Term2").unwrap(),
            TermName::create("Term1").unwrap(),
            TermName::create("Ghost").unwrap(),
        ];
        let lookup = repo.find_by_names(&names).await.unwrap();

        let found: Vec<&str> = lookup.found.iter().map(|t| t.name().as_str()).collect();
        assert_eq!(found, vec!["Term2", "Term1"]);
        assert_eq!(lookup.not_found, vec![TermName::create("Ghost").unwrap()]);
    }

    #[tokio::test]
    async fn test_corrupt_record_fails_fast_but_list_succeeds() {
        let (_dir, store) = setup();
        let good = term("Order", "Sales");
        std::fs::write(
            store.path(),
            serde_json::to_string_pretty(&json!({
                "features": [],
                "terms": [good.to_value(), {"term": {"name": "Broken"}}]
            }))
            .unwrap(),
        )
        .unwrap();

        let repo = JsonRepository::<TermEntity>::new(store);

        match repo.find_all().await {
            Err(DesignError::CorruptRecord { kind, name, .. }) => {
                assert_eq!(kind, "term");
                assert_eq!(name, "Broken");
            }
            other => panic!("expected corrupt record error, got {:?}", other.map(|v| v.len())),
        }

        let summaries = repo.list().await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(repo.count().await.unwrap(), 2);

        // a corrupt hit fails the batch; it is never reported as missing
        let names = vec![
            TermName::create("Order").unwrap(),
            TermName::create("Broken").unwrap(),
        ];
        assert!(repo.find_by_names(&names).await.is_err());

        // a lookup that only touches the good record still works
        let only_good = repo
            .find_by_names(&[TermName::create("Order").unwrap()])
            .await
            .unwrap();
        assert_eq!(only_good.found.len(), 1);
    }

    #[tokio::test]
    async fn test_term_filters() {
        let (_dir, store) = setup();
        let repo = JsonRepository::<TermEntity>::new(store);
        repo.save(&term("Order", "Sales")).await.unwrap();
        repo.save(&term("Invoice", "Billing")).await.unwrap();

        let mut shipment = sample_term("Shipment", "Logistics");
        shipment["details"]["category"] = json!("Value Object");
        shipment["relationships"]["associatedFunctions"] = json!(["Dispatch"]);
        repo.save(&TermEntity::create(&shipment).unwrap()).await.unwrap();

        assert_eq!(repo.find_by_category("Entity").await.unwrap().len(), 2);
        assert_eq!(repo.find_by_bounded_context("Billing").await.unwrap().len(), 1);

        let dispatch = repo.find_by_associated_function("Dispatch").await.unwrap();
        assert_eq!(dispatch.len(), 1);
        assert_eq!(dispatch[0].name().as_str(), "Shipment");
    }

    #[tokio::test]
    async fn test_collections_are_independent() {
        let (_dir, store) = setup();
        let features = JsonRepository::<FeatureEntity>::new(store.clone());
        let terms = JsonRepository::<TermEntity>::new(store);

        features.save(&feature("Checkout")).await.unwrap();
        terms.save(&term("Checkout", "Sales")).await.unwrap();

        assert_eq!(features.count().await.unwrap(), 1);
        assert_eq!(terms.count().await.unwrap(), 1);
        assert!(terms.delete(&TermName::create("Checkout").unwrap()).await.unwrap().found);
        assert_eq!(features.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_saves_do_not_lose_updates() {
        let (_dir, store) = setup();
        let repo = Arc::new(JsonRepository::<FeatureEntity>::new(store));

        let mut handles = Vec::new();
        for i in 0..16 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.save(&feature(&format!("Feature{}", i))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.count().await.unwrap(), 16);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_reads_during_saves_never_see_partial_document() {
        let (_dir, store) = setup();
        let repo = Arc::new(JsonRepository::<FeatureEntity>::new(store));

        let mut big = sample_feature("Feature0");
        big["documentationNotes"] = json!(vec!["x".repeat(200); 100]);
        for i in 0..20 {
            big["feature"]["name"] = json!(format!("Feature{}", i));
            repo.save(&FeatureEntity::create(&big).unwrap()).await.unwrap();
        }
        let existing = FeatureEntity::create(&big).unwrap();
        let wanted = vec![
            FeatureName::create("Feature3").unwrap(),
            FeatureName::create("Feature17").unwrap(),
        ];

        let writer = {
            let repo = repo.clone();
            tokio::spawn(async move {
                for _ in 0..50 {
                    repo.save(&existing).await.unwrap();
                }
            })
        };

        while !writer.is_finished() {
            assert_eq!(repo.count().await.unwrap(), 20);
            let lookup = repo.find_by_names(&wanted).await.unwrap();
            assert_eq!(lookup.found.len(), 2);
            assert!(lookup.not_found.is_empty());
        }
        writer.await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 20);
    }
}
