//! Wiring shared by the MCP and REST transports

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{FeatureEntity, TermEntity};
use crate::storage::{DocumentStore, JsonRepository, Repository};
use crate::usecases::{
    AddOrUpdateFeature, AddOrUpdateTerm, Catalog, DeleteFeature, DeleteGuard, DeleteTerm,
    GetDetails, Unrestricted,
};

/// Repositories and use-cases over one document
#[derive(Clone)]
pub struct AppContext {
    store: Arc<DocumentStore>,
    pub features: Arc<dyn Repository<FeatureEntity>>,
    pub terms: Arc<dyn Repository<TermEntity>>,
    pub add_or_update_feature: AddOrUpdateFeature,
    pub delete_feature: DeleteFeature,
    pub add_or_update_term: AddOrUpdateTerm,
    pub delete_term: DeleteTerm,
    pub get_details: GetDetails,
    pub catalog: Catalog,
}

impl AppContext {
    pub fn open(data_path: impl Into<PathBuf>) -> Self {
        Self::with_guard(data_path, Arc::new(Unrestricted))
    }

    pub fn with_guard(data_path: impl Into<PathBuf>, guard: Arc<dyn DeleteGuard>) -> Self {
        let store = Arc::new(DocumentStore::new(data_path));
        let features: Arc<dyn Repository<FeatureEntity>> =
            Arc::new(JsonRepository::<FeatureEntity>::new(store.clone()));
        let terms: Arc<dyn Repository<TermEntity>> =
            Arc::new(JsonRepository::<TermEntity>::new(store.clone()));

        Self {
            add_or_update_feature: AddOrUpdateFeature::new(features.clone()),
            delete_feature: DeleteFeature::new(features.clone(), guard.clone()),
            add_or_update_term: AddOrUpdateTerm::new(terms.clone()),
            delete_term: DeleteTerm::new(terms.clone(), guard),
            get_details: GetDetails::new(features.clone(), terms.clone()),
            catalog: Catalog::new(features.clone(), terms.clone()),
            store,
            features,
            terms,
        }
    }

    pub fn data_path(&self) -> String {
        self.store.path().display().to_string()
    }
}
