//! Storage engine for the knowledge base
//!
//! A single JSON document on disk, accessed through per-record-kind
//! repositories.

pub mod document;
pub mod repository;

pub use document::{Document, DocumentStore, Mutation};
pub use repository::{
    DeleteOutcome, JsonRepository, Lookup, Repository, SaveOutcome, TermQueries,
};

use crate::domain::{FeatureEntity, TermEntity};

pub type FeatureRepository = JsonRepository<FeatureEntity>;
pub type TermRepository = JsonRepository<TermEntity>;
