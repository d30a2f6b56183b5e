//! Use-case layer: one operation object per query or mutation
//!
//! Each use-case offers a cheap synchronous `validate_input` and an async
//! `execute` that talks to the repositories. Both transports call these
//! and nothing below them.

mod catalog;
mod delete;
mod details;
mod upsert;

pub use catalog::Catalog;
pub use delete::{Delete, DeleteResult};
pub use details::{DetailsRequest, DetailsResult, GetDetails};
pub use upsert::{AddOrUpdate, UpsertResult};

use crate::domain::{FeatureEntity, TermEntity};
use crate::error::Result;

pub type AddOrUpdateFeature = AddOrUpdate<FeatureEntity>;
pub type AddOrUpdateTerm = AddOrUpdate<TermEntity>;
pub type DeleteFeature = Delete<FeatureEntity>;
pub type DeleteTerm = Delete<TermEntity>;

/// Checks run before a record is removed
///
/// Both hooks pass by default.
pub trait DeleteGuard: Send + Sync {
    fn check_permission(&self, _kind: &str, _name: &str) -> Result<()> {
        Ok(())
    }

    fn check_dependencies(&self, _kind: &str, _name: &str) -> Result<()> {
        Ok(())
    }
}

/// Guard that allows every delete
#[derive(Debug, Clone, Copy, Default)]
pub struct Unrestricted;

impl DeleteGuard for Unrestricted {}

/// Capitalised record kind for user-facing messages
pub(crate) fn title(kind: &str) -> String {
    let mut chars = kind.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
