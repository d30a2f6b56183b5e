//! Delete a feature or term by name

use serde::Serialize;
use std::sync::Arc;

use super::{title, DeleteGuard};
use crate::domain::Record;
use crate::error::Result;
use crate::storage::Repository;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    pub name: String,
    pub found: bool,
    pub message: String,
}

pub struct Delete<R: Record> {
    repo: Arc<dyn Repository<R>>,
    guard: Arc<dyn DeleteGuard>,
}

impl<R: Record> Clone for Delete<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            guard: self.guard.clone(),
        }
    }
}

impl<R: Record> Delete<R> {
    pub fn new(repo: Arc<dyn Repository<R>>, guard: Arc<dyn DeleteGuard>) -> Self {
        Self { repo, guard }
    }

    pub fn validate_input(&self, raw_name: &str) -> Result<()> {
        R::parse_name(raw_name).map(|_| ())
    }

    /// Remove the record; a missing record is reported, not raised
    pub async fn execute(&self, raw_name: &str) -> Result<DeleteResult> {
        let name = R::parse_name(raw_name)?;

        self.guard.check_permission(R::KIND, name.as_ref())?;
        self.guard.check_dependencies(R::KIND, name.as_ref())?;

        let outcome = self.repo.delete(&name).await?;
        let message = if outcome.found {
            format!("{} '{}' deleted successfully", title(R::KIND), name)
        } else {
            format!("{} '{}' not found", title(R::KIND), name)
        };

        Ok(DeleteResult {
            name: name.to_string(),
            found: outcome.found,
            message,
        })
    }
}
