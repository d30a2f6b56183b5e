//! Domain layer: identities, validation and entities
//!
//! Nothing in here touches the filesystem.

pub mod entity;
pub mod identity;
pub mod merge;
pub mod validation;

pub use entity::{FeatureEntity, Record, TermEntity};
pub use identity::{FeatureName, NameError, TermName};
pub use validation::{validate_feature, validate_term, ValidationResult};
