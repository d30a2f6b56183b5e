//! Design KB - feature and ubiquitous-language knowledge base
//!
//! Stores feature definitions and domain terms in a single JSON document
//! and serves them to AI agents over MCP and to everything else over REST.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod mcp;
pub mod storage;
pub mod types;
pub mod usecases;

pub use app::AppContext;
pub use config::{HttpConfig, ServerConfig, TransportMode};
pub use domain::{FeatureEntity, FeatureName, Record, TermEntity, TermName};
pub use error::{DesignError, Result};
pub use storage::{DocumentStore, JsonRepository, Repository, TermQueries};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
