//! Error types for the design knowledge base

use thiserror::Error;

/// Result type alias for knowledge-base operations
pub type Result<T> = std::result::Result<T, DesignError>;

/// Main error type for the knowledge base
#[derive(Error, Debug)]
pub enum DesignError {
    /// One or more structural or business-rule violations, accumulated
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A stored record failed entity validation while being loaded
    #[error("Stored {kind} '{name}' is corrupt: {message}")]
    CorruptRecord {
        kind: &'static str,
        name: String,
        message: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DesignError {
    /// Build a validation error from a single message
    pub fn validation(message: impl Into<String>) -> Self {
        DesignError::Validation(vec![message.into()])
    }

    /// Whether the caller can fix this by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DesignError::Validation(_)
                | DesignError::InvalidInput(_)
                | DesignError::NotFound(_)
                | DesignError::UnknownTool(_)
                | DesignError::UnknownResource(_)
        )
    }

    /// Short machine-readable tag used in response envelopes
    pub fn kind(&self) -> &'static str {
        match self {
            DesignError::Validation(_) | DesignError::InvalidInput(_) => "validation_error",
            DesignError::NotFound(_) => "not_found",
            DesignError::CorruptRecord { .. }
            | DesignError::Storage(_)
            | DesignError::Serialization(_)
            | DesignError::Io(_) => "storage_error",
            DesignError::UnknownTool(_) | DesignError::UnknownResource(_) => "protocol_error",
            DesignError::Config(_) => "config_error",
            DesignError::Internal(_) => "internal_error",
        }
    }

    /// Get error code for MCP protocol
    pub fn code(&self) -> i64 {
        match self {
            DesignError::NotFound(_) => -32001,
            DesignError::UnknownResource(_) => -32002,
            DesignError::Validation(_) | DesignError::InvalidInput(_) => -32602,
            DesignError::UnknownTool(_) => -32601,
            _ => -32000,
        }
    }
}
