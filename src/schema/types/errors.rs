use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One field-level validation finding. Validation never stops at the first
/// problem; the full list is returned to the caller in one round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path to the offending field, e.g. `contentType.attributes.title`.
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors produced by the schema mutation layer.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The proposed definition violates structural or naming rules.
    #[error("validation failed with {} issue(s)", .0.len())]
    Validation(Vec<ValidationIssue>),

    /// A referenced uid or category does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The derived uid collides with an existing entity of either kind.
    #[error("uid '{0}' already exists")]
    DuplicateUid(String),

    /// A registry-level invariant failed at commit time.
    #[error("registry conflict: {0}")]
    Conflict(String),

    /// Deleting the entity would leave dangling relations behind.
    #[error("'{uid}' is referenced by {referenced_by:?} and cannot be removed")]
    ReferencedEntity {
        uid: String,
        referenced_by: Vec<String>,
    },

    /// An update tried to change an identity-forming field.
    #[error("immutable field: {0}")]
    ImmutableField(String),

    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl SchemaError {
    /// Single-issue validation error, for callers with only one finding.
    pub fn validation(path: impl Into<String>, message: impl Into<String>) -> Self {
        SchemaError::Validation(vec![ValidationIssue::new(path, message)])
    }
}

pub type SchemaResult<T> = Result<T, SchemaError>;
