pub mod registry;
pub mod types;
pub mod uid;
pub mod validator;

pub use registry::{CommitOp, SchemaRegistry};

// Re-export the core types at the schema module level
pub use types::{
    Attribute, AttributeKind, Attributes, CategoryBody, Component, ComponentInfo, ComponentInput,
    ComponentRequest, ContentType, ContentTypeInfo, ContentTypeInput, ContentTypeKind,
    ContentTypeRequest, RelationKind, SchemaEntity, SchemaError, SchemaOptions, SchemaResult,
    ValidationIssue,
};
