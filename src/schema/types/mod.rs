pub mod attribute;
pub mod entity;
pub mod errors;
pub mod requests;

pub use attribute::{
    rewrite_attribute_targets, Attribute, AttributeKind, Attributes, RelationKind,
};
pub use entity::{
    Component, ComponentInfo, ContentType, ContentTypeInfo, ContentTypeKind, SchemaEntity,
    SchemaOptions,
};
pub use errors::{SchemaError, SchemaResult, ValidationIssue};
pub use requests::{
    CategoryBody, ComponentInput, ComponentRequest, ContentTypeInput, ContentTypeRequest,
};
