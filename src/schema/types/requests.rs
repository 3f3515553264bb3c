//! Request payload shapes accepted by the mutation services.
//!
//! These are the loosely-shaped bodies of the original admin API rendered as
//! typed structs: a proposed definition plus an optional `components`
//! side-payload of component definitions created or updated atomically with
//! the main entity.

use serde::{Deserialize, Serialize};

use super::attribute::Attributes;
use super::entity::{ContentTypeKind, SchemaOptions};

/// Proposed content-type definition as sent by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeInput {
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: ContentTypeKind,
    #[serde(default)]
    pub options: SchemaOptions,
    #[serde(default)]
    pub attributes: Attributes,
}

/// Proposed component definition, either standalone or inside a side-payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInput {
    pub display_name: String,
    pub category: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub options: SchemaOptions,
    #[serde(default)]
    pub attributes: Attributes,
}

/// Body of content-type create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeRequest {
    pub content_type: ContentTypeInput,
    #[serde(default)]
    pub components: Vec<ComponentInput>,
}

/// Body of component create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRequest {
    pub component: ComponentInput,
    #[serde(default)]
    pub components: Vec<ComponentInput>,
}

/// Body of a category rename request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBody {
    pub name: String,
}
