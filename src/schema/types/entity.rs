use serde::{Deserialize, Serialize};

use super::attribute::Attributes;

/// Whether a content type stores many records or a single one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ContentTypeKind {
    #[default]
    CollectionType,
    SingleType,
}

/// Entity-level flags shared by content types and components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SchemaOptions {
    #[serde(default)]
    pub draft_and_publish: bool,
}

/// Human-facing metadata for a content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeInfo {
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

/// Human-facing metadata for a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInfo {
    pub display_name: String,
    #[serde(default)]
    pub icon: String,
}

/// A top-level structured record definition.
///
/// The `uid` (`api::{slug}.{slug}`) and `kind` are fixed at creation time;
/// updates may only touch info, options, and attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentType {
    pub uid: String,
    pub kind: ContentTypeKind,
    pub info: ContentTypeInfo,
    #[serde(default)]
    pub options: SchemaOptions,
    #[serde(default)]
    pub attributes: Attributes,
}

/// A reusable structured fragment, grouped under a category.
///
/// The `uid` (`{category}.{name}`) encodes both identity fields; renaming a
/// category goes through the dedicated category operations, which retire the
/// old uids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub uid: String,
    pub category: String,
    pub info: ComponentInfo,
    #[serde(default)]
    pub options: SchemaOptions,
    #[serde(default)]
    pub attributes: Attributes,
}

/// A committed schema entity of either kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "modelType", rename_all = "camelCase")]
pub enum SchemaEntity {
    ContentType(ContentType),
    Component(Component),
}

impl SchemaEntity {
    pub fn uid(&self) -> &str {
        match self {
            SchemaEntity::ContentType(ct) => &ct.uid,
            SchemaEntity::Component(c) => &c.uid,
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            SchemaEntity::ContentType(ct) => &ct.attributes,
            SchemaEntity::Component(c) => &c.attributes,
        }
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        match self {
            SchemaEntity::ContentType(ct) => &mut ct.attributes,
            SchemaEntity::Component(c) => &mut c.attributes,
        }
    }

    pub fn as_content_type(&self) -> Option<&ContentType> {
        match self {
            SchemaEntity::ContentType(ct) => Some(ct),
            SchemaEntity::Component(_) => None,
        }
    }

    pub fn as_component(&self) -> Option<&Component> {
        match self {
            SchemaEntity::Component(c) => Some(c),
            SchemaEntity::ContentType(_) => None,
        }
    }

    pub fn into_content_type(self) -> Option<ContentType> {
        match self {
            SchemaEntity::ContentType(ct) => Some(ct),
            SchemaEntity::Component(_) => None,
        }
    }

    pub fn into_component(self) -> Option<Component> {
        match self {
            SchemaEntity::Component(c) => Some(c),
            SchemaEntity::ContentType(_) => None,
        }
    }
}
