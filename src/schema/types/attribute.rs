use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cardinality of a relation attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

/// The recognized attribute types and their type-specific constraints.
///
/// Serialized with an inline `type` tag so attribute payloads read as
/// `{"type": "relation", "target": "api::article.article", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AttributeKind {
    String,
    Text,
    Richtext,
    Number,
    Boolean,
    Date,
    Email,
    Password,
    Json,
    Uid,
    Media,
    Enumeration {
        #[serde(rename = "enum")]
        values: Vec<String>,
    },
    Relation {
        target: String,
        relation: RelationKind,
    },
    Component {
        component: String,
        #[serde(default)]
        repeatable: bool,
    },
    Dynamiczone {
        components: Vec<String>,
    },
}

/// A single attribute definition: the type tag plus the flags shared by
/// every attribute kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(flatten)]
    pub kind: AttributeKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub private: bool,
}

impl Attribute {
    pub fn new(kind: AttributeKind) -> Self {
        Self {
            kind,
            required: false,
            unique: false,
            private: false,
        }
    }

    /// The uids this attribute points at, if any.
    pub fn targets(&self) -> Vec<&str> {
        match &self.kind {
            AttributeKind::Relation { target, .. } => vec![target.as_str()],
            AttributeKind::Component { component, .. } => vec![component.as_str()],
            AttributeKind::Dynamiczone { components } => {
                components.iter().map(String::as_str).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Rewrite any target uid found in `rename` to its new value.
    /// Returns true if the attribute was changed.
    pub fn rewrite_targets(&mut self, rename: &HashMap<String, String>) -> bool {
        match &mut self.kind {
            AttributeKind::Relation { target, .. } => {
                if let Some(new) = rename.get(target) {
                    *target = new.clone();
                    return true;
                }
                false
            }
            AttributeKind::Component { component, .. } => {
                if let Some(new) = rename.get(component) {
                    *component = new.clone();
                    return true;
                }
                false
            }
            AttributeKind::Dynamiczone { components } => {
                let mut changed = false;
                for entry in components.iter_mut() {
                    if let Some(new) = rename.get(entry) {
                        *entry = new.clone();
                        changed = true;
                    }
                }
                changed
            }
            _ => false,
        }
    }
}

/// Ordered attribute map as it appears on every schema entity.
pub type Attributes = IndexMap<String, Attribute>;

/// Rewrite every attribute target found in `rename` across an attribute map.
/// Returns true if any attribute was changed.
pub fn rewrite_attribute_targets(
    attributes: &mut Attributes,
    rename: &HashMap<String, String>,
) -> bool {
    let mut changed = false;
    for attribute in attributes.values_mut() {
        if attribute.rewrite_targets(rename) {
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_type_tag_round_trip() {
        let attribute = Attribute::new(AttributeKind::Relation {
            target: "api::article.article".to_string(),
            relation: RelationKind::OneToMany,
        });

        let json = serde_json::to_value(&attribute).unwrap();
        assert_eq!(json["type"], "relation");
        assert_eq!(json["target"], "api::article.article");
        assert_eq!(json["relation"], "oneToMany");

        let back: Attribute = serde_json::from_value(json).unwrap();
        assert_eq!(back, attribute);
    }

    #[test]
    fn scalar_attribute_has_no_targets() {
        let attribute = Attribute::new(AttributeKind::String);
        assert!(attribute.targets().is_empty());
    }

    #[test]
    fn rewrite_targets_updates_dynamiczone_entries() {
        let mut attribute = Attribute::new(AttributeKind::Dynamiczone {
            components: vec!["layout.hero".to_string(), "layout.footer".to_string()],
        });

        let mut rename = HashMap::new();
        rename.insert("layout.hero".to_string(), "banners.hero".to_string());

        assert!(attribute.rewrite_targets(&rename));
        assert_eq!(
            attribute.targets(),
            vec!["banners.hero", "layout.footer"]
        );
    }
}
