//! Structural validation of proposed schema definitions.
//!
//! Every function here is side-effect free and never reads the registry
//! directly: callers pass the set of uids that are resolvable at commit time
//! (committed entities plus anything created in the same batch), so
//! cross-references inside a batched request validate exactly like committed
//! ones. All findings are collected and returned together rather than
//! failing on the first one.

use std::collections::HashSet;

use super::types::{
    AttributeKind, Attributes, CategoryBody, ComponentInput, ComponentRequest, ContentTypeInput,
    ContentTypeKind, ContentTypeRequest, SchemaError, SchemaResult, ValidationIssue,
};
use super::uid;

/// Validate the `kind` query filter of the list endpoint.
pub fn validate_kind_filter(raw: &str) -> SchemaResult<ContentTypeKind> {
    match raw {
        "collectionType" => Ok(ContentTypeKind::CollectionType),
        "singleType" => Ok(ContentTypeKind::SingleType),
        other => Err(SchemaError::validation(
            "kind",
            format!("'{other}' is not a kind; expected 'collectionType' or 'singleType'"),
        )),
    }
}

/// Validate a content-type request (create or update), including its
/// component side-payload.
pub fn validate_content_type_request(
    request: &ContentTypeRequest,
    known_uids: &HashSet<String>,
) -> SchemaResult<()> {
    let mut issues = Vec::new();
    collect_content_type_issues(&request.content_type, known_uids, "contentType", &mut issues);
    collect_side_payload_issues(&request.components, known_uids, &mut issues);
    finish(issues)
}

/// Validate a component request (create or update), including its
/// side-payload.
pub fn validate_component_request(
    request: &ComponentRequest,
    known_uids: &HashSet<String>,
) -> SchemaResult<()> {
    let mut issues = Vec::new();
    collect_component_issues(&request.component, known_uids, "component", &mut issues);
    collect_side_payload_issues(&request.components, known_uids, &mut issues);
    finish(issues)
}

/// Validate a category rename body.
pub fn validate_category_body(body: &CategoryBody) -> SchemaResult<()> {
    let mut issues = Vec::new();
    if uid::slugify(&body.name).is_empty() {
        issues.push(ValidationIssue::new(
            "name",
            "category name must contain at least one alphanumeric character",
        ));
    }
    finish(issues)
}

fn collect_side_payload_issues(
    components: &[ComponentInput],
    known_uids: &HashSet<String>,
    issues: &mut Vec<ValidationIssue>,
) {
    for (index, component) in components.iter().enumerate() {
        let prefix = format!("components[{index}]");
        collect_component_issues(component, known_uids, &prefix, issues);
    }
}

fn collect_content_type_issues(
    input: &ContentTypeInput,
    known_uids: &HashSet<String>,
    prefix: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    collect_entity_name_issues(&input.display_name, prefix, issues);
    collect_attribute_issues(&input.attributes, known_uids, prefix, issues);
}

fn collect_component_issues(
    input: &ComponentInput,
    known_uids: &HashSet<String>,
    prefix: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    collect_entity_name_issues(&input.display_name, prefix, issues);
    if uid::slugify(&input.category).is_empty() {
        issues.push(ValidationIssue::new(
            format!("{prefix}.category"),
            "category must contain at least one alphanumeric character",
        ));
    }
    collect_attribute_issues(&input.attributes, known_uids, prefix, issues);
}

fn collect_entity_name_issues(
    display_name: &str,
    prefix: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let slug = uid::slugify(display_name);
    if slug.is_empty() {
        issues.push(ValidationIssue::new(
            format!("{prefix}.displayName"),
            "name must contain at least one alphanumeric character",
        ));
    } else if uid::is_reserved_entity_name(&slug) {
        issues.push(ValidationIssue::new(
            format!("{prefix}.displayName"),
            format!("'{slug}' is a reserved name"),
        ));
    }
}

fn collect_attribute_issues(
    attributes: &Attributes,
    known_uids: &HashSet<String>,
    prefix: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    for (name, attribute) in attributes {
        let path = format!("{prefix}.attributes.{name}");

        if !uid::is_valid_identifier(name) {
            issues.push(ValidationIssue::new(
                &path,
                format!("'{name}' is not a valid attribute name"),
            ));
        } else if uid::is_reserved_attribute_name(name) {
            issues.push(ValidationIssue::new(
                &path,
                format!("'{name}' is a reserved attribute name"),
            ));
        }

        match &attribute.kind {
            AttributeKind::Enumeration { values } => {
                if values.is_empty() {
                    issues.push(ValidationIssue::new(
                        &path,
                        "enumeration must declare at least one value",
                    ));
                }
                let mut seen = HashSet::new();
                for value in values {
                    if value.is_empty() {
                        issues.push(ValidationIssue::new(
                            &path,
                            "enumeration values cannot be empty",
                        ));
                    } else if !seen.insert(value.as_str()) {
                        issues.push(ValidationIssue::new(
                            &path,
                            format!("duplicate enumeration value '{value}'"),
                        ));
                    }
                }
            }
            AttributeKind::Relation { target, .. } => {
                if !known_uids.contains(target) {
                    issues.push(ValidationIssue::new(
                        &path,
                        format!("relation target '{target}' does not resolve to a known entity"),
                    ));
                }
            }
            AttributeKind::Component { component, .. } => {
                if !known_uids.contains(component) {
                    issues.push(ValidationIssue::new(
                        &path,
                        format!("component '{component}' does not resolve to a known component"),
                    ));
                }
            }
            AttributeKind::Dynamiczone { components } => {
                if components.is_empty() {
                    issues.push(ValidationIssue::new(
                        &path,
                        "dynamic zone must declare at least one component",
                    ));
                }
                for component in components {
                    if !known_uids.contains(component) {
                        issues.push(ValidationIssue::new(
                            &path,
                            format!(
                                "component '{component}' does not resolve to a known component"
                            ),
                        ));
                    }
                }
            }
            _ => {}
        }
    }
}

fn finish(issues: Vec<ValidationIssue>) -> SchemaResult<()> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::Validation(issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{Attribute, RelationKind, SchemaOptions};
    use indexmap::IndexMap;

    fn article_input(attributes: Attributes) -> ContentTypeRequest {
        ContentTypeRequest {
            content_type: ContentTypeInput {
                display_name: "Article".to_string(),
                description: String::new(),
                kind: ContentTypeKind::CollectionType,
                options: SchemaOptions::default(),
                attributes,
            },
            components: Vec::new(),
        }
    }

    #[test]
    fn accepts_plain_content_type() {
        let mut attributes = IndexMap::new();
        attributes.insert("title".to_string(), Attribute::new(AttributeKind::String));
        let request = article_input(attributes);

        assert!(validate_content_type_request(&request, &HashSet::new()).is_ok());
    }

    #[test]
    fn collects_every_issue_not_just_the_first() {
        let mut attributes = IndexMap::new();
        attributes.insert("id".to_string(), Attribute::new(AttributeKind::String));
        attributes.insert(
            "author".to_string(),
            Attribute::new(AttributeKind::Relation {
                target: "api::author.author".to_string(),
                relation: RelationKind::ManyToOne,
            }),
        );
        let mut request = article_input(attributes);
        request.content_type.display_name = "??".to_string();

        let err = validate_content_type_request(&request, &HashSet::new()).unwrap_err();
        match err {
            SchemaError::Validation(issues) => {
                assert_eq!(issues.len(), 3);
                assert!(issues.iter().any(|i| i.path == "contentType.displayName"));
                assert!(issues.iter().any(|i| i.path.ends_with("attributes.id")));
                assert!(issues.iter().any(|i| i.path.ends_with("attributes.author")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn resolves_references_against_batch_uids() {
        let mut attributes = IndexMap::new();
        attributes.insert(
            "hero".to_string(),
            Attribute::new(AttributeKind::Component {
                component: "layout.hero".to_string(),
                repeatable: false,
            }),
        );
        let request = article_input(attributes);

        // Not committed anywhere, but present in the same batch.
        let mut known = HashSet::new();
        known.insert("layout.hero".to_string());

        assert!(validate_content_type_request(&request, &known).is_ok());
    }

    #[test]
    fn rejects_unknown_kind_filter() {
        assert!(validate_kind_filter("collectionType").is_ok());
        assert!(validate_kind_filter("bogus").is_err());
    }

    #[test]
    fn rejects_empty_enumeration_and_dynamic_zone() {
        let mut attributes = IndexMap::new();
        attributes.insert(
            "badge".to_string(),
            Attribute::new(AttributeKind::Enumeration { values: Vec::new() }),
        );
        attributes.insert(
            "body".to_string(),
            Attribute::new(AttributeKind::Dynamiczone {
                components: Vec::new(),
            }),
        );
        let request = article_input(attributes);

        let err = validate_content_type_request(&request, &HashSet::new()).unwrap_err();
        match err {
            SchemaError::Validation(issues) => assert_eq!(issues.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
