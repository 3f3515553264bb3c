use std::time::Duration;

use schemafold::schema::types::{
    Attribute, AttributeKind, ContentTypeRequest, RelationKind, SchemaError,
};
use schemafold::testing::test_node;
use schemafold::{ReloadState, SchemaEntity};
use tempfile::tempdir;

fn request(value: serde_json::Value) -> ContentTypeRequest {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn create_commits_entity_and_schedules_one_reload() {
    let dir = tempdir().unwrap();
    let (node, trigger) = test_node(dir.path()).unwrap();

    let created = node
        .content_types
        .create(request(serde_json::json!({
            "contentType": {
                "displayName": "Article",
                "attributes": { "title": { "type": "string" } }
            }
        })))
        .unwrap();
    assert_eq!(created.uid, "api::article.article");

    let stored = node
        .registry
        .get("api::article.article")
        .unwrap()
        .and_then(SchemaEntity::into_content_type)
        .unwrap();
    assert!(matches!(
        stored.attributes.get("title").map(|a| &a.kind),
        Some(AttributeKind::String)
    ));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(trigger.count(), 1);
    assert_eq!(node.coordinator.state(), ReloadState::Idle);
}

#[tokio::test]
async fn duplicate_uid_fails_and_releases_suppression() {
    let dir = tempdir().unwrap();
    let (node, trigger) = test_node(dir.path()).unwrap();

    let body = serde_json::json!({
        "contentType": { "displayName": "Article" }
    });
    node.content_types.create(request(body.clone())).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let err = node.content_types.create(request(body)).unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateUid(_)));

    // The failed mutation must not leave the watcher suppressed or owe a reload.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(node.coordinator.state(), ReloadState::Idle);
    assert_eq!(trigger.count(), 1);
}

#[tokio::test]
async fn validation_failure_leaves_registry_unchanged() {
    let dir = tempdir().unwrap();
    let (node, trigger) = test_node(dir.path()).unwrap();

    let err = node
        .content_types
        .create(request(serde_json::json!({
            "contentType": {
                "displayName": "Article",
                "attributes": {
                    "hero": { "type": "component", "component": "layout.missing" }
                }
            }
        })))
        .unwrap_err();

    match err {
        SchemaError::Validation(issues) => {
            assert!(issues
                .iter()
                .any(|i| i.message.contains("layout.missing")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    assert!(node.registry.uids().unwrap().is_empty());
    assert_eq!(node.coordinator.state(), ReloadState::Idle);
    assert_eq!(trigger.count(), 0);
}

#[tokio::test]
async fn kind_is_immutable_and_stored_entity_is_untouched() {
    let dir = tempdir().unwrap();
    let (node, _trigger) = test_node(dir.path()).unwrap();

    node.content_types
        .create(request(serde_json::json!({
            "contentType": {
                "displayName": "About",
                "kind": "singleType",
                "attributes": { "body": { "type": "text" } }
            }
        })))
        .unwrap();

    let before = node.registry.get("api::about.about").unwrap().unwrap();

    let err = node
        .content_types
        .edit(
            "api::about.about",
            request(serde_json::json!({
                "contentType": {
                    "displayName": "About",
                    "kind": "collectionType",
                    "attributes": {}
                }
            })),
        )
        .unwrap_err();
    assert!(matches!(err, SchemaError::ImmutableField(_)));

    let after = node.registry.get("api::about.about").unwrap().unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn edit_replaces_attributes_under_the_same_uid() {
    let dir = tempdir().unwrap();
    let (node, _trigger) = test_node(dir.path()).unwrap();

    node.content_types
        .create(request(serde_json::json!({
            "contentType": {
                "displayName": "Article",
                "attributes": { "title": { "type": "string" } }
            }
        })))
        .unwrap();

    let updated = node
        .content_types
        .edit(
            "api::article.article",
            request(serde_json::json!({
                "contentType": {
                    "displayName": "Article",
                    "attributes": {
                        "title": { "type": "string", "required": true },
                        "body": { "type": "richtext" }
                    }
                }
            })),
        )
        .unwrap();

    assert_eq!(updated.uid, "api::article.article");
    let stored = node
        .registry
        .get("api::article.article")
        .unwrap()
        .and_then(SchemaEntity::into_content_type)
        .unwrap();
    assert_eq!(stored.attributes.len(), 2);
    assert!(stored.attributes["title"].required);
}

#[tokio::test]
async fn delete_returns_prior_definition() {
    let dir = tempdir().unwrap();
    let (node, _trigger) = test_node(dir.path()).unwrap();

    node.content_types
        .create(request(serde_json::json!({
            "contentType": {
                "displayName": "Article",
                "attributes": { "title": { "type": "string" } }
            }
        })))
        .unwrap();

    let removed = node.content_types.delete("api::article.article").unwrap();
    assert_eq!(removed.uid, "api::article.article");
    assert!(removed.attributes.contains_key("title"));

    assert!(node.registry.get("api::article.article").unwrap().is_none());
}

#[tokio::test]
async fn delete_of_referenced_content_type_fails() {
    let dir = tempdir().unwrap();
    let (node, _trigger) = test_node(dir.path()).unwrap();

    node.content_types
        .create(request(serde_json::json!({
            "contentType": { "displayName": "Author" }
        })))
        .unwrap();

    let mut article = request(serde_json::json!({
        "contentType": { "displayName": "Article" }
    }));
    article.content_type.attributes.insert(
        "author".to_string(),
        Attribute::new(AttributeKind::Relation {
            target: "api::author.author".to_string(),
            relation: RelationKind::ManyToOne,
        }),
    );
    node.content_types.create(article).unwrap();

    let err = node.content_types.delete("api::author.author").unwrap_err();
    match err {
        SchemaError::ReferencedEntity { referenced_by, .. } => {
            assert_eq!(referenced_by, vec!["api::article.article".to_string()]);
        }
        other => panic!("expected referenced-entity error, got {other:?}"),
    }

    // Both sides still present and intact.
    assert!(node.registry.contains("api::author.author").unwrap());
    assert!(node.registry.contains("api::article.article").unwrap());
}

#[tokio::test]
async fn nested_component_batch_commits_as_one_unit() {
    let dir = tempdir().unwrap();
    let (node, _trigger) = test_node(dir.path()).unwrap();

    node.content_types
        .create(request(serde_json::json!({
            "contentType": {
                "displayName": "Page",
                "attributes": {
                    "hero": { "type": "component", "component": "layout.hero" }
                }
            },
            "components": [
                {
                    "displayName": "Hero",
                    "category": "layout",
                    "attributes": { "headline": { "type": "string" } }
                }
            ]
        })))
        .unwrap();

    assert!(node.registry.contains("api::page.page").unwrap());
    assert!(node.registry.contains("layout.hero").unwrap());
    assert_eq!(
        node.registry.referencing("layout.hero").unwrap(),
        vec!["api::page.page".to_string()]
    );
}

#[tokio::test]
async fn definitions_survive_node_restart() {
    let dir = tempdir().unwrap();

    {
        let (node, _trigger) = test_node(dir.path()).unwrap();
        node.content_types
            .create(request(serde_json::json!({
                "contentType": {
                    "displayName": "Article",
                    "attributes": { "title": { "type": "string" } }
                }
            })))
            .unwrap();
    }

    let (node, _trigger) = test_node(dir.path()).unwrap();
    let stored = node
        .registry
        .get("api::article.article")
        .unwrap()
        .and_then(SchemaEntity::into_content_type)
        .unwrap();
    assert!(stored.attributes.contains_key("title"));
}
