//! Mutation services for the two schema entity kinds.
//!
//! Every public operation follows the same four-phase protocol: suppress the
//! reload watcher, validate, apply the commit batch, then schedule the
//! deferred reload. On any failure the coordinator is released without
//! scheduling a reload, so suppression never outlives a failed mutation.

pub mod components;
pub mod content_types;

pub use components::ComponentService;
pub use content_types::ContentTypeService;

use std::collections::HashSet;
use std::sync::Arc;

use crate::schema::registry::{CommitOp, SchemaRegistry};
use crate::schema::types::{
    Component, ComponentInfo, ComponentInput, ContentType, ContentTypeInfo, ContentTypeInput,
    SchemaEntity, SchemaResult,
};
use crate::schema::uid;

/// The uids resolvable at commit time: everything committed plus everything
/// created by the same batch.
pub(crate) fn known_uids(
    registry: &Arc<SchemaRegistry>,
    side_payload: &[ComponentInput],
    main_uid: &str,
) -> SchemaResult<HashSet<String>> {
    let mut known = registry.uids()?;
    known.insert(main_uid.to_string());
    for component in side_payload {
        known.insert(uid::component_uid(
            &component.category,
            &component.display_name,
        ));
    }
    Ok(known)
}

pub(crate) fn build_content_type(uid: String, input: &ContentTypeInput) -> ContentType {
    ContentType {
        uid,
        kind: input.kind,
        info: ContentTypeInfo {
            display_name: input.display_name.clone(),
            description: input.description.clone(),
        },
        options: input.options.clone(),
        attributes: input.attributes.clone(),
    }
}

pub(crate) fn build_component(input: &ComponentInput) -> Component {
    Component {
        uid: uid::component_uid(&input.category, &input.display_name),
        category: uid::slugify(&input.category),
        info: ComponentInfo {
            display_name: input.display_name.clone(),
            icon: input.icon.clone(),
        },
        options: input.options.clone(),
        attributes: input.attributes.clone(),
    }
}

/// Commit operations for a `components` side-payload: insert components that
/// do not exist yet, update the ones that do.
pub(crate) fn side_payload_ops(
    registry: &Arc<SchemaRegistry>,
    side_payload: &[ComponentInput],
) -> SchemaResult<Vec<CommitOp>> {
    let mut ops = Vec::with_capacity(side_payload.len());
    for input in side_payload {
        let component = build_component(input);
        let op = if registry.contains(&component.uid)? {
            CommitOp::Update(SchemaEntity::Component(component))
        } else {
            CommitOp::Insert(SchemaEntity::Component(component))
        };
        ops.push(op);
    }
    Ok(ops)
}
