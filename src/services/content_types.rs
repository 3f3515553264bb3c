//! Content-type mutation service.

use std::sync::Arc;

use log::info;

use crate::reload::ReloadCoordinator;
use crate::schema::registry::{CommitOp, SchemaRegistry};
use crate::schema::types::{
    ContentType, ContentTypeRequest, SchemaEntity, SchemaError, SchemaResult,
};
use crate::schema::{uid, validator};

use super::{build_content_type, known_uids, side_payload_ops};

pub struct ContentTypeService {
    registry: Arc<SchemaRegistry>,
    coordinator: Arc<ReloadCoordinator>,
}

impl ContentTypeService {
    pub fn new(registry: Arc<SchemaRegistry>, coordinator: Arc<ReloadCoordinator>) -> Self {
        Self {
            registry,
            coordinator,
        }
    }

    /// Create a content type (plus its component side-payload) and schedule
    /// a reload. Fails with `DuplicateUid` if the derived uid is taken.
    pub fn create(&self, request: ContentTypeRequest) -> SchemaResult<ContentType> {
        self.coordinator.begin_mutation();
        match self.apply_create(request) {
            Ok(content_type) => {
                info!("created content type '{}'", content_type.uid);
                self.coordinator.end_mutation();
                Ok(content_type)
            }
            Err(e) => {
                self.coordinator.abort_mutation();
                Err(e)
            }
        }
    }

    /// Update a content type in place. The uid and kind are fixed.
    pub fn edit(&self, uid: &str, request: ContentTypeRequest) -> SchemaResult<ContentType> {
        self.coordinator.begin_mutation();
        match self.apply_edit(uid, request) {
            Ok(content_type) => {
                info!("updated content type '{}'", content_type.uid);
                self.coordinator.end_mutation();
                Ok(content_type)
            }
            Err(e) => {
                self.coordinator.abort_mutation();
                Err(e)
            }
        }
    }

    /// Delete a content type, returning its prior definition.
    pub fn delete(&self, uid: &str) -> SchemaResult<ContentType> {
        self.coordinator.begin_mutation();
        match self.apply_delete(uid) {
            Ok(content_type) => {
                info!("deleted content type '{}'", content_type.uid);
                self.coordinator.end_mutation();
                Ok(content_type)
            }
            Err(e) => {
                self.coordinator.abort_mutation();
                Err(e)
            }
        }
    }

    fn apply_create(&self, request: ContentTypeRequest) -> SchemaResult<ContentType> {
        let new_uid = uid::content_type_uid(&request.content_type.display_name);
        let known = known_uids(&self.registry, &request.components, &new_uid)?;
        validator::validate_content_type_request(&request, &known)?;

        if self.registry.contains(&new_uid)? {
            return Err(SchemaError::DuplicateUid(new_uid));
        }

        let content_type = build_content_type(new_uid, &request.content_type);
        let mut batch = vec![CommitOp::Insert(SchemaEntity::ContentType(
            content_type.clone(),
        ))];
        batch.extend(side_payload_ops(&self.registry, &request.components)?);
        self.registry.commit(batch)?;

        Ok(content_type)
    }

    fn apply_edit(&self, uid: &str, request: ContentTypeRequest) -> SchemaResult<ContentType> {
        let existing = self
            .registry
            .get(uid)?
            .and_then(SchemaEntity::into_content_type)
            .ok_or_else(|| SchemaError::NotFound(format!("content type '{uid}'")))?;

        if request.content_type.kind != existing.kind {
            return Err(SchemaError::ImmutableField(
                "content type 'kind' cannot change after creation".to_string(),
            ));
        }

        let known = known_uids(&self.registry, &request.components, uid)?;
        validator::validate_content_type_request(&request, &known)?;

        let mut updated = build_content_type(existing.uid, &request.content_type);
        updated.kind = existing.kind;

        let mut batch = vec![CommitOp::Update(SchemaEntity::ContentType(updated.clone()))];
        batch.extend(side_payload_ops(&self.registry, &request.components)?);
        self.registry.commit(batch)?;

        Ok(updated)
    }

    fn apply_delete(&self, uid: &str) -> SchemaResult<ContentType> {
        let existing = self
            .registry
            .get(uid)?
            .and_then(SchemaEntity::into_content_type)
            .ok_or_else(|| SchemaError::NotFound(format!("content type '{uid}'")))?;

        let referenced_by: Vec<String> = self
            .registry
            .referencing(uid)?
            .into_iter()
            .filter(|r| r != uid)
            .collect();
        if !referenced_by.is_empty() {
            return Err(SchemaError::ReferencedEntity {
                uid: uid.to_string(),
                referenced_by,
            });
        }

        self.registry.commit(vec![CommitOp::Delete(uid.to_string())])?;
        Ok(existing)
    }
}
