//! Component mutation service, including the category group operations.
//!
//! Components are grouped by category, and the category is part of their
//! identity: `{category}.{name}`. Renaming a category therefore retires
//! every member's uid and mints new ones, rewriting every attribute in the
//! registry that pointed at an old uid, all in one commit batch.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::info;

use crate::reload::ReloadCoordinator;
use crate::schema::registry::{CommitOp, SchemaRegistry};
use crate::schema::types::{
    rewrite_attribute_targets, CategoryBody, Component, ComponentRequest, SchemaEntity,
    SchemaError, SchemaResult,
};
use crate::schema::{uid, validator};

use super::{build_component, known_uids, side_payload_ops};

pub struct ComponentService {
    registry: Arc<SchemaRegistry>,
    coordinator: Arc<ReloadCoordinator>,
}

impl ComponentService {
    pub fn new(registry: Arc<SchemaRegistry>, coordinator: Arc<ReloadCoordinator>) -> Self {
        Self {
            registry,
            coordinator,
        }
    }

    /// Create a component (plus its side-payload) and schedule a reload.
    pub fn create(&self, request: ComponentRequest) -> SchemaResult<Component> {
        self.coordinator.begin_mutation();
        match self.apply_create(request) {
            Ok(component) => {
                info!("created component '{}'", component.uid);
                self.coordinator.end_mutation();
                Ok(component)
            }
            Err(e) => {
                self.coordinator.abort_mutation();
                Err(e)
            }
        }
    }

    /// Update a component in place. Name and category are fixed; a category
    /// rename goes through [`ComponentService::edit_category`].
    pub fn edit(&self, uid: &str, request: ComponentRequest) -> SchemaResult<Component> {
        self.coordinator.begin_mutation();
        match self.apply_edit(uid, request) {
            Ok(component) => {
                info!("updated component '{}'", component.uid);
                self.coordinator.end_mutation();
                Ok(component)
            }
            Err(e) => {
                self.coordinator.abort_mutation();
                Err(e)
            }
        }
    }

    /// Delete a component, returning its prior definition.
    pub fn delete(&self, uid: &str) -> SchemaResult<Component> {
        self.coordinator.begin_mutation();
        match self.apply_delete(uid) {
            Ok(component) => {
                info!("deleted component '{}'", component.uid);
                self.coordinator.end_mutation();
                Ok(component)
            }
            Err(e) => {
                self.coordinator.abort_mutation();
                Err(e)
            }
        }
    }

    /// Rename a whole category: every member component gets a new uid under
    /// the new category name, the old uids are retired, and every attribute
    /// anywhere in the registry that pointed at an old uid is rewritten, as
    /// one batch. Returns the new category name.
    pub fn edit_category(&self, name: &str, body: &CategoryBody) -> SchemaResult<String> {
        self.coordinator.begin_mutation();
        match self.apply_edit_category(name, body) {
            Ok(new_name) => {
                info!("renamed component category '{}' to '{}'", name, new_name);
                self.coordinator.end_mutation();
                Ok(new_name)
            }
            Err(e) => {
                self.coordinator.abort_mutation();
                Err(e)
            }
        }
    }

    /// Delete every component in a category as one batch.
    pub fn delete_category(&self, name: &str) -> SchemaResult<()> {
        self.coordinator.begin_mutation();
        match self.apply_delete_category(name) {
            Ok(()) => {
                info!("deleted component category '{}'", name);
                self.coordinator.end_mutation();
                Ok(())
            }
            Err(e) => {
                self.coordinator.abort_mutation();
                Err(e)
            }
        }
    }

    fn apply_create(&self, request: ComponentRequest) -> SchemaResult<Component> {
        let new_uid = uid::component_uid(
            &request.component.category,
            &request.component.display_name,
        );
        let known = known_uids(&self.registry, &request.components, &new_uid)?;
        validator::validate_component_request(&request, &known)?;

        if self.registry.contains(&new_uid)? {
            return Err(SchemaError::DuplicateUid(new_uid));
        }

        let component = build_component(&request.component);
        let mut batch = vec![CommitOp::Insert(SchemaEntity::Component(component.clone()))];
        batch.extend(side_payload_ops(&self.registry, &request.components)?);
        self.registry.commit(batch)?;

        Ok(component)
    }

    fn apply_edit(&self, uid: &str, request: ComponentRequest) -> SchemaResult<Component> {
        let existing = self
            .registry
            .get(uid)?
            .and_then(SchemaEntity::into_component)
            .ok_or_else(|| SchemaError::NotFound(format!("component '{uid}'")))?;

        let derived = uid::component_uid(
            &request.component.category,
            &request.component.display_name,
        );
        if derived != existing.uid {
            return Err(SchemaError::ImmutableField(
                "component name and category are fixed; use the category rename operation"
                    .to_string(),
            ));
        }

        let known = known_uids(&self.registry, &request.components, uid)?;
        validator::validate_component_request(&request, &known)?;

        let updated = build_component(&request.component);
        let mut batch = vec![CommitOp::Update(SchemaEntity::Component(updated.clone()))];
        batch.extend(side_payload_ops(&self.registry, &request.components)?);
        self.registry.commit(batch)?;

        Ok(updated)
    }

    fn apply_delete(&self, uid: &str) -> SchemaResult<Component> {
        let existing = self
            .registry
            .get(uid)?
            .and_then(SchemaEntity::into_component)
            .ok_or_else(|| SchemaError::NotFound(format!("component '{uid}'")))?;

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

    fn apply_edit_category(&self, name: &str, body: &CategoryBody) -> SchemaResult<String> {
        validator::validate_category_body(body)?;

        let old = uid::slugify(name);
        let new = uid::slugify(&body.name);
        let members = self.registry.components_in_category(&old)?;
        if members.is_empty() {
            return Err(SchemaError::NotFound(format!("component category '{name}'")));
        }
        if new == old {
            return Ok(new);
        }

        // Old uid -> new uid, keeping each member's name part as-is.
        let mut rename: HashMap<String, String> = HashMap::new();
        for member in &members {
            let name_part = member
                .uid
                .split_once('.')
                .map(|(_, rest)| rest)
                .unwrap_or(member.uid.as_str());
            rename.insert(member.uid.clone(), format!("{new}.{name_part}"));
        }

        let mut batch = Vec::new();
        for entity in self.registry.all()? {
            match entity {
                SchemaEntity::Component(component) if component.category == old => {
                    let new_uid = rename.get(&component.uid).ok_or_else(|| {
                        SchemaError::Internal(format!(
                            "no rename computed for member '{}'",
                            component.uid
                        ))
                    })?;
                    let mut renamed = component.clone();
                    renamed.uid = new_uid.clone();
                    renamed.category = new.clone();
                    rewrite_attribute_targets(&mut renamed.attributes, &rename);
                    batch.push(CommitOp::Delete(component.uid));
                    batch.push(CommitOp::Insert(SchemaEntity::Component(renamed)));
                }
                mut other => {
                    if rewrite_attribute_targets(other.attributes_mut(), &rename) {
                        batch.push(CommitOp::Update(other));
                    }
                }
            }
        }
        self.registry.commit(batch)?;

        Ok(new)
    }

    fn apply_delete_category(&self, name: &str) -> SchemaResult<()> {
        let category = uid::slugify(name);
        let members = self.registry.components_in_category(&category)?;
        if members.is_empty() {
            return Err(SchemaError::NotFound(format!("component category '{name}'")));
        }

        let member_uids: HashSet<&str> = members.iter().map(|m| m.uid.as_str()).collect();
        for member in &members {
            let referenced_by: Vec<String> = self
                .registry
                .referencing(&member.uid)?
                .into_iter()
                .filter(|r| !member_uids.contains(r.as_str()))
                .collect();
            if !referenced_by.is_empty() {
                return Err(SchemaError::ReferencedEntity {
                    uid: member.uid.clone(),
                    referenced_by,
                });
            }
        }

        let batch = members
            .into_iter()
            .map(|m| CommitOp::Delete(m.uid))
            .collect();
        self.registry.commit(batch)?;

        Ok(())
    }
}
