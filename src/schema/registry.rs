//! The authoritative in-process schema registry.
//!
//! `SchemaRegistry` owns every committed entity plus a reverse-relation
//! index derived from it. All writes funnel through [`SchemaRegistry::commit`],
//! which applies a batch all-or-nothing: the batch is replayed onto a working
//! copy, registry invariants are re-checked standalone (the registry does not
//! trust upstream validation), the batch is persisted through one sled batch,
//! and only then is the in-memory snapshot swapped. Readers always observe
//! the last complete snapshot; a partially-applied batch is never visible.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};

use log::{info, warn};

use crate::db_operations::SchemaStore;

use super::types::{Component, ContentType, ContentTypeKind, SchemaEntity, SchemaError, SchemaResult};

/// One operation of a commit batch, keyed by uid.
#[derive(Debug, Clone)]
pub enum CommitOp {
    Insert(SchemaEntity),
    Update(SchemaEntity),
    Delete(String),
}

#[derive(Default, Clone)]
struct RegistrySnapshot {
    entities: HashMap<String, SchemaEntity>,
    /// target uid -> uids of entities holding an attribute pointing at it.
    referenced_by: HashMap<String, BTreeSet<String>>,
}

pub struct SchemaRegistry {
    snapshot: RwLock<Arc<RegistrySnapshot>>,
    /// Serializes commits; readers are never blocked by an in-flight commit.
    writer: Mutex<()>,
    store: SchemaStore,
}

impl SchemaRegistry {
    /// Build a registry over `store`, restoring all persisted entities.
    pub fn new(store: SchemaStore) -> SchemaResult<Self> {
        let mut entities = HashMap::new();
        for entity in store.load_all()? {
            entities.insert(entity.uid().to_string(), entity);
        }

        if let Err(e) = check_references(&entities) {
            warn!("persisted registry state has dangling references: {e}");
        }
        let referenced_by = build_reference_index(&entities);

        info!("schema registry loaded with {} entities", entities.len());
        Ok(Self {
            snapshot: RwLock::new(Arc::new(RegistrySnapshot {
                entities,
                referenced_by,
            })),
            writer: Mutex::new(()),
            store,
        })
    }

    /// Retrieve a committed entity by uid.
    pub fn get(&self, uid: &str) -> SchemaResult<Option<SchemaEntity>> {
        Ok(self.read_snapshot()?.entities.get(uid).cloned())
    }

    pub fn contains(&self, uid: &str) -> SchemaResult<bool> {
        Ok(self.read_snapshot()?.entities.contains_key(uid))
    }

    /// Every committed uid, across both entity kinds.
    pub fn uids(&self) -> SchemaResult<HashSet<String>> {
        Ok(self.read_snapshot()?.entities.keys().cloned().collect())
    }

    /// All committed entities, sorted by uid.
    pub fn all(&self) -> SchemaResult<Vec<SchemaEntity>> {
        let snapshot = self.read_snapshot()?;
        let mut entities: Vec<SchemaEntity> = snapshot.entities.values().cloned().collect();
        entities.sort_by(|a, b| a.uid().cmp(b.uid()));
        Ok(entities)
    }

    /// Committed content types, optionally filtered by kind, sorted by uid.
    pub fn list_content_types(
        &self,
        kind: Option<ContentTypeKind>,
    ) -> SchemaResult<Vec<ContentType>> {
        let snapshot = self.read_snapshot()?;
        let mut content_types: Vec<ContentType> = snapshot
            .entities
            .values()
            .filter_map(SchemaEntity::as_content_type)
            .filter(|ct| kind.map_or(true, |k| ct.kind == k))
            .cloned()
            .collect();
        content_types.sort_by(|a, b| a.uid.cmp(&b.uid));
        Ok(content_types)
    }

    /// Committed components, sorted by uid.
    pub fn list_components(&self) -> SchemaResult<Vec<Component>> {
        let snapshot = self.read_snapshot()?;
        let mut components: Vec<Component> = snapshot
            .entities
            .values()
            .filter_map(SchemaEntity::as_component)
            .cloned()
            .collect();
        components.sort_by(|a, b| a.uid.cmp(&b.uid));
        Ok(components)
    }

    /// Committed components belonging to `category`, sorted by uid.
    pub fn components_in_category(&self, category: &str) -> SchemaResult<Vec<Component>> {
        Ok(self
            .list_components()?
            .into_iter()
            .filter(|c| c.category == category)
            .collect())
    }

    pub fn content_type_count(&self) -> SchemaResult<usize> {
        Ok(self
            .read_snapshot()?
            .entities
            .values()
            .filter(|e| e.as_content_type().is_some())
            .count())
    }

    /// Uids of entities holding an attribute that points at `uid`.
    pub fn referencing(&self, uid: &str) -> SchemaResult<Vec<String>> {
        let snapshot = self.read_snapshot()?;
        Ok(snapshot
            .referenced_by
            .get(uid)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    /// Apply a batch of inserts, updates, and deletes as one unit.
    ///
    /// The batch is replayed in order onto a working copy of the current
    /// snapshot. Any violation (duplicate uid, unknown uid, dangling
    /// reference after the whole batch) rejects the entire batch with the
    /// registry unchanged, in memory and on disk.
    pub fn commit(&self, batch: Vec<CommitOp>) -> SchemaResult<()> {
        let _writer = self
            .writer
            .lock()
            .map_err(|_| SchemaError::Internal("registry writer lock poisoned".to_string()))?;

        let current = self.read_snapshot()?;
        let mut entities = current.entities.clone();

        for op in &batch {
            match op {
                CommitOp::Insert(entity) => {
                    let uid = entity.uid().to_string();
                    if entities.contains_key(&uid) {
                        return Err(SchemaError::DuplicateUid(uid));
                    }
                    entities.insert(uid, entity.clone());
                }
                CommitOp::Update(entity) => {
                    let uid = entity.uid().to_string();
                    if !entities.contains_key(&uid) {
                        return Err(SchemaError::Conflict(format!(
                            "update of unknown uid '{uid}'"
                        )));
                    }
                    entities.insert(uid, entity.clone());
                }
                CommitOp::Delete(uid) => {
                    if entities.remove(uid).is_none() {
                        return Err(SchemaError::NotFound(format!("entity '{uid}'")));
                    }
                }
            }
        }

        check_references(&entities)?;
        let referenced_by = build_reference_index(&entities);

        // Disk first: if persistence fails the in-memory snapshot is untouched.
        self.store.apply(&batch)?;

        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|_| SchemaError::Internal("registry snapshot lock poisoned".to_string()))?;
        *snapshot = Arc::new(RegistrySnapshot {
            entities,
            referenced_by,
        });

        info!("committed schema batch of {} operation(s)", batch.len());
        Ok(())
    }

    fn read_snapshot(&self) -> SchemaResult<Arc<RegistrySnapshot>> {
        Ok(self
            .snapshot
            .read()
            .map_err(|_| SchemaError::Internal("registry snapshot lock poisoned".to_string()))?
            .clone())
    }
}

/// Verify that every attribute target resolves to an entity in `entities`.
fn check_references(entities: &HashMap<String, SchemaEntity>) -> SchemaResult<()> {
    for entity in entities.values() {
        for (name, attribute) in entity.attributes() {
            for target in attribute.targets() {
                if !entities.contains_key(target) {
                    return Err(SchemaError::Conflict(format!(
                        "attribute '{}.{}' references unknown uid '{}'",
                        entity.uid(),
                        name,
                        target
                    )));
                }
            }
        }
    }
    Ok(())
}

fn build_reference_index(
    entities: &HashMap<String, SchemaEntity>,
) -> HashMap<String, BTreeSet<String>> {
    let mut index: HashMap<String, BTreeSet<String>> = HashMap::new();
    for entity in entities.values() {
        for attribute in entity.attributes().values() {
            for target in attribute.targets() {
                index
                    .entry(target.to_string())
                    .or_default()
                    .insert(entity.uid().to_string());
            }
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{
        Attribute, AttributeKind, Attributes, ComponentInfo, ContentTypeInfo, RelationKind,
        SchemaOptions,
    };
    use tempfile::tempdir;

    fn registry() -> (tempfile::TempDir, SchemaRegistry) {
        let dir = tempdir().unwrap();
        let store = SchemaStore::open(dir.path()).unwrap();
        (dir, SchemaRegistry::new(store).unwrap())
    }

    fn content_type(uid: &str) -> SchemaEntity {
        SchemaEntity::ContentType(ContentType {
            uid: uid.to_string(),
            kind: ContentTypeKind::CollectionType,
            info: ContentTypeInfo {
                display_name: uid.to_string(),
                description: String::new(),
            },
            options: SchemaOptions::default(),
            attributes: Attributes::new(),
        })
    }

    fn component(uid: &str, category: &str) -> SchemaEntity {
        SchemaEntity::Component(Component {
            uid: uid.to_string(),
            category: category.to_string(),
            info: ComponentInfo {
                display_name: uid.to_string(),
                icon: String::new(),
            },
            options: SchemaOptions::default(),
            attributes: Attributes::new(),
        })
    }

    fn with_relation(mut entity: SchemaEntity, name: &str, target: &str) -> SchemaEntity {
        entity.attributes_mut().insert(
            name.to_string(),
            Attribute::new(AttributeKind::Relation {
                target: target.to_string(),
                relation: RelationKind::OneToOne,
            }),
        );
        entity
    }

    #[test]
    fn commit_is_all_or_nothing() {
        let (_dir, registry) = registry();
        registry
            .commit(vec![CommitOp::Insert(content_type("api::a.a"))])
            .unwrap();

        // Second op collides, so the first op must not land either.
        let err = registry
            .commit(vec![
                CommitOp::Insert(content_type("api::b.b")),
                CommitOp::Insert(content_type("api::a.a")),
            ])
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateUid(_)));

        assert!(!registry.contains("api::b.b").unwrap());
    }

    #[test]
    fn duplicate_uid_across_kinds_is_rejected() {
        let (_dir, registry) = registry();
        registry
            .commit(vec![CommitOp::Insert(component("shared.uid", "shared"))])
            .unwrap();

        let err = registry
            .commit(vec![CommitOp::Insert(content_type("shared.uid"))])
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateUid(_)));
    }

    #[test]
    fn dangling_reference_rejects_the_batch() {
        let (_dir, registry) = registry();

        let err = registry
            .commit(vec![CommitOp::Insert(with_relation(
                content_type("api::a.a"),
                "author",
                "api::missing.missing",
            ))])
            .unwrap_err();
        assert!(matches!(err, SchemaError::Conflict(_)));
        assert!(!registry.contains("api::a.a").unwrap());
    }

    #[test]
    fn batched_create_resolves_intra_batch_references() {
        let (_dir, registry) = registry();

        registry
            .commit(vec![
                CommitOp::Insert(with_relation(
                    content_type("api::a.a"),
                    "hero",
                    "layout.hero",
                )),
                CommitOp::Insert(component("layout.hero", "layout")),
            ])
            .unwrap();

        assert_eq!(
            registry.referencing("layout.hero").unwrap(),
            vec!["api::a.a".to_string()]
        );
    }

    #[test]
    fn delete_leaving_dangling_reference_is_rejected() {
        let (_dir, registry) = registry();
        registry
            .commit(vec![
                CommitOp::Insert(component("layout.hero", "layout")),
                CommitOp::Insert(with_relation(
                    content_type("api::a.a"),
                    "hero",
                    "layout.hero",
                )),
            ])
            .unwrap();

        let err = registry
            .commit(vec![CommitOp::Delete("layout.hero".to_string())])
            .unwrap_err();
        assert!(matches!(err, SchemaError::Conflict(_)));
        assert!(registry.contains("layout.hero").unwrap());
    }

    #[test]
    fn state_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = SchemaStore::open(dir.path()).unwrap();
            let registry = SchemaRegistry::new(store).unwrap();
            registry
                .commit(vec![CommitOp::Insert(content_type("api::a.a"))])
                .unwrap();
        }

        let store = SchemaStore::open(dir.path()).unwrap();
        let registry = SchemaRegistry::new(store).unwrap();
        assert!(registry.contains("api::a.a").unwrap());
    }

    #[test]
    fn list_content_types_filters_by_kind() {
        let (_dir, registry) = registry();
        let mut single = content_type("api::about.about");
        if let SchemaEntity::ContentType(ct) = &mut single {
            ct.kind = ContentTypeKind::SingleType;
        }
        registry
            .commit(vec![
                CommitOp::Insert(content_type("api::a.a")),
                CommitOp::Insert(single),
            ])
            .unwrap();

        let singles = registry
            .list_content_types(Some(ContentTypeKind::SingleType))
            .unwrap();
        assert_eq!(singles.len(), 1);
        assert_eq!(singles[0].uid, "api::about.about");

        assert_eq!(registry.list_content_types(None).unwrap().len(), 2);
    }
}
