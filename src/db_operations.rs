//! Persistent storage for committed schema entities.
//!
//! `SchemaStore` wraps a named sled tree holding one JSON-serialized
//! [`SchemaEntity`] per uid. A whole commit batch is written through a
//! single `sled::Batch`, so the on-disk state moves from one complete
//! registry snapshot to the next.

use std::path::Path;

use log::warn;

use crate::schema::registry::CommitOp;
use crate::schema::types::{SchemaEntity, SchemaResult};

const ENTITIES_TREE: &str = "schema_entities";

#[derive(Clone)]
pub struct SchemaStore {
    entities_tree: sled::Tree,
}

impl SchemaStore {
    /// Wrap an already-open sled database.
    pub fn new(db: &sled::Db) -> SchemaResult<Self> {
        let entities_tree = db.open_tree(ENTITIES_TREE)?;
        Ok(Self { entities_tree })
    }

    /// Open (or create) the database under `path` and wrap it.
    pub fn open(path: &Path) -> SchemaResult<Self> {
        let db = sled::open(path)?;
        Self::new(&db)
    }

    /// Load every persisted entity. Records that fail to deserialize are
    /// skipped with a warning so one corrupt row cannot block startup.
    pub fn load_all(&self) -> SchemaResult<Vec<SchemaEntity>> {
        let mut entities = Vec::new();
        for row in self.entities_tree.iter() {
            let (key, value) = row?;
            match serde_json::from_slice::<SchemaEntity>(&value) {
                Ok(entity) => entities.push(entity),
                Err(e) => warn!(
                    "skipping undeserializable schema entity '{}': {}",
                    String::from_utf8_lossy(&key),
                    e
                ),
            }
        }
        Ok(entities)
    }

    /// Apply a commit batch atomically: either every insert, update, and
    /// delete lands on disk or none do.
    pub fn apply(&self, batch: &[CommitOp]) -> SchemaResult<()> {
        let mut tree_batch = sled::Batch::default();
        for op in batch {
            match op {
                CommitOp::Insert(entity) | CommitOp::Update(entity) => {
                    let bytes = serde_json::to_vec(entity)?;
                    tree_batch.insert(entity.uid().as_bytes(), bytes);
                }
                CommitOp::Delete(uid) => {
                    tree_batch.remove(uid.as_bytes());
                }
            }
        }
        self.entities_tree.apply_batch(tree_batch)?;
        self.entities_tree.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{
        Attributes, ContentType, ContentTypeInfo, ContentTypeKind, SchemaOptions,
    };
    use tempfile::tempdir;

    fn article() -> SchemaEntity {
        SchemaEntity::ContentType(ContentType {
            uid: "api::article.article".to_string(),
            kind: ContentTypeKind::CollectionType,
            info: ContentTypeInfo {
                display_name: "Article".to_string(),
                description: String::new(),
            },
            options: SchemaOptions::default(),
            attributes: Attributes::new(),
        })
    }

    #[test]
    fn entities_survive_reopen() {
        let dir = tempdir().unwrap();

        {
            let store = SchemaStore::open(dir.path()).unwrap();
            store.apply(&[CommitOp::Insert(article())]).unwrap();
        }

        let store = SchemaStore::open(dir.path()).unwrap();
        let entities = store.load_all().unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].uid(), "api::article.article");
    }

    #[test]
    fn delete_removes_the_row() {
        let dir = tempdir().unwrap();
        let store = SchemaStore::open(dir.path()).unwrap();

        store.apply(&[CommitOp::Insert(article())]).unwrap();
        store
            .apply(&[CommitOp::Delete("api::article.article".to_string())])
            .unwrap();

        assert!(store.load_all().unwrap().is_empty());
    }
}
