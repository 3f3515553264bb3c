use std::sync::Arc;

use log::info;

use crate::config::NodeConfig;
use crate::db_operations::SchemaStore;
use crate::permissions::{self, ActionRegistrar};
use crate::reload::{ReloadCoordinator, ReloadTrigger};
use crate::schema::registry::SchemaRegistry;
use crate::schema::types::SchemaResult;
use crate::services::{ComponentService, ContentTypeService};
use crate::telemetry::TelemetryReporter;

/// A running schema-builder node: the registry, the two mutation services,
/// and the reload coordinator, wired to the platform collaborators handed in
/// at construction time. The registry is owned here and passed explicitly to
/// every consumer; nothing reads it through ambient globals.
pub struct SchemaFoldNode {
    pub config: NodeConfig,
    pub registry: Arc<SchemaRegistry>,
    pub content_types: ContentTypeService,
    pub components: ComponentService,
    pub coordinator: Arc<ReloadCoordinator>,
    pub telemetry: Arc<dyn TelemetryReporter>,
}

impl SchemaFoldNode {
    /// Open the schema store under the configured storage path, restore the
    /// registry, and declare this subsystem's admin actions.
    pub fn new(
        config: NodeConfig,
        trigger: Arc<dyn ReloadTrigger>,
        telemetry: Arc<dyn TelemetryReporter>,
        registrar: &dyn ActionRegistrar,
    ) -> SchemaResult<Self> {
        let store = SchemaStore::open(&config.storage_path)?;
        let registry = Arc::new(SchemaRegistry::new(store)?);
        let coordinator = Arc::new(ReloadCoordinator::new(trigger));

        permissions::register_actions(registrar)?;

        info!(
            "schema builder node ready (storage: {})",
            config.storage_path.display()
        );

        Ok(Self {
            content_types: ContentTypeService::new(registry.clone(), coordinator.clone()),
            components: ComponentService::new(registry.clone(), coordinator.clone()),
            registry,
            coordinator,
            telemetry,
            config,
        })
    }
}
