//! Admin action declarations.
//!
//! At startup the subsystem declares its actions to the platform's
//! permission registry so the admin layer can gate access to the builder
//! endpoints. The registry itself is an external collaborator behind
//! [`ActionRegistrar`].

use serde::{Deserialize, Serialize};

use crate::schema::types::SchemaResult;

pub const PLUGIN_NAME: &str = "schema-builder";

/// One admin action as the permission registry expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    pub section: String,
    pub display_name: String,
    pub uid: String,
    pub plugin_name: String,
}

pub trait ActionRegistrar: Send + Sync {
    fn register_many(&self, actions: Vec<ActionDescriptor>) -> SchemaResult<()>;
}

/// The actions this subsystem declares.
pub fn builder_actions() -> Vec<ActionDescriptor> {
    vec![ActionDescriptor {
        section: "plugins".to_string(),
        display_name: "Read".to_string(),
        uid: "read".to_string(),
        plugin_name: PLUGIN_NAME.to_string(),
    }]
}

/// Declare the builder's actions. Called once at node startup.
pub fn register_actions(registrar: &dyn ActionRegistrar) -> SchemaResult<()> {
    registrar.register_many(builder_actions())
}

/// Default registrar: logs the registration and accepts it.
pub struct LoggingActionRegistrar;

impl ActionRegistrar for LoggingActionRegistrar {
    fn register_many(&self, actions: Vec<ActionDescriptor>) -> SchemaResult<()> {
        log::info!("registered {} admin action(s)", actions.len());
        Ok(())
    }
}
