//! # SchemaFold
//!
//! SchemaFold is the mutation layer of a content-modeling platform: it lets
//! an operator define, edit, and delete content types and components, and
//! persists those definitions so the rest of the platform can generate
//! storage layers, validation rules, and APIs from them.
//!
//! ## Core Components
//!
//! * `schema` - Entity types, uid derivation, structural validation, and the
//!   transactional schema registry
//! * `services` - Mutation services orchestrating validate, commit, and
//!   reload scheduling for each entity kind
//! * `reload` - The process-wide reload coordinator that suppresses the file
//!   watcher during mutations and schedules deferred reloads
//! * `db_operations` - sled-backed persistence for committed entities
//! * `schemafold_node` - Node wiring and the HTTP surface
//! * `permissions` / `telemetry` - Seams to the platform's permission
//!   registry and telemetry reporter
//!
//! ## Architecture
//!
//! Request handlers call a mutation service, which validates the proposed
//! definition, commits an all-or-nothing batch to the registry, and asks the
//! reload coordinator to schedule a deferred full-process reload. The
//! registry is the single source of truth; reads always observe the last
//! complete snapshot.

pub mod config;
pub mod db_operations;
pub mod permissions;
pub mod reload;
pub mod schema;
pub mod schemafold_node;
pub mod services;
pub mod telemetry;
pub mod testing;

// Re-export main types for convenience
pub use config::{load_node_config, NodeConfig};
pub use db_operations::SchemaStore;
pub use permissions::{ActionDescriptor, ActionRegistrar, LoggingActionRegistrar};
pub use reload::{LoggingReloadTrigger, ReloadCoordinator, ReloadState, ReloadTrigger};
pub use schema::registry::{CommitOp, SchemaRegistry};
pub use schema::types::{
    Attribute, AttributeKind, Component, ContentType, ContentTypeKind, SchemaEntity, SchemaError,
    SchemaResult, ValidationIssue,
};
pub use schemafold_node::{SchemaFoldHttpServer, SchemaFoldNode};
pub use services::{ComponentService, ContentTypeService};
pub use telemetry::{LoggingTelemetryReporter, TelemetryReporter};
