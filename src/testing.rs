//! Test support utilities shared by unit and integration tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::NodeConfig;
use crate::permissions::LoggingActionRegistrar;
use crate::reload::ReloadTrigger;
use crate::schema::types::SchemaResult;
use crate::schemafold_node::SchemaFoldNode;
use crate::telemetry::LoggingTelemetryReporter;

/// A reload trigger that records how many times it ran.
#[derive(Default)]
pub struct CountingReloadTrigger {
    reloads: AtomicUsize,
}

impl CountingReloadTrigger {
    pub fn count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl ReloadTrigger for CountingReloadTrigger {
    fn reload(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }
}

/// Build a node over `storage_path` with logging collaborators and a
/// counting reload trigger.
pub fn test_node(storage_path: &Path) -> SchemaResult<(SchemaFoldNode, Arc<CountingReloadTrigger>)> {
    let trigger = Arc::new(CountingReloadTrigger::default());
    let node = SchemaFoldNode::new(
        NodeConfig::new(storage_path.to_path_buf()),
        trigger.clone(),
        Arc::new(LoggingTelemetryReporter),
        &LoggingActionRegistrar,
    )?;
    Ok((node, trigger))
}
