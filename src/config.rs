//! Node configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::schema::types::SchemaResult;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "SCHEMAFOLD_CONFIG";

/// Settings of one named database connection. Only the names are consumed by
/// this subsystem (through the connections endpoint); the settings blob is
/// passed through untouched for the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    #[serde(default)]
    pub connector: String,
    #[serde(default)]
    pub settings: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub connections: BTreeMap<String, ConnectionSettings>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let mut connections = BTreeMap::new();
        connections.insert(
            "default".to_string(),
            ConnectionSettings {
                connector: "sled".to_string(),
                settings: serde_json::Value::Null,
            },
        );
        Self { connections }
    }
}

/// Configuration for a SchemaFold node instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Path where the node stores the schema registry
    pub storage_path: PathBuf,
    /// HTTP listen address
    #[serde(default = "default_http_bind_address")]
    pub http_bind_address: String,
    #[serde(default)]
    pub database: DatabaseConfig,
}

fn default_http_bind_address() -> String {
    "127.0.0.1:1337".to_string()
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("data"),
            http_bind_address: default_http_bind_address(),
            database: DatabaseConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Create a new node configuration with the specified storage path
    pub fn new(storage_path: PathBuf) -> Self {
        Self {
            storage_path,
            ..Default::default()
        }
    }

    /// Names of the configured database connections.
    pub fn connection_names(&self) -> Vec<String> {
        self.database.connections.keys().cloned().collect()
    }
}

/// Load the node configuration from `path`, from the `SCHEMAFOLD_CONFIG`
/// environment variable, or fall back to defaults when neither is set.
pub fn load_node_config(path: Option<&Path>) -> SchemaResult<NodeConfig> {
    let resolved = match path {
        Some(p) => Some(p.to_path_buf()),
        None => std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from),
    };

    match resolved {
        Some(p) => {
            let contents = std::fs::read_to_string(&p)?;
            let config = serde_json::from_str(&contents)?;
            Ok(config)
        }
        None => Ok(NodeConfig::default()),
    }
}
