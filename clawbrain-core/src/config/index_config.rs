use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::COLLECTION;

/// Vector-index connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub host: String,
    pub port: u16,
    /// Logical collection this handle is bound to.
    pub collection: String,
}

impl IndexConfig {
    /// Base URL of the index's HTTP API.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Same connection, bound to a different collection.
    pub fn with_collection(&self, collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            ..self.clone()
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_INDEX_HOST.to_string(),
            port: defaults::DEFAULT_INDEX_PORT,
            collection: COLLECTION.to_string(),
        }
    }
}
