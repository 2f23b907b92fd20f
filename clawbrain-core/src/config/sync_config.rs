use serde::{Deserialize, Serialize};

use super::defaults;

/// Sync-state store connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncStateConfig {
    pub host: String,
    pub port: u16,
}

impl Default for SyncStateConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_SYNC_HOST.to_string(),
            port: defaults::DEFAULT_SYNC_PORT,
        }
    }
}
