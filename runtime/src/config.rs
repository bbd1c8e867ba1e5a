//! Runtime configuration with TOML file support.

use crate::error::RuntimeError;
use agora_types::{Action, ProtocolParams};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration for the Agora runtime.
///
/// Can be loaded from a TOML file via [`RuntimeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Missing fields fall back to the
/// protocol defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Protocol parameter overrides.
    #[serde(default)]
    pub params: ProtocolParams,

    /// Operator-supplied verification-level table, keyed by action name
    /// (`propose`, `vote`, `post`, `comment`, `report`, `dispute`, `juror`).
    /// Entries here override the corresponding `params` level.
    #[serde(default)]
    pub action_levels: HashMap<String, u32>,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            params: ProtocolParams::default(),
            action_levels: HashMap::new(),
            log_level: default_log_level(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, RuntimeError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| RuntimeError::Config(format!("read {}: {e}", path.as_ref().display())))?;
        toml::from_str(&raw).map_err(|e| RuntimeError::Config(e.to_string()))
    }

    /// Protocol parameters with the action-level table applied.
    ///
    /// Unknown action names are logged and ignored.
    pub fn effective_params(&self) -> ProtocolParams {
        let mut params = self.params.clone();
        for (name, level) in &self.action_levels {
            match Action::from_name(name) {
                Some(action) => params.set_level(action, *level),
                None => warn!(action = %name, "unknown action in level table, ignoring"),
            }
        }
        params
    }
}
