//! CLI configuration file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use txmeta_evm::ResolverConfig;

use crate::logging::LogConfig;

/// Top-level configuration, read from a JSON file.
///
/// ```json
/// {
///   "resolver": { "request_timeout_ms": 5000, "fallback_enabled": true },
///   "log": { "level": "info", "components": { "txmeta-evm": "debug" } }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TxmetaConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl TxmetaConfig {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("invalid config JSON in {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
struct Message {
    message: String,
}

/// Translation table in the wallet's `messages.json` layout:
/// `{ "transfer": { "message": "Send Token" }, ... }`.
#[derive(Debug, Default)]
pub struct Messages {
    table: HashMap<String, String>,
}

impl Messages {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read messages {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("invalid messages JSON in {}", path.display()))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let raw: HashMap<String, Message> = serde_json::from_str(json)?;
        Ok(Self {
            table: raw.into_iter().map(|(k, v)| (k, v.message)).collect(),
        })
    }

    /// Translate `key`; unknown keys translate to themselves.
    pub fn t(&self, key: &str) -> String {
        self.table.get(key).cloned().unwrap_or_else(|| key.to_string())
    }
}
