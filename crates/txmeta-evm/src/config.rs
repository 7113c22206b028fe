//! Resolver configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::retry::RetryConfig;

/// Settings for [`SignatureResolver`](crate::SignatureResolver) and its
/// outbound requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Base URL of the public signature directory.
    #[serde(default = "default_directory_url")]
    pub directory_url: String,
    /// Query the directory when the registry has no match.
    #[serde(default = "bool_true")]
    pub fallback_enabled: bool,
    /// Timeout applied to each outbound request, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// How long a cached directory response stays fresh, in seconds.
    #[serde(default = "default_cache_refresh_secs")]
    pub cache_refresh_secs: u64,
    /// Retries after the first failed directory request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Initial backoff in milliseconds
    #[serde(default = "default_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Extra signature strings loaded into the registry on startup.
    #[serde(default)]
    pub extra_signatures: Vec<String>,
}

fn default_directory_url() -> String {
    "https://www.4byte.directory".into()
}
fn bool_true() -> bool { true }
fn default_request_timeout_ms() -> u64 { 30_000 }
fn default_cache_refresh_secs() -> u64 { 360 }
fn default_max_retries() -> u32 { 2 }
fn default_backoff_ms() -> u64 { 250 }

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            directory_url: default_directory_url(),
            fallback_enabled: true,
            request_timeout_ms: default_request_timeout_ms(),
            cache_refresh_secs: default_cache_refresh_secs(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_backoff_ms(),
            extra_signatures: vec![],
        }
    }
}

impl ResolverConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn cache_refresh(&self) -> Duration {
        Duration::from_secs(self.cache_refresh_secs)
    }

    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.max_retries,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            ..RetryConfig::default()
        }
    }
}
