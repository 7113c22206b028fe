//! GET-with-cache HTTP helper.
//!
//! JSON responses are cached per URL for a refresh window; a failed request
//! never replaces a cached entry.

use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::ResolverConfig;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fetch failed with status {status}: {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid JSON from {url}: {reason}")]
    InvalidJson { url: String, reason: String },
}

impl FetchError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidJson { .. } => false,
        }
    }
}

struct CachedResponse {
    fetched_at: Instant,
    body: Value,
}

/// HTTP GET client with an in-memory response cache.
pub struct CachedFetcher {
    client: Client,
    cache_refresh: Duration,
    cache: RwLock<HashMap<String, CachedResponse>>,
}

impl CachedFetcher {
    /// Build a fetcher with the request timeout and refresh window from `config`.
    pub fn new(config: &ResolverConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("txmeta/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, config.cache_refresh()))
    }

    pub fn with_client(client: Client, cache_refresh: Duration) -> Self {
        Self {
            client,
            cache_refresh,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// GET `url` and parse the body as JSON, serving fresh cache hits locally.
    pub async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        if let Some(body) = self.cached(url) {
            debug!(url, "fetch cache hit");
            return Ok(body);
        }

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = resp.text().await?;
        let body: Value = serde_json::from_str(&text).map_err(|e| FetchError::InvalidJson {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        self.store(url, body.clone());
        Ok(body)
    }

    /// Fresh cached body for `url`, if any.
    pub fn cached(&self, url: &str) -> Option<Value> {
        let cache = self.cache.read().unwrap();
        cache
            .get(url)
            .filter(|entry| entry.fetched_at.elapsed() < self.cache_refresh)
            .map(|entry| entry.body.clone())
    }

    /// Insert a response body, as if it had just been fetched.
    pub fn store(&self, url: &str, body: Value) {
        self.cache.write().unwrap().insert(
            url.to_string(),
            CachedResponse {
                fetched_at: Instant::now(),
                body,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fetcher(refresh: Duration) -> CachedFetcher {
        CachedFetcher::with_client(Client::new(), refresh)
    }

    #[tokio::test]
    async fn fresh_entry_served_from_cache() {
        let f = fetcher(Duration::from_secs(60));
        // Unroutable URL: a cache miss would fail.
        let url = "http://127.0.0.1:9/api/v1/signatures/?hex_signature=0xa9059cbb";
        f.store(url, json!({ "count": 0, "results": [] }));

        let body = f.get_json(url).await.unwrap();
        assert_eq!(body["count"], 0);
        assert!(f.cached(url).is_some());
    }

    #[test]
    fn stale_entry_is_not_served() {
        let f = fetcher(Duration::ZERO);
        f.store("http://example.invalid/a", json!(1));
        assert!(f.cached("http://example.invalid/a").is_none());
    }

    #[test]
    fn status_errors_classified() {
        let server = FetchError::Status { url: "u".into(), status: 503 };
        let limited = FetchError::Status { url: "u".into(), status: 429 };
        let missing = FetchError::Status { url: "u".into(), status: 404 };
        assert!(server.is_transient());
        assert!(limited.is_transient());
        assert!(!missing.is_transient());
    }
}
