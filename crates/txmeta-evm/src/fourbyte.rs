//! 4byte.directory signature lookup.
//!
//! `GET {base}/api/v1/signatures/?hex_signature={prefix}` answers with
//! `{ "count": n, "results": [{ "text_signature": "..." }, ...] }`. Only an
//! unambiguous answer (`count == 1`) is used; collisions count as unknown.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ResolverConfig;
use crate::fetch::{CachedFetcher, FetchError};
use crate::retry::RetryPolicy;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("unexpected response from {service}: {reason}")]
    InvalidResponse { service: String, reason: String },
}

/// A public signature database queried when the registry has no match.
#[async_trait]
pub trait SignatureDirectory: Send + Sync {
    /// Text signature for a `0x`-prefixed selector, if the directory knows
    /// exactly one.
    async fn lookup(&self, prefix: &str) -> Result<Option<String>, DirectoryError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FourByteResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub results: Vec<FourByteResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FourByteResult {
    #[serde(default)]
    pub id: u64,
    pub text_signature: String,
    #[serde(default)]
    pub hex_signature: String,
}

impl FourByteResponse {
    /// The single text signature, when the directory returned exactly one.
    pub fn unique_signature(&self) -> Option<&str> {
        if self.count == 1 {
            self.results.first().map(|r| r.text_signature.as_str())
        } else {
            None
        }
    }
}

/// [`SignatureDirectory`] backed by 4byte.directory.
pub struct FourByteDirectory {
    base_url: String,
    fetcher: Arc<CachedFetcher>,
    retry: RetryPolicy,
}

impl FourByteDirectory {
    pub fn new(base_url: impl Into<String>, fetcher: Arc<CachedFetcher>, retry: RetryPolicy) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            fetcher,
            retry,
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Result<Self, FetchError> {
        let fetcher = Arc::new(CachedFetcher::new(config)?);
        Ok(Self::new(
            config.directory_url.clone(),
            fetcher,
            RetryPolicy::new(config.retry()),
        ))
    }

    pub fn url_for(&self, prefix: &str) -> String {
        format!("{}/api/v1/signatures/?hex_signature={prefix}", self.base_url)
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetcher.get_json(url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() => {
                    attempt += 1;
                    let Some(delay) = self.retry.next_delay(attempt) else {
                        return Err(e);
                    };
                    warn!(url, attempt, ?delay, error = %e, "directory request failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl SignatureDirectory for FourByteDirectory {
    async fn lookup(&self, prefix: &str) -> Result<Option<String>, DirectoryError> {
        let url = self.url_for(prefix);
        let body = self.fetch_with_retry(&url).await?;
        let response: FourByteResponse =
            serde_json::from_value(body).map_err(|e| DirectoryError::InvalidResponse {
                service: "4byte.directory".into(),
                reason: e.to_string(),
            })?;

        let found = response.unique_signature().map(str::to_string);
        debug!(prefix, count = response.count, found = ?found, "4byte.directory lookup");
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn directory() -> FourByteDirectory {
        let fetcher = Arc::new(CachedFetcher::with_client(
            reqwest::Client::new(),
            Duration::from_secs(60),
        ));
        FourByteDirectory::new("http://127.0.0.1:9/", fetcher, RetryPolicy::none())
    }

    #[test]
    fn unique_signature_only_when_count_is_one() {
        let one: FourByteResponse = serde_json::from_value(json!({
            "count": 1,
            "results": [{ "id": 145, "text_signature": "transfer(address,uint256)", "hex_signature": "0xa9059cbb" }]
        }))
        .unwrap();
        assert_eq!(one.unique_signature(), Some("transfer(address,uint256)"));

        let many: FourByteResponse = serde_json::from_value(json!({
            "count": 2,
            "results": [
                { "text_signature": "transfer(address,uint256)" },
                { "text_signature": "many_msg_babbage(bytes1)" }
            ]
        }))
        .unwrap();
        assert_eq!(many.unique_signature(), None);

        let none: FourByteResponse = serde_json::from_value(json!({ "count": 0, "results": [] })).unwrap();
        assert_eq!(none.unique_signature(), None);
    }

    #[test]
    fn url_strips_trailing_slash() {
        assert_eq!(
            directory().url_for("0xa9059cbb"),
            "http://127.0.0.1:9/api/v1/signatures/?hex_signature=0xa9059cbb"
        );
    }

    #[tokio::test]
    async fn lookup_reads_cached_response() {
        let dir = directory();
        dir.fetcher.store(
            &dir.url_for("0x095ea7b3"),
            json!({ "count": 1, "results": [{ "text_signature": "approve(address,uint256)" }] }),
        );
        let sig = dir.lookup("0x095ea7b3").await.unwrap();
        assert_eq!(sig.as_deref(), Some("approve(address,uint256)"));
    }

    #[tokio::test]
    async fn malformed_response_is_an_error() {
        let dir = directory();
        dir.fetcher.store(&dir.url_for("0x00000001"), json!({ "results": "nope" }));
        assert!(matches!(
            dir.lookup("0x00000001").await,
            Err(DirectoryError::InvalidResponse { .. })
        ));
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn lookup_live_transfer_selector() {
        let dir = FourByteDirectory::from_config(&ResolverConfig::default()).unwrap();
        // 0xa9059cbb collides on 4byte.directory, so no unique answer.
        let result = dir.lookup("0xa9059cbb").await;
        assert!(result.is_ok());
    }
}
