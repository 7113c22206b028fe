//! `SignatureResolver` — selector → human-readable method.
//!
//! Resolution order:
//! 1. Start the directory lookup in the background
//! 2. Primary method registry
//! 3. Directory result, awaited only if the registry had nothing
//! 4. Nothing found → `None`
//!
//! Upstream failures are logged and degrade to `None`; `resolve` never errors.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error};
use txmeta_core::classify::four_byte_prefix_of;
use txmeta_core::error::RegistryError;
use txmeta_core::registry::{MemoryMethodRegistry, MethodRegistry};
use txmeta_core::signature::MethodSignature;

use crate::bundled::{bundled_registry, register_signatures};
use crate::config::ResolverConfig;
use crate::fetch::FetchError;
use crate::fourbyte::{FourByteDirectory, SignatureDirectory};

/// Resolves 4-byte prefixes using a method registry with a directory fallback.
///
/// # Usage
/// ```rust,no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use txmeta_evm::{ResolverConfig, SignatureResolver};
///
/// let resolver = SignatureResolver::from_config(&ResolverConfig::default())?;
/// if let Some(method) = resolver.resolve("0xa9059cbb").await {
///     println!("{}", method.name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SignatureResolver {
    registry: Arc<dyn MethodRegistry>,
    directory: Option<Arc<dyn SignatureDirectory>>,
    lookup_timeout: Duration,
}

impl SignatureResolver {
    /// Create a resolver over an existing registry and optional directory.
    pub fn new(
        registry: Arc<dyn MethodRegistry>,
        directory: Option<Arc<dyn SignatureDirectory>>,
    ) -> Self {
        Self {
            registry,
            directory,
            lookup_timeout: ResolverConfig::default().request_timeout(),
        }
    }

    /// Bound the primary registry lookup.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Bundled registry (plus `extra_signatures`) and 4byte.directory fallback.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, FetchError> {
        Self::with_registry(config, bundled_registry())
    }

    /// Like [`from_config`](Self::from_config), over a caller-populated registry.
    pub fn with_registry(config: &ResolverConfig, registry: MemoryMethodRegistry) -> Result<Self, FetchError> {
        let extra = register_signatures(&registry, config.extra_signatures.iter().map(String::as_str));
        if extra > 0 {
            debug!(count = extra, "registered extra signatures");
        }

        let directory: Option<Arc<dyn SignatureDirectory>> = if config.fallback_enabled {
            Some(Arc::new(FourByteDirectory::from_config(config)?))
        } else {
            None
        };

        Ok(Self::new(Arc::new(registry), directory).with_lookup_timeout(config.request_timeout()))
    }

    /// Resolve a `0x`-prefixed 4-byte prefix into a method name and params.
    pub async fn resolve(&self, prefix: &str) -> Option<MethodSignature> {
        let fallback = self.spawn_directory_lookup(prefix);

        let primary = match self.registry_lookup(prefix).await {
            Ok(sig) => sig,
            Err(e) => {
                error!(prefix, registry = self.registry.name(), error = %e, "method registry lookup failed");
                return None;
            }
        };

        let signature = match primary {
            Some(sig) => sig,
            None => join_fallback(prefix, fallback).await?,
        };

        match self.registry.parse(&signature) {
            Ok(parsed) => {
                let method = MethodSignature::from_parsed(parsed);
                debug!(prefix, signature = %signature, name = %method.name, "resolved method");
                Some(method)
            }
            Err(e) => {
                error!(prefix, signature = %signature, error = %e, "failed to parse method signature");
                None
            }
        }
    }

    /// Primary registry lookup bounded by the lookup timeout.
    pub async fn registry_lookup(&self, prefix: &str) -> Result<Option<String>, RegistryError> {
        tokio::time::timeout(self.lookup_timeout, self.registry.lookup(prefix))
            .await
            .map_err(|_| RegistryError::Timeout(self.lookup_timeout.as_millis() as u64))?
    }

    /// Resolve the method called by raw transaction call data.
    pub async fn resolve_data(&self, data: &str) -> Option<MethodSignature> {
        self.resolve(&four_byte_prefix_of(data)).await
    }

    fn spawn_directory_lookup(&self, prefix: &str) -> Option<JoinHandle<Option<String>>> {
        let directory = self.directory.clone()?;
        let prefix = prefix.to_string();
        Some(tokio::spawn(async move {
            match directory.lookup(&prefix).await {
                Ok(sig) => sig,
                Err(e) => {
                    error!(prefix = %prefix, error = %e, "signature directory lookup failed");
                    None
                }
            }
        }))
    }
}

async fn join_fallback(prefix: &str, handle: Option<JoinHandle<Option<String>>>) -> Option<String> {
    match handle?.await {
        Ok(sig) => sig,
        Err(e) => {
            error!(prefix, error = %e, "signature directory task failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bundled_only_resolver() {
        let resolver = SignatureResolver::new(Arc::new(bundled_registry()), None);

        let method = resolver.resolve("0x23b872dd").await.unwrap();
        assert_eq!(method.name, "Transfer From");
        assert_eq!(method.params.len(), 3);

        assert!(resolver.resolve("0xdeadbeef").await.is_none());
    }

    #[tokio::test]
    async fn resolve_data_uses_prefix() {
        let resolver = SignatureResolver::new(Arc::new(bundled_registry()), None);
        let method = resolver
            .resolve_data("a9059cbb000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045")
            .await
            .unwrap();
        assert_eq!(method.name, "Transfer");
    }

    #[tokio::test]
    async fn invalid_prefix_degrades_to_none() {
        let resolver = SignatureResolver::new(Arc::new(bundled_registry()), None);
        assert!(resolver.resolve("0x").await.is_none());
        assert!(resolver.resolve("not-hex!").await.is_none());
    }

    #[tokio::test]
    async fn from_config_registers_extra_signatures() {
        let config = ResolverConfig {
            fallback_enabled: false,
            extra_signatures: vec!["setURI(string)".into(), "mintBatchNFT(uint256)".into()],
            ..ResolverConfig::default()
        };
        let resolver = SignatureResolver::from_config(&config).unwrap();
        let prefix = crate::bundled::selector_hex("mintBatchNFT(uint256)");
        let method = resolver.resolve(&prefix).await.unwrap();
        assert_eq!(method.name, "Mint Batch NFT");
    }

    #[tokio::test]
    async fn with_registry_keeps_loaded_signatures() {
        let registry = bundled_registry();
        crate::bundled::load_signatures_json(&registry, r#"["setURI(string)"]"#).unwrap();
        let config = ResolverConfig {
            fallback_enabled: false,
            ..ResolverConfig::default()
        };
        let resolver = SignatureResolver::with_registry(&config, registry).unwrap();
        let method = resolver.resolve("0x02fe5305").await.unwrap();
        assert_eq!(method.name, "Set URI");
        assert_eq!(method.params[0].ty, "string");
    }
}
