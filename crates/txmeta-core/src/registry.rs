//! Method registry — maps 4-byte selectors to text signatures.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::RegistryError;
use crate::signature::{parse_signature, ParsedSignature};

/// A lookup service mapping method selectors to text signatures.
///
/// Implementations must be `Send + Sync`; the resolver holds one behind an
/// `Arc` for the lifetime of the process.
#[async_trait]
pub trait MethodRegistry: Send + Sync {
    /// Returns the registry name, used in logs (e.g. `"bundled"`).
    fn name(&self) -> &str;

    /// Look up the text signature for a `0x`-prefixed 4-byte selector.
    ///
    /// `Ok(None)` means the selector is unknown, which is not an error.
    async fn lookup(&self, prefix: &str) -> Result<Option<String>, RegistryError>;

    /// Parse a text signature with this registry's grammar.
    fn parse(&self, signature: &str) -> Result<ParsedSignature, RegistryError> {
        parse_signature(signature)
    }
}

/// Parse a `0x`-prefixed (or bare) 8-hex-digit selector.
pub fn parse_selector(prefix: &str) -> Result<[u8; 4], RegistryError> {
    let invalid = |reason: String| RegistryError::InvalidSelector {
        selector: prefix.to_string(),
        reason,
    };
    let stripped = prefix
        .strip_prefix("0x")
        .or_else(|| prefix.strip_prefix("0X"))
        .unwrap_or(prefix);
    let bytes = hex::decode(stripped).map_err(|e| invalid(format!("invalid hex: {e}")))?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| invalid(format!("expected 4 bytes, got {}", b.len())))
}

// ─── In-memory registry ───────────────────────────────────────────────────────

/// A simple in-memory registry backed by `HashMap`.
pub struct MemoryMethodRegistry {
    name: String,
    /// selector → signatures in registration order (collisions are kept)
    by_selector: RwLock<HashMap<[u8; 4], Vec<String>>>,
}

impl MemoryMethodRegistry {
    /// Create an empty registry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            by_selector: RwLock::new(HashMap::new()),
        }
    }

    /// Register a text signature under `selector`.
    ///
    /// The first signature registered for a selector is the one returned by
    /// [`MethodRegistry::lookup`].
    pub fn register(&self, selector: [u8; 4], signature: impl Into<String>) {
        let signature = signature.into();
        let mut by_sel = self.by_selector.write().unwrap();
        let entry = by_sel.entry(selector).or_default();
        if !entry.contains(&signature) {
            entry.push(signature);
        }
    }

    /// All signatures registered for a selector.
    pub fn get_all(&self, selector: [u8; 4]) -> Vec<String> {
        self.by_selector
            .read()
            .unwrap()
            .get(&selector)
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of registered signatures.
    pub fn len(&self) -> usize {
        self.by_selector.read().unwrap().values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MethodRegistry for MemoryMethodRegistry {
    fn name(&self) -> &str {
        &self.name
    }

    async fn lookup(&self, prefix: &str) -> Result<Option<String>, RegistryError> {
        let selector = parse_selector(prefix)?;
        Ok(self.get_all(selector).into_iter().next())
    }
}
