//! txmeta-evm — EVM method resolution for wallet transaction views.
//!
//! Provides:
//! - [`SignatureResolver`] — registry lookup with a 4byte.directory fallback
//! - [`FourByteDirectory`] — the directory client, over [`CachedFetcher`]
//! - [`bundled_registry`] — well-known token / NFT / router signatures
//! - [`TokenDataDecoder`] — ERC-20 call-data decoding
//! - [`sum_hexes`] — hex quantity arithmetic

pub mod bundled;
pub mod config;
pub mod fetch;
pub mod fourbyte;
pub mod hexmath;
pub mod resolver;
pub mod retry;
pub mod token;

pub use bundled::{bundled_registry, load_signatures_json, selector_hex, selector_of};
pub use config::ResolverConfig;
pub use fetch::{CachedFetcher, FetchError};
pub use fourbyte::{DirectoryError, FourByteDirectory, FourByteResponse, SignatureDirectory};
pub use hexmath::{parse_hex_quantity, sum_hexes};
pub use resolver::SignatureResolver;
pub use retry::{RetryConfig, RetryPolicy};
pub use token::{TokenCall, TokenDataDecoder};
