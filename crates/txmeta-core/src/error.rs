//! Error types shared across txmeta crates.
//!
//! Expected absences (unknown selector, unknown network, no nonce match) are
//! never errors; they are `None` or an empty string at the call site.

use thiserror::Error;

/// A transaction category outside the known set.
///
/// Returned instead of rendering a blank title, so drift between the
/// category producer and the title consumer is caught.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized transaction category: {0}")]
pub struct UnrecognizedCategory(pub String);

/// Errors raised by a [`MethodRegistry`](crate::registry::MethodRegistry).
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("malformed signature {signature:?}: {reason}")]
    MalformedSignature { signature: String, reason: String },

    #[error("registry lookup timed out after {0} ms")]
    Timeout(u64),

    #[error("registry backend error: {0}")]
    Backend(String),
}

/// Errors from hex quantity arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("invalid hex quantity {value:?}: {reason}")]
    Invalid { value: String, reason: String },

    #[error("hex sum overflows 256 bits")]
    Overflow,

    #[error("nothing to sum")]
    Empty,
}
