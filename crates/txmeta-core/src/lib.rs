//! txmeta-core — transaction metadata foundation types.
//!
//! This crate defines:
//! - [`TransactionRecord`] and its status/type/category enums
//! - the classifier functions in [`classify`] (status keys, category titles,
//!   nonce lookup, 4-byte prefixes)
//! - [`explorer_url_for`] — block explorer links
//! - the method signature grammar in [`signature`]
//! - [`MethodRegistry`] — the trait for looking up method signatures

pub mod classify;
pub mod error;
pub mod explorer;
pub mod registry;
pub mod signature;
pub mod types;

pub use classify::{
    add_hex_prefix, category_title, four_byte_prefix_of, is_token_method_category,
    latest_submitted_with_nonce, status_key_of,
};
pub use error::{HexError, RegistryError, UnrecognizedCategory};
pub use explorer::explorer_url_for;
pub use registry::{parse_selector, MemoryMethodRegistry, MethodRegistry};
pub use signature::{parse_signature, recombine_name, MethodSignature, ParamDescriptor, ParsedSignature};
pub use types::{
    RpcPrefs, StatusKey, TransactionCategory, TransactionRecord, TransactionStatus, TransactionType,
    TxParams, TxReceipt,
};
