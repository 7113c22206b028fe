//! ERC-20 token call-data decoding against the human-standard token ABI.

use alloy_core::dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_json_abi::{Function, JsonAbi};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The human-standard token ABI (functions only).
pub const HUMAN_STANDARD_TOKEN_ABI: &str = r#"[
    {"type":"function","name":"name","inputs":[],"outputs":[{"name":"","type":"string"}],"stateMutability":"view"},
    {"type":"function","name":"approve","inputs":[{"name":"_spender","type":"address"},{"name":"_value","type":"uint256"}],"outputs":[{"name":"success","type":"bool"}],"stateMutability":"nonpayable"},
    {"type":"function","name":"totalSupply","inputs":[],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
    {"type":"function","name":"transferFrom","inputs":[{"name":"_from","type":"address"},{"name":"_to","type":"address"},{"name":"_value","type":"uint256"}],"outputs":[{"name":"success","type":"bool"}],"stateMutability":"nonpayable"},
    {"type":"function","name":"decimals","inputs":[],"outputs":[{"name":"","type":"uint8"}],"stateMutability":"view"},
    {"type":"function","name":"version","inputs":[],"outputs":[{"name":"","type":"string"}],"stateMutability":"view"},
    {"type":"function","name":"balanceOf","inputs":[{"name":"_owner","type":"address"}],"outputs":[{"name":"balance","type":"uint256"}],"stateMutability":"view"},
    {"type":"function","name":"symbol","inputs":[],"outputs":[{"name":"","type":"string"}],"stateMutability":"view"},
    {"type":"function","name":"transfer","inputs":[{"name":"_to","type":"address"},{"name":"_value","type":"uint256"}],"outputs":[{"name":"success","type":"bool"}],"stateMutability":"nonpayable"},
    {"type":"function","name":"approveAndCall","inputs":[{"name":"_spender","type":"address"},{"name":"_value","type":"uint256"},{"name":"_extraData","type":"bytes"}],"outputs":[{"name":"success","type":"bool"}],"stateMutability":"nonpayable"},
    {"type":"function","name":"allowance","inputs":[{"name":"_owner","type":"address"},{"name":"_spender","type":"address"}],"outputs":[{"name":"remaining","type":"uint256"}],"stateMutability":"view"}
]"#;

/// A decoded token method call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCall {
    /// Function name (e.g. `"transfer"`).
    pub name: String,
    /// Full signature (e.g. `"transfer(address,uint256)"`).
    pub signature: String,
    /// `0x`-prefixed 4-byte selector.
    pub sighash: String,
    /// Decoded inputs: (param_name, display value).
    pub args: Vec<(String, String)>,
}

impl TokenCall {
    /// Value of a named argument.
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Decoder for token method call data.
pub struct TokenDataDecoder {
    abi: JsonAbi,
}

impl TokenDataDecoder {
    /// Create a decoder from a standard Ethereum ABI JSON string.
    pub fn from_abi_json(abi_json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            abi: serde_json::from_str(abi_json)?,
        })
    }

    /// Decode `0x`-prefixed call data. Any failure is logged and yields `None`.
    pub fn decode(&self, data: &str) -> Option<TokenCall> {
        let stripped = data
            .strip_prefix("0x")
            .or_else(|| data.strip_prefix("0X"))
            .unwrap_or(data);
        let bytes = match hex::decode(stripped) {
            Ok(b) => b,
            Err(e) => {
                debug!(error = %e, data, "Failed to parse transaction data.");
                return None;
            }
        };
        if bytes.len() < 4 {
            debug!(data, "Failed to parse transaction data: shorter than a selector.");
            return None;
        }

        let selector: [u8; 4] = [bytes[0], bytes[1], bytes[2], bytes[3]];
        let Some(func) = self.abi.functions().find(|f| f.selector().0 == selector) else {
            debug!(selector = %hex::encode(selector), "Failed to parse transaction data: unknown selector.");
            return None;
        };

        match decode_inputs(func, &bytes[4..]) {
            Ok(args) => Some(TokenCall {
                name: func.name.clone(),
                signature: func.signature(),
                sighash: format!("0x{}", hex::encode(selector)),
                args,
            }),
            Err(reason) => {
                debug!(function = %func.name, reason = %reason, "Failed to parse transaction data.");
                None
            }
        }
    }
}

impl Default for TokenDataDecoder {
    fn default() -> Self {
        Self::from_abi_json(HUMAN_STANDARD_TOKEN_ABI).expect("bundled token ABI is valid JSON")
    }
}

fn decode_inputs(func: &Function, input: &[u8]) -> Result<Vec<(String, String)>, String> {
    let mut names = Vec::with_capacity(func.inputs.len());
    let mut types = Vec::with_capacity(func.inputs.len());
    for (i, param) in func.inputs.iter().enumerate() {
        names.push(if param.name.is_empty() {
            format!("arg{i}")
        } else {
            param.name.clone()
        });
        types.push(param.resolve().map_err(|e| e.to_string())?);
    }
    if types.is_empty() {
        return Ok(vec![]);
    }

    let decoded = DynSolType::Tuple(types)
        .abi_decode_params(input)
        .map_err(|e| format!("function input decode: {e}"))?;
    let values = match decoded {
        DynSolValue::Tuple(vals) => vals,
        other => vec![other],
    };

    Ok(names
        .into_iter()
        .zip(values.iter().map(display_value))
        .collect())
}

fn display_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Address(a) => a.to_checksum(None),
        DynSolValue::Uint(v, _) => v.to_string(),
        DynSolValue::Int(v, _) => v.to_string(),
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Bytes(b) => format!("0x{}", hex::encode(b)),
        DynSolValue::FixedBytes(w, size) => format!("0x{}", hex::encode(&w[..*size])),
        other => format!("{other:?}"),
    }
}
