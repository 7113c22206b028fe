//! Method signature grammar.
//!
//! A text signature such as `transferFrom(address,address,uint256)` is turned
//! into a display name (`"Transfer From"`) and an ordered list of parameter
//! types. Names are split before every uppercase letter, so acronyms come out
//! as runs of single letters (`setURI` → `Set U R I`); [`recombine_name`]
//! glues those runs back together.

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// A single parameter type of a method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamDescriptor {
    /// Solidity type string, forwarded verbatim (e.g. `"address"`, `"(uint256,bool)[]"`).
    #[serde(rename = "type")]
    pub ty: String,
}

impl ParamDescriptor {
    pub fn new(ty: impl Into<String>) -> Self {
        Self { ty: ty.into() }
    }
}

/// Raw output of the signature grammar, before name recombination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSignature {
    pub name: String,
    pub args: Vec<ParamDescriptor>,
}

/// Human-readable method name and parameter list for a selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<ParamDescriptor>,
}

impl MethodSignature {
    /// Build from parser output, recombining split acronyms in the name.
    pub fn from_parsed(parsed: ParsedSignature) -> Self {
        Self {
            name: recombine_name(&parsed.name),
            params: parsed.args,
        }
    }
}

/// Parse a text signature into a display name and parameter types.
pub fn parse_signature(signature: &str) -> Result<ParsedSignature, RegistryError> {
    let malformed = |reason: &str| RegistryError::MalformedSignature {
        signature: signature.to_string(),
        reason: reason.to_string(),
    };

    let signature = signature.trim();
    let open = signature.find('(').ok_or_else(|| malformed("missing '('"))?;
    if !signature.ends_with(')') {
        return Err(malformed("missing closing ')'"));
    }

    let raw_name = &signature[..open];
    if raw_name.is_empty() {
        return Err(malformed("empty method name"));
    }

    let inner = &signature[open + 1..signature.len() - 1];
    let args = split_top_level(inner)
        .ok_or_else(|| malformed("unbalanced parentheses"))?
        .into_iter()
        .map(ParamDescriptor::new)
        .collect();

    Ok(ParsedSignature {
        name: display_name(raw_name),
        args,
    })
}

/// `transferFrom` → `Transfer From`.
fn display_name(raw: &str) -> String {
    let mut chars = raw.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out: String = first.to_uppercase().collect();
    let mut segment_empty = true;
    for c in chars {
        if c.is_ascii_uppercase() && !segment_empty {
            out.push(' ');
        }
        out.push(c);
        segment_empty = false;
    }
    out
}

/// Split on commas that are not nested inside a tuple type.
fn split_top_level(inner: &str) -> Option<Vec<String>> {
    if inner.trim().is_empty() {
        return Some(vec![]);
    }

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(inner[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(inner[start..].trim().to_string());
    Some(parts)
}

/// Rejoin acronyms that the grammar split into single uppercase letters.
///
/// While the last accumulated token is all uppercase letters, a following
/// single uppercase letter is appended to it. `"A B Foo"` → `"AB Foo"`.
pub fn recombine_name(name: &str) -> String {
    let mut tokens: Vec<String> = Vec::new();
    for cur in name.split(' ') {
        if let Some(last) = tokens.last_mut() {
            if is_all_upper(last) && is_single_upper(cur) {
                last.push_str(cur);
                continue;
            }
        }
        tokens.push(cur.to_string());
    }
    tokens.join(" ")
}

fn is_all_upper(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_uppercase())
}

fn is_single_upper(s: &str) -> bool {
    let mut chars = s.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase())
}
