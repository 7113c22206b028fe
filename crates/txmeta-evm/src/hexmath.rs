//! Arithmetic on hex-encoded quantities.

use alloy_primitives::U256;
use txmeta_core::error::HexError;

/// Parse a `0x`-prefixed (or bare) hex quantity. `"0x"` is zero.
pub fn parse_hex_quantity(value: &str) -> Result<U256, HexError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16).map_err(|e| HexError::Invalid {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Sum hex quantities, returning a `0x`-prefixed lower-case total.
pub fn sum_hexes<S: AsRef<str>>(values: &[S]) -> Result<String, HexError> {
    if values.is_empty() {
        return Err(HexError::Empty);
    }
    let mut total = U256::ZERO;
    for v in values {
        total = total
            .checked_add(parse_hex_quantity(v.as_ref())?)
            .ok_or(HexError::Overflow)?;
    }
    Ok(format!("0x{total:x}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_gas_costs() {
        assert_eq!(sum_hexes(&["0x5208", "0x5208"]).unwrap(), "0xa410");
        assert_eq!(sum_hexes(&["0x1", "2", "0X3"]).unwrap(), "0x6");
    }

    #[test]
    fn single_value_is_normalized() {
        assert_eq!(sum_hexes(&["0x00ff"]).unwrap(), "0xff");
        assert_eq!(sum_hexes(&["0x"]).unwrap(), "0x0");
    }

    #[test]
    fn empty_input_is_an_error() {
        let none: [&str; 0] = [];
        assert_eq!(sum_hexes(&none), Err(HexError::Empty));
    }

    #[test]
    fn invalid_hex_is_an_error() {
        assert!(matches!(sum_hexes(&["0x1", "0xzz"]), Err(HexError::Invalid { .. })));
    }

    #[test]
    fn overflow_is_an_error() {
        let max = format!("0x{}", "f".repeat(64));
        assert_eq!(sum_hexes(&[max.as_str(), "0x1"]), Err(HexError::Overflow));
    }
}
