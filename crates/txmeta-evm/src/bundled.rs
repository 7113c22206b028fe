//! Bundled method registry with well-known EVM signatures.

use tiny_keccak::{Hasher, Keccak};
use txmeta_core::registry::MemoryMethodRegistry;

/// 4-byte selector of a text signature: `keccak256(sig)[..4]`.
pub fn selector_of(signature: &str) -> [u8; 4] {
    let mut k = Keccak::v256();
    k.update(signature.as_bytes());
    let mut hash = [0u8; 32];
    k.finalize(&mut hash);
    [hash[0], hash[1], hash[2], hash[3]]
}

/// `0x`-prefixed hex form of [`selector_of`].
pub fn selector_hex(signature: &str) -> String {
    format!("0x{}", hex::encode(selector_of(signature)))
}

const BUNDLED: &[&str] = &[
    // ─── ERC-20 ───────────────────────────────────────────────────────────────
    "transfer(address,uint256)",
    "transferFrom(address,address,uint256)",
    "approve(address,uint256)",
    "increaseAllowance(address,uint256)",
    "decreaseAllowance(address,uint256)",
    "permit(address,address,uint256,uint256,uint8,bytes32,bytes32)",

    // ─── ERC-721 / ERC-1155 ───────────────────────────────────────────────────
    "safeTransferFrom(address,address,uint256)",
    "safeTransferFrom(address,address,uint256,bytes)",
    "setApprovalForAll(address,bool)",
    "safeTransferFrom(address,address,uint256,uint256,bytes)",
    "safeBatchTransferFrom(address,address,uint256[],uint256[],bytes)",
    "setURI(string)",
    "mint(address,uint256)",
    "burn(uint256)",

    // ─── WETH ─────────────────────────────────────────────────────────────────
    "deposit()",
    "withdraw(uint256)",

    // ─── Uniswap V2 router ────────────────────────────────────────────────────
    "swapExactETHForTokens(uint256,address[],address,uint256)",
    "swapETHForExactTokens(uint256,address[],address,uint256)",
    "swapExactTokensForETH(uint256,uint256,address[],address,uint256)",
    "swapTokensForExactETH(uint256,uint256,address[],address,uint256)",
    "swapExactTokensForTokens(uint256,uint256,address[],address,uint256)",
    "swapTokensForExactTokens(uint256,uint256,address[],address,uint256)",
    "addLiquidity(address,address,uint256,uint256,uint256,uint256,address,uint256)",
    "addLiquidityETH(address,uint256,uint256,uint256,address,uint256)",
    "removeLiquidity(address,address,uint256,uint256,uint256,address,uint256)",
    "removeLiquidityETH(address,uint256,uint256,uint256,address,uint256)",

    // ─── Uniswap V3 / multicall ───────────────────────────────────────────────
    "multicall(bytes[])",
    "multicall(uint256,bytes[])",
    "exactInputSingle((address,address,uint24,address,uint256,uint256,uint256,uint160))",
    "exactInput((bytes,address,uint256,uint256,uint256))",

    // ─── Ownable / misc ───────────────────────────────────────────────────────
    "transferOwnership(address)",
    "renounceOwnership()",
    "claim()",
];

/// A registry pre-loaded with common token, NFT and DEX router signatures.
pub fn bundled_registry() -> MemoryMethodRegistry {
    let reg = MemoryMethodRegistry::new("bundled");
    for sig in BUNDLED {
        reg.register(selector_of(sig), *sig);
    }
    reg
}

/// Register text signatures (e.g. from config) into `reg`, computing selectors.
pub fn register_signatures<'a>(
    reg: &MemoryMethodRegistry,
    signatures: impl IntoIterator<Item = &'a str>,
) -> usize {
    let mut count = 0;
    for sig in signatures {
        let sig = sig.trim();
        if sig.is_empty() {
            continue;
        }
        reg.register(selector_of(sig), sig);
        count += 1;
    }
    count
}

/// Load a JSON array of text signatures into `reg`.
/// Expected format: `["transfer(address,uint256)", ...]`
pub fn load_signatures_json(reg: &MemoryMethodRegistry, json: &str) -> Result<usize, serde_json::Error> {
    let sigs: Vec<String> = serde_json::from_str(json)?;
    Ok(register_signatures(reg, sigs.iter().map(String::as_str)))
}
