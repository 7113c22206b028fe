//! Block explorer links for transactions.

use crate::types::RpcPrefs;

/// Explorer host for a well-known network id.
fn known_explorer(network_id: u64) -> Option<&'static str> {
    let host = match network_id {
        1 => "https://etherscan.io",
        2 => "https://morden.etherscan.io",
        3 => "https://ropsten.etherscan.io",
        4 => "https://rinkeby.etherscan.io",
        42 => "https://kovan.etherscan.io",
        5 => "https://goerli.etherscan.io",
        128 => "https://hecoinfo.com",
        56 => "https://bscscan.com",
        137 => "https://explorer-mainnet.maticvigil.com",
        _ => return None,
    };
    Some(host)
}

/// URL at which `hash` can be viewed.
///
/// A custom `block_explorer_url` wins over the built-in table. Networks with
/// no known explorer yield an empty string.
pub fn explorer_url_for(network_id: u64, hash: &str, rpc_prefs: &RpcPrefs) -> String {
    if let Some(custom) = rpc_prefs.block_explorer_url.as_deref().filter(|u| !u.is_empty()) {
        return format!("{}/tx/{hash}", custom.trim_end_matches('/'));
    }
    known_explorer(network_id)
        .map(|host| format!("{host}/tx/{hash}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(url: &str) -> RpcPrefs {
        RpcPrefs {
            block_explorer_url: Some(url.to_string()),
        }
    }

    #[test]
    fn mainnet() {
        assert_eq!(
            explorer_url_for(1, "0xabc", &RpcPrefs::default()),
            "https://etherscan.io/tx/0xabc"
        );
    }

    #[test]
    fn known_networks() {
        let p = RpcPrefs::default();
        assert_eq!(explorer_url_for(5, "0x1", &p), "https://goerli.etherscan.io/tx/0x1");
        assert_eq!(explorer_url_for(42, "0x1", &p), "https://kovan.etherscan.io/tx/0x1");
        assert_eq!(explorer_url_for(56, "0x1", &p), "https://bscscan.com/tx/0x1");
        assert_eq!(explorer_url_for(128, "0x1", &p), "https://hecoinfo.com/tx/0x1");
        assert_eq!(
            explorer_url_for(137, "0x1", &p),
            "https://explorer-mainnet.maticvigil.com/tx/0x1"
        );
    }

    #[test]
    fn unknown_network_is_empty() {
        assert_eq!(explorer_url_for(999, "0xabc", &RpcPrefs::default()), "");
    }

    #[test]
    fn custom_explorer_strips_trailing_slashes() {
        assert_eq!(
            explorer_url_for(1, "0xabc", &custom("https://x.io/")),
            "https://x.io/tx/0xabc"
        );
        assert_eq!(
            explorer_url_for(999, "0xabc", &custom("https://x.io///")),
            "https://x.io/tx/0xabc"
        );
    }

    #[test]
    fn empty_custom_explorer_is_ignored() {
        assert_eq!(explorer_url_for(1, "0xabc", &custom("")), "https://etherscan.io/tx/0xabc");
    }
}
