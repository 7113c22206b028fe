//! Status and category classification of wallet transactions.
//!
//! All functions here are pure and total. The only error is
//! [`UnrecognizedCategory`] from [`category_title`].

use crate::error::UnrecognizedCategory;
use crate::types::{StatusKey, TransactionCategory, TransactionRecord, TransactionStatus, TransactionType};

/// Derive the on-chain-aware status key of a transaction.
///
/// Precedence:
/// 1. receipt status `0x0` → `Failed`, whatever the stored status says
/// 2. confirmed cancel replacement → `Cancelled`
/// 3. the stored status
pub fn status_key_of(tx: &TransactionRecord) -> StatusKey {
    if tx.tx_receipt.as_ref().is_some_and(|r| r.is_failure()) {
        return StatusKey::Failed;
    }

    if tx.status == TransactionStatus::Confirmed && tx.tx_type == TransactionType::Cancel {
        return StatusKey::Cancelled;
    }

    tx.status.into()
}

/// Translated title for a raw category value.
///
/// Fails with [`UnrecognizedCategory`] for anything outside the known set.
pub fn category_title<T>(t: T, category: &str) -> Result<String, UnrecognizedCategory>
where
    T: Fn(&str) -> String,
{
    let category: TransactionCategory = category.parse()?;
    Ok(category.title(t))
}

/// Whether the category is an ERC-20 token method call.
pub fn is_token_method_category(category: TransactionCategory) -> bool {
    category.is_token_method()
}

/// Latest submitted transaction carrying `nonce`.
///
/// Returns `None` when no transaction has that nonce. A matched transaction
/// without a (non-zero) `submitted_time` is superseded by any later match.
pub fn latest_submitted_with_nonce<'a>(
    transactions: &'a [TransactionRecord],
    nonce: &str,
) -> Option<&'a TransactionRecord> {
    transactions
        .iter()
        .filter(|tx| tx.nonce() == Some(nonce))
        .fold(None, |acc: Option<&TransactionRecord>, current| {
            let Some(best) = acc else {
                return Some(current);
            };
            match (best.submitted_time, current.submitted_time) {
                (None | Some(0), _) => Some(current),
                (Some(best_time), Some(time)) if time > best_time => Some(current),
                _ => Some(best),
            }
        })
}

/// First four bytes of call data as a `0x`-prefixed, 10-character string.
///
/// Shorter input is returned whole (after prefixing).
pub fn four_byte_prefix_of(data: &str) -> String {
    add_hex_prefix(data).chars().take(10).collect()
}

/// Ensure a lower-case `0x` prefix.
pub fn add_hex_prefix(s: &str) -> String {
    if s.starts_with("0x") {
        s.to_string()
    } else if let Some(rest) = s.strip_prefix("0X") {
        format!("0x{rest}")
    } else {
        format!("0x{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TxParams, TxReceipt};

    fn tx(status: TransactionStatus, tx_type: TransactionType, receipt: Option<&str>) -> TransactionRecord {
        TransactionRecord {
            tx_type,
            tx_receipt: receipt.map(|s| TxReceipt { status: Some(s.to_string()) }),
            ..TransactionRecord::new(status)
        }
    }

    fn with_nonce(time: Option<u64>, nonce: &str) -> TransactionRecord {
        TransactionRecord {
            submitted_time: time,
            tx_params: TxParams {
                nonce: Some(nonce.to_string()),
                ..TxParams::default()
            },
            ..TransactionRecord::new(TransactionStatus::Submitted)
        }
    }

    // ─── status_key_of ─────────────────────────────────────────────────────────

    #[test]
    fn failed_receipt_dominates_everything() {
        for status in [
            TransactionStatus::Confirmed,
            TransactionStatus::Submitted,
            TransactionStatus::Dropped,
        ] {
            for ty in [TransactionType::Standard, TransactionType::Cancel, TransactionType::Retry] {
                assert_eq!(status_key_of(&tx(status, ty, Some("0x0"))), StatusKey::Failed);
            }
        }
    }

    #[test]
    fn confirmed_cancel_is_cancelled() {
        let t = tx(TransactionStatus::Confirmed, TransactionType::Cancel, Some("0x1"));
        assert_eq!(status_key_of(&t), StatusKey::Cancelled);

        let no_receipt = tx(TransactionStatus::Confirmed, TransactionType::Cancel, None);
        assert_eq!(status_key_of(&no_receipt), StatusKey::Cancelled);
    }

    #[test]
    fn otherwise_stored_status() {
        let t = tx(TransactionStatus::Submitted, TransactionType::Cancel, None);
        assert_eq!(status_key_of(&t), StatusKey::Submitted);
        let t = tx(TransactionStatus::Confirmed, TransactionType::Retry, Some("0x1"));
        assert_eq!(status_key_of(&t), StatusKey::Confirmed);
    }

    // ─── category_title ────────────────────────────────────────────────────────

    #[test]
    fn title_passes_translation_key() {
        let t = |key: &str| format!("[{key}]");
        assert_eq!(category_title(t, "transfer").unwrap(), "[transfer]");
        assert_eq!(category_title(t, "transferfrom").unwrap(), "[transferFrom]");
        assert_eq!(category_title(t, "approve").unwrap(), "[approve]");
        assert_eq!(category_title(t, "sentEther").unwrap(), "[sentEther]");
        assert_eq!(category_title(t, "contractInteraction").unwrap(), "[contractInteraction]");
        assert_eq!(category_title(t, "contractDeployment").unwrap(), "[contractDeployment]");
        assert_eq!(category_title(t, "swap").unwrap(), "[swap]");
        assert_eq!(category_title(t, "swapApproval").unwrap(), "[swapApproval]");
    }

    #[test]
    fn title_total_over_known_categories() {
        for c in TransactionCategory::ALL {
            assert!(category_title(|k| k.to_string(), c.as_str()).is_ok(), "{c}");
        }
    }

    #[test]
    fn unknown_category_is_an_error() {
        let err = category_title(|k| k.to_string(), "unknown_xyz").unwrap_err();
        assert_eq!(err, UnrecognizedCategory("unknown_xyz".into()));
        assert_eq!(err.to_string(), "Unrecognized transaction category: unknown_xyz");
    }

    #[test]
    fn token_method_categories() {
        let token: Vec<_> = TransactionCategory::ALL
            .into_iter()
            .filter(|c| is_token_method_category(*c))
            .collect();
        assert_eq!(
            token,
            vec![
                TransactionCategory::TokenMethodTransfer,
                TransactionCategory::TokenMethodTransferFrom,
                TransactionCategory::TokenMethodApprove,
            ]
        );
    }

    // ─── latest_submitted_with_nonce ───────────────────────────────────────────

    #[test]
    fn empty_list_has_no_latest() {
        assert!(latest_submitted_with_nonce(&[], "0x5").is_none());
    }

    #[test]
    fn latest_among_matching_nonce() {
        let txs = vec![
            with_nonce(Some(1), "0x5"),
            with_nonce(Some(2), "0x5"),
            with_nonce(Some(3), "0x6"),
        ];
        let latest = latest_submitted_with_nonce(&txs, "0x5").unwrap();
        assert_eq!(latest.submitted_time, Some(2));
    }

    #[test]
    fn no_matching_nonce() {
        let txs = vec![with_nonce(Some(3), "0x6")];
        assert!(latest_submitted_with_nonce(&txs, "0x5").is_none());
    }

    #[test]
    fn untimed_match_is_superseded() {
        let txs = vec![with_nonce(None, "0x1"), with_nonce(Some(7), "0x1")];
        assert_eq!(latest_submitted_with_nonce(&txs, "0x1").unwrap().submitted_time, Some(7));

        let only_untimed = vec![with_nonce(None, "0x1")];
        assert!(latest_submitted_with_nonce(&only_untimed, "0x1").is_some());
    }

    #[test]
    fn ties_keep_first() {
        let mut a = with_nonce(Some(4), "0x2");
        a.hash = Some("0xa".into());
        let mut b = with_nonce(Some(4), "0x2");
        b.hash = Some("0xb".into());
        let txs = vec![a, b];
        assert_eq!(
            latest_submitted_with_nonce(&txs, "0x2").unwrap().hash.as_deref(),
            Some("0xa")
        );
    }

    // ─── four_byte_prefix_of ───────────────────────────────────────────────────

    #[test]
    fn prefix_of_call_data() {
        assert_eq!(
            four_byte_prefix_of("0xa9059cbb000000000000000000000000d8da6bf2"),
            "0xa9059cbb"
        );
        assert_eq!(four_byte_prefix_of("a9059cbb0000"), "0xa9059cbb");
        assert_eq!(four_byte_prefix_of("0Xa9059cbb0000"), "0xa9059cbb");
        assert_eq!(four_byte_prefix_of(""), "0x");
        assert_eq!(four_byte_prefix_of("0x1234"), "0x1234");
    }
}
