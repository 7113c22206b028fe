//! Core transaction model as stored by the wallet.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnrecognizedCategory;

// ─── Status / type ────────────────────────────────────────────────────────────

/// Locally stored lifecycle status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Unapproved,
    Approved,
    Rejected,
    Signed,
    Submitted,
    Failed,
    Dropped,
    Confirmed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unapproved => "unapproved",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Signed => "signed",
            Self::Submitted => "submitted",
            Self::Failed => "failed",
            Self::Dropped => "dropped",
            Self::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a transaction relates to earlier transactions with the same nonce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Standard,
    /// Replacement that cancels a pending transaction.
    Cancel,
    /// Replacement that speeds up a pending transaction.
    Retry,
}

/// On-chain-aware status of a transaction.
///
/// Every leaf [`TransactionStatus`] plus the group-level `Cancelled`, which
/// only exists once a cancel replacement has been confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKey {
    Unapproved,
    Approved,
    Rejected,
    Signed,
    Submitted,
    Failed,
    Dropped,
    Confirmed,
    Cancelled,
}

impl From<TransactionStatus> for StatusKey {
    fn from(status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Unapproved => Self::Unapproved,
            TransactionStatus::Approved => Self::Approved,
            TransactionStatus::Rejected => Self::Rejected,
            TransactionStatus::Signed => Self::Signed,
            TransactionStatus::Submitted => Self::Submitted,
            TransactionStatus::Failed => Self::Failed,
            TransactionStatus::Dropped => Self::Dropped,
            TransactionStatus::Confirmed => Self::Confirmed,
        }
    }
}

impl fmt::Display for StatusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Cancelled => "cancelled",
            Self::Unapproved => "unapproved",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Signed => "signed",
            Self::Submitted => "submitted",
            Self::Failed => "failed",
            Self::Dropped => "dropped",
            Self::Confirmed => "confirmed",
        };
        f.write_str(s)
    }
}

// ─── Category ─────────────────────────────────────────────────────────────────

/// Classification of a transaction's intent.
///
/// Wire values match the strings the wallet stores in `transactionCategory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionCategory {
    #[serde(rename = "transfer")]
    TokenMethodTransfer,
    #[serde(rename = "transferfrom")]
    TokenMethodTransferFrom,
    #[serde(rename = "approve")]
    TokenMethodApprove,
    #[serde(rename = "sentEther")]
    SentEther,
    #[serde(rename = "contractInteraction")]
    ContractInteraction,
    #[serde(rename = "contractDeployment")]
    DeployContract,
    #[serde(rename = "swap")]
    Swap,
    #[serde(rename = "swapApproval")]
    SwapApproval,
}

impl TransactionCategory {
    pub const ALL: [TransactionCategory; 8] = [
        Self::TokenMethodTransfer,
        Self::TokenMethodTransferFrom,
        Self::TokenMethodApprove,
        Self::SentEther,
        Self::ContractInteraction,
        Self::DeployContract,
        Self::Swap,
        Self::SwapApproval,
    ];

    /// The stored wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TokenMethodTransfer => "transfer",
            Self::TokenMethodTransferFrom => "transferfrom",
            Self::TokenMethodApprove => "approve",
            Self::SentEther => "sentEther",
            Self::ContractInteraction => "contractInteraction",
            Self::DeployContract => "contractDeployment",
            Self::Swap => "swap",
            Self::SwapApproval => "swapApproval",
        }
    }

    /// The translation key used for the category's display title.
    pub fn title_key(&self) -> &'static str {
        match self {
            Self::TokenMethodTransfer => "transfer",
            Self::TokenMethodTransferFrom => "transferFrom",
            Self::TokenMethodApprove => "approve",
            Self::SentEther => "sentEther",
            Self::ContractInteraction => "contractInteraction",
            Self::DeployContract => "contractDeployment",
            Self::Swap => "swap",
            Self::SwapApproval => "swapApproval",
        }
    }

    /// Translated display title.
    pub fn title<T>(&self, t: T) -> String
    where
        T: Fn(&str) -> String,
    {
        t(self.title_key())
    }

    /// `true` for ERC-20 token method calls (transfer, approve, transferFrom).
    pub fn is_token_method(&self) -> bool {
        matches!(
            self,
            Self::TokenMethodTransfer | Self::TokenMethodApprove | Self::TokenMethodTransferFrom
        )
    }
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionCategory {
    type Err = UnrecognizedCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnrecognizedCategory(s.to_string()))
    }
}

// ─── Transaction record ───────────────────────────────────────────────────────

/// Receipt fields the classifier cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// `"0x1"` on success, `"0x0"` when execution failed on-chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl TxReceipt {
    pub fn is_failure(&self) -> bool {
        self.status.as_deref() == Some("0x0")
    }
}

/// Transaction parameters as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// A wallet transaction record. Consumed read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub status: TransactionStatus,
    #[serde(rename = "type", default)]
    pub tx_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_receipt: Option<TxReceipt>,
    /// Milliseconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_time: Option<u64>,
    #[serde(default)]
    pub tx_params: TxParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl TransactionRecord {
    /// Minimal record with the given status, used mostly by tests and the CLI.
    pub fn new(status: TransactionStatus) -> Self {
        Self {
            status,
            tx_type: TransactionType::Standard,
            tx_receipt: None,
            submitted_time: None,
            tx_params: TxParams::default(),
            hash: None,
        }
    }

    pub fn nonce(&self) -> Option<&str> {
        self.tx_params.nonce.as_deref()
    }
}

/// Per-network RPC preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcPrefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_explorer_url: Option<String>,
}
