//! The module contains `Wallet` and `Transaction`, the read-only view of the
//! wallet store the screen works with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{BalanceUnit, Sats, staleness::FreshnessSnapshot};

/// Kind of wallet, as reported by the store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletKind {
    #[default]
    HdSegwitBech32,
    HdSegwitP2sh,
    HdLegacy,
    Legacy,
    MultisigHd,
    WatchOnly,
    Lightning,
}

impl WalletKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::HdSegwitBech32 => "HD SegWit (BIP84 Bech32 Native)",
            Self::HdSegwitP2sh => "HD SegWit (BIP49 P2SH)",
            Self::HdLegacy => "HD Legacy (BIP44 P2PKH)",
            Self::Legacy => "Legacy (P2PKH)",
            Self::MultisigHd => "Multisig Vault",
            Self::WatchOnly => "Watch-only",
            Self::Lightning => "Lightning",
        }
    }
}

/// A wallet.
///
/// Wallets are owned and mutated by the store. The screen only ever holds an
/// `Arc<Wallet>` for the duration of a render or refresh cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Stable identifier, unique within the wallet collection.
    pub id: Uuid,
    pub label: String,
    pub kind: WalletKind,
    pub balance: Sats,
    pub preferred_unit: BalanceUnit,
    /// Last time the store fetched this wallet's balance. `None` when never.
    pub last_balance_check: Option<DateTime<Utc>>,
    /// Last time the store fetched this wallet's transactions. `None` when never.
    pub last_transaction_check: Option<DateTime<Utc>>,
    /// Whether any known transaction is still waiting for enough confirmations.
    pub has_unconfirmed: bool,
}

impl Wallet {
    pub fn new(label: impl Into<String>, kind: WalletKind) -> Self {
        Self::with_id(Uuid::new_v4(), label, kind)
    }

    pub fn with_id(id: Uuid, label: impl Into<String>, kind: WalletKind) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            balance: Sats::ZERO,
            preferred_unit: BalanceUnit::default(),
            last_balance_check: None,
            last_transaction_check: None,
            has_unconfirmed: false,
        }
    }

    /// Immutable copy of the fields the staleness policy looks at.
    pub fn freshness(&self) -> FreshnessSnapshot {
        FreshnessSnapshot {
            last_balance_check: self.last_balance_check,
            last_transaction_check: self.last_transaction_check,
            has_unconfirmed: self.has_unconfirmed,
        }
    }

    /// Record a completed balance and transaction fetch.
    pub fn mark_checked(&mut self, at: DateTime<Utc>) {
        self.last_balance_check = Some(at);
        self.last_transaction_check = Some(at);
    }
}

/// A transaction in the feed under the carousel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub txid: String,
    pub wallet_id: Uuid,
    pub amount: Sats,
    pub memo: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub confirmations: u32,
    /// Unit of the wallet the transaction belongs to.
    pub preferred_unit: BalanceUnit,
}
