use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display unit of a balance on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceUnit {
    #[default]
    Btc,
    Sats,
}

pub mod wallet {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
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

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct WalletView {
        pub id: Uuid,
        pub label: String,
        #[serde(default)]
        pub kind: WalletKind,
        /// Balance in integer satoshis.
        pub balance_sats: i64,
        #[serde(default)]
        pub preferred_unit: BalanceUnit,
        /// RFC3339 timestamp. Absent when the balance was never fetched.
        #[serde(default)]
        pub last_balance_check: Option<DateTime<Utc>>,
        /// RFC3339 timestamp. Absent when the transactions were never fetched.
        #[serde(default)]
        pub last_transaction_check: Option<DateTime<Utc>>,
        #[serde(default)]
        pub has_unconfirmed: bool,
    }

    /// Response of `GET /wallets`, also the layout of the local wallets file.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct WalletList {
        /// Wallets in carousel order.
        pub wallets: Vec<WalletView>,
        /// Set when the node connection is switched off (offline mode).
        #[serde(default)]
        pub electrum_disabled: bool,
        #[serde(default)]
        pub transactions: Vec<super::transaction::TransactionView>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransactionView {
        pub txid: String,
        pub wallet_id: Uuid,
        /// Signed amount in satoshis: negative for outgoing.
        pub amount_sats: i64,
        pub memo: Option<String>,
        /// RFC3339 timestamp.
        pub timestamp: DateTime<Utc>,
        #[serde(default)]
        pub confirmations: u32,
    }

    /// Response of `GET /transactions`.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TransactionList {
        /// Newest first.
        pub transactions: Vec<TransactionView>,
    }
}

pub mod refresh {
    use super::*;

    /// Request body of `POST /wallets/refresh`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct RefreshRequest {
        /// Carousel index of the one wallet to refresh; absent refreshes all.
        pub wallet_index: Option<usize>,
        pub show_update_status: bool,
    }
}
