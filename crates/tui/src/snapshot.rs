//! In-memory copy of the wallet collection shared by both store backends,
//! and the conversions between wire views and engine types.

use std::sync::{Arc, PoisonError, RwLock};

use api_types::{
    BalanceUnit as WireUnit,
    transaction::TransactionView,
    wallet::{WalletKind as WireKind, WalletList, WalletView},
};
use deck_engine::{BalanceUnit, Sats, Transaction, Wallet, WalletKind};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub wallets: Vec<Arc<Wallet>>,
    /// Newest first.
    pub transactions: Vec<Transaction>,
    pub electrum_disabled: bool,
}

impl Snapshot {
    pub fn from_list(list: WalletList) -> Self {
        let mut snapshot = Self {
            wallets: list
                .wallets
                .into_iter()
                .map(|view| Arc::new(wallet_from_view(view)))
                .collect(),
            transactions: Vec::new(),
            electrum_disabled: list.electrum_disabled,
        };
        snapshot.replace_transactions(list.transactions);
        snapshot
    }

    pub fn to_list(&self) -> WalletList {
        WalletList {
            wallets: self.wallets.iter().map(|wallet| wallet_to_view(wallet)).collect(),
            electrum_disabled: self.electrum_disabled,
            transactions: self.transactions.iter().map(transaction_to_view).collect(),
        }
    }

    /// Swap in a new transaction list, tagging each entry with its wallet's unit.
    pub fn replace_transactions(&mut self, views: Vec<TransactionView>) {
        let mut transactions: Vec<Transaction> = views
            .into_iter()
            .map(|view| {
                let unit = self
                    .wallets
                    .iter()
                    .find(|wallet| wallet.id == view.wallet_id)
                    .map(|wallet| wallet.preferred_unit)
                    .unwrap_or_default();
                transaction_from_view(view, unit)
            })
            .collect();
        transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.transactions = transactions;
    }

    pub fn balance(&self) -> Sats {
        self.wallets
            .iter()
            .fold(Sats::ZERO, |total, wallet| total + wallet.balance)
    }

    pub fn transactions(&self, wallet: Option<Uuid>, limit: usize) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|tx| wallet.is_none_or(|id| tx.wallet_id == id))
            .take(limit)
            .cloned()
            .collect()
    }
}

/// A snapshot behind a lock, read synchronously by the screen.
#[derive(Debug, Default)]
pub struct SharedSnapshot {
    inner: RwLock<Snapshot>,
}

impl SharedSnapshot {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            inner: RwLock::new(snapshot),
        }
    }

    pub fn read<T>(&self, f: impl FnOnce(&Snapshot) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn replace(&self, snapshot: Snapshot) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = snapshot;
    }
}

fn unit_from_wire(unit: WireUnit) -> BalanceUnit {
    match unit {
        WireUnit::Btc => BalanceUnit::Btc,
        WireUnit::Sats => BalanceUnit::Sats,
    }
}

fn unit_to_wire(unit: BalanceUnit) -> WireUnit {
    match unit {
        BalanceUnit::Btc => WireUnit::Btc,
        BalanceUnit::Sats => WireUnit::Sats,
    }
}

fn kind_from_wire(kind: WireKind) -> WalletKind {
    match kind {
        WireKind::HdSegwitBech32 => WalletKind::HdSegwitBech32,
        WireKind::HdSegwitP2sh => WalletKind::HdSegwitP2sh,
        WireKind::HdLegacy => WalletKind::HdLegacy,
        WireKind::Legacy => WalletKind::Legacy,
        WireKind::MultisigHd => WalletKind::MultisigHd,
        WireKind::WatchOnly => WalletKind::WatchOnly,
        WireKind::Lightning => WalletKind::Lightning,
    }
}

fn kind_to_wire(kind: WalletKind) -> WireKind {
    match kind {
        WalletKind::HdSegwitBech32 => WireKind::HdSegwitBech32,
        WalletKind::HdSegwitP2sh => WireKind::HdSegwitP2sh,
        WalletKind::HdLegacy => WireKind::HdLegacy,
        WalletKind::Legacy => WireKind::Legacy,
        WalletKind::MultisigHd => WireKind::MultisigHd,
        WalletKind::WatchOnly => WireKind::WatchOnly,
        WalletKind::Lightning => WireKind::Lightning,
    }
}

pub fn wallet_from_view(view: WalletView) -> Wallet {
    let mut wallet = Wallet::with_id(view.id, view.label, kind_from_wire(view.kind));
    wallet.balance = Sats::new(view.balance_sats);
    wallet.preferred_unit = unit_from_wire(view.preferred_unit);
    wallet.last_balance_check = view.last_balance_check;
    wallet.last_transaction_check = view.last_transaction_check;
    wallet.has_unconfirmed = view.has_unconfirmed;
    wallet
}

pub fn wallet_to_view(wallet: &Wallet) -> WalletView {
    WalletView {
        id: wallet.id,
        label: wallet.label.clone(),
        kind: kind_to_wire(wallet.kind),
        balance_sats: wallet.balance.sats(),
        preferred_unit: unit_to_wire(wallet.preferred_unit),
        last_balance_check: wallet.last_balance_check,
        last_transaction_check: wallet.last_transaction_check,
        has_unconfirmed: wallet.has_unconfirmed,
    }
}

pub fn transaction_from_view(view: TransactionView, unit: BalanceUnit) -> Transaction {
    Transaction {
        txid: view.txid,
        wallet_id: view.wallet_id,
        amount: Sats::new(view.amount_sats),
        memo: view.memo,
        timestamp: view.timestamp,
        confirmations: view.confirmations,
        preferred_unit: unit,
    }
}

pub fn transaction_to_view(tx: &Transaction) -> TransactionView {
    TransactionView {
        txid: tx.txid.clone(),
        wallet_id: tx.wallet_id,
        amount_sats: tx.amount.sats(),
        memo: tx.memo.clone(),
        timestamp: tx.timestamp,
        confirmations: tx.confirmations,
    }
}
