//! Interfaces of the collaborators the screen talks to.
//!
//! The wallet store, the scanners, the clipboard and the platform services
//! all live outside the engine. Front-ends implement these traits and hand
//! them to [`WalletsListScreen`](crate::WalletsListScreen) as `Arc<dyn _>`.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{Sats, Transaction, Wallet, WalletKind, scan::ActionSheet};

pub type ResultCollab<T> = Result<T, crate::EngineError>;

/// The wallet data store.
///
/// The store owns the wallet collection and mutates it in place when a
/// refresh completes. Implementations are expected to be idempotent per
/// wallet, since overlapping refresh requests are possible.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Wallets in carousel order.
    fn wallets(&self) -> Vec<Arc<Wallet>>;

    /// Total balance across every wallet.
    fn balance(&self) -> Sats;

    /// Latest transactions, newest first. `None` means across all wallets.
    fn transactions(&self, wallet: Option<Uuid>, limit: usize) -> Vec<Transaction>;

    /// Fetch balances and transactions.
    ///
    /// `focus` names the carousel index of the one wallet to refresh; `None`
    /// refreshes every wallet.
    async fn refresh_all_wallet_transactions(
        &self,
        focus: Option<usize>,
        show_update_status: bool,
    ) -> ResultCollab<()>;

    fn set_selected_wallet(&self, wallet: Option<Uuid>);

    /// Refreshing is administratively disabled (offline mode).
    fn is_electrum_disabled(&self) -> bool;
}

/// QR acquisition.
#[async_trait]
pub trait Scanner: Send + Sync {
    /// Hand off to the live camera scan flow. `launched_by` is the route that
    /// gets the result back.
    async fn scan_qr(&self, launched_by: &str, use_merged_scanner: bool) -> ResultCollab<Option<String>>;

    /// Let the user pick an image and decode the QR code found in it.
    async fn pick_image_and_read_qr(&self) -> ResultCollab<Option<String>>;

    /// Present the desktop sheet anchored to the scan button (photo library,
    /// file chooser) and decode the QR code of the chosen image.
    async fn read_qr_from_image_sheet(&self) -> ResultCollab<Option<String>>;
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn content(&self) -> ResultCollab<String>;
}

/// Shows an option sheet and reports the chosen index, `None` if dismissed.
#[async_trait]
pub trait ActionSheetPresenter: Send + Sync {
    async fn present(&self, sheet: &ActionSheet) -> Option<usize>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnalyticsEvent {
    GotNonzeroBalance,
    GotZeroBalance,
}

impl AnalyticsEvent {
    pub fn name(self) -> &'static str {
        match self {
            Self::GotNonzeroBalance => "GOT_NONZERO_BALANCE",
            Self::GotZeroBalance => "GOT_ZERO_BALANCE",
        }
    }
}

/// Fire-and-forget event sink. Failures are the sink's problem.
pub trait Analytics: Send + Sync {
    fn record(&self, event: AnalyticsEvent);
}

/// Analytics sink that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn record(&self, event: AnalyticsEvent) {
        tracing::info!(event = event.name(), "analytics");
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HapticFeedback {
    ImpactLight,
    NotificationError,
}

pub trait Haptics: Send + Sync {
    fn trigger(&self, feedback: HapticFeedback);
}

/// Where the user can be sent from the wallets list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Settings,
    WalletTransactions { wallet_id: Uuid, kind: WalletKind },
    AddWallet,
    ReorderWallets,
    SendDetails {
        address: String,
        amount: Option<Sats>,
        memo: Option<String>,
    },
    LightningInvoice { invoice: String },
}

pub trait Navigator: Send + Sync {
    fn go_to(&self, route: Route);
}

/// Turns a scanned or pasted payload into a route. Malformed payloads are
/// rejected here, never by the engine.
pub trait RouteResolver: Send + Sync {
    fn route_for(&self, payload: &str) -> Option<Route>;
}
