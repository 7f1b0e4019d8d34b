//! Single-wallet and bulk refresh, and the loading flag shown by the view.

use std::sync::Arc;

use tokio::{sync::watch, task::JoinHandle};

use crate::collab::WalletStore;

/// Loading flag of one screen.
///
/// Backed by a `watch` channel: the view subscribes and always sees the value
/// written last, whichever refresh path wrote it.
#[derive(Clone, Debug)]
pub struct LoadingState {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for LoadingState {
    fn default() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }
}

impl LoadingState {
    pub fn get(&self) -> bool {
        *self.tx.borrow()
    }

    /// Subscribers are only notified when the value actually changes.
    pub fn set(&self, loading: bool) {
        self.tx.send_if_modified(|current| {
            let changed = *current != loading;
            *current = loading;
            changed
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Returns a guard that clears the flag when dropped, on every exit path.
    fn clear_on_drop(&self) -> SettleGuard {
        SettleGuard {
            state: self.clone(),
        }
    }
}

struct SettleGuard {
    state: LoadingState,
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        self.state.set(false);
    }
}

/// Issues refresh requests to the store on behalf of the screen.
///
/// Failures are logged and swallowed: the store surfaces its own errors, the
/// coordinator only guarantees the loading flag never stays set.
#[derive(Clone)]
pub struct RefreshCoordinator {
    store: Arc<dyn WalletStore>,
    loading: LoadingState,
}

impl RefreshCoordinator {
    pub fn new(store: Arc<dyn WalletStore>) -> Self {
        Self {
            store,
            loading: LoadingState::default(),
        }
    }

    pub fn loading(&self) -> bool {
        self.loading.get()
    }

    pub fn loading_state(&self) -> &LoadingState {
        &self.loading
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Clear the flag, called when the screen mounts.
    pub fn reset(&self) {
        self.loading.set(false);
    }

    /// Forcefully fetch transactions and balance for every wallet.
    pub async fn refresh_all(&self, show_loading_indicator: bool, show_update_status_indicator: bool) {
        if !self.begin_refresh_all(show_loading_indicator) {
            return;
        }
        self.run_refresh_all(show_update_status_indicator).await;
    }

    /// Fire-and-forget variant of [`refresh_all`](Self::refresh_all).
    ///
    /// The disabled check and the flag update happen before this returns;
    /// only the store request runs in the background. Returns `None` when
    /// refreshing is disabled.
    pub fn spawn_refresh_all(
        &self,
        show_loading_indicator: bool,
        show_update_status_indicator: bool,
    ) -> Option<JoinHandle<()>> {
        if !self.begin_refresh_all(show_loading_indicator) {
            return None;
        }
        let this = self.clone();
        Some(tokio::spawn(async move {
            this.run_refresh_all(show_update_status_indicator).await;
        }))
    }

    /// Refresh the wallet at carousel `index`.
    ///
    /// Callers only invoke this once the staleness policy said the wallet is
    /// due. The flag is not raised, but it is cleared on settle.
    pub async fn refresh_one(&self, index: usize) {
        let _settle = self.loading.clear_on_drop();
        tracing::info!(index, "refreshing wallet");
        if let Err(err) = self
            .store
            .refresh_all_wallet_transactions(Some(index), false)
            .await
        {
            tracing::debug!(index, "wallet refresh failed: {err}");
        }
    }

    pub fn spawn_refresh_one(&self, index: usize) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move { this.refresh_one(index).await })
    }

    fn begin_refresh_all(&self, show_loading_indicator: bool) -> bool {
        if self.store.is_electrum_disabled() {
            self.loading.set(false);
            return false;
        }
        self.loading.set(show_loading_indicator);
        true
    }

    async fn run_refresh_all(&self, show_update_status_indicator: bool) {
        let _settle = self.loading.clear_on_drop();
        tracing::info!("refreshing all wallets");
        if let Err(err) = self
            .store
            .refresh_all_wallet_transactions(None, show_update_status_indicator)
            .await
        {
            tracing::debug!("bulk refresh failed: {err}");
        }
    }
}
