//! The wallets list screen coordinator.
//!
//! One `WalletsListScreen` lives for as long as the screen is mounted. It owns
//! the carousel focus and the loading flag; the wallet collection stays with
//! the store.

use std::sync::Arc;

use chrono::Utc;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    CarouselPositionTracker, Platform, RefreshCoordinator, ScanActionDispatcher, StalenessPolicy,
    carousel::{CarouselScroll, Transition},
    collab::{
        ActionSheetPresenter, Analytics, AnalyticsEvent, Clipboard, HapticFeedback, Haptics,
        Navigator, Route, RouteResolver, Scanner, WalletStore,
    },
    render::{LayoutEnv, ListRenderModel},
    scan::ScanGesture,
};

/// Name the scanner reports results back to.
pub const ROUTE_NAME: &str = "WalletsList";

/// Number of transactions in the feed under the carousel.
pub const FEED_LIMIT: usize = 10;

/// Everything the screen talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub store: Arc<dyn WalletStore>,
    pub scanner: Arc<dyn Scanner>,
    pub clipboard: Arc<dyn Clipboard>,
    pub sheets: Arc<dyn ActionSheetPresenter>,
    pub analytics: Arc<dyn Analytics>,
    pub navigator: Arc<dyn Navigator>,
    pub haptics: Arc<dyn Haptics>,
    pub resolver: Arc<dyn RouteResolver>,
}

/// Result of a scroll-settle event.
#[derive(Debug)]
pub struct Settled {
    pub transition: Transition,
    /// The background refresh of the newly focused wallet, if it was stale.
    pub refresh: Option<JoinHandle<()>>,
}

/// The scan gesture plus what happens to its result.
struct ScanFlow {
    dispatcher: ScanActionDispatcher,
    resolver: Arc<dyn RouteResolver>,
    navigator: Arc<dyn Navigator>,
    haptics: Arc<dyn Haptics>,
}

impl ScanFlow {
    async fn run(&self, gesture: ScanGesture) {
        let value = self.dispatcher.dispatch(gesture).await;
        self.on_result(value);
    }

    fn on_result(&self, value: Option<String>) {
        let Some(value) = value.filter(|value| !value.is_empty()) else {
            return;
        };
        match self.resolver.route_for(&value) {
            Some(route) => {
                self.haptics.trigger(HapticFeedback::ImpactLight);
                self.navigator.go_to(route);
            }
            None => tracing::debug!("scanned payload has no route"),
        }
    }
}

pub struct WalletsListScreen {
    store: Arc<dyn WalletStore>,
    analytics: Arc<dyn Analytics>,
    navigator: Arc<dyn Navigator>,
    haptics: Arc<dyn Haptics>,
    refresh: RefreshCoordinator,
    carousel: CarouselPositionTracker,
    scan: Arc<ScanFlow>,
    platform: Platform,
}

impl WalletsListScreen {
    pub fn new(collab: Collaborators, platform: Platform, policy: StalenessPolicy) -> Self {
        let wallet_count = collab.store.wallets().len();
        let dispatcher = ScanActionDispatcher::new(
            platform,
            ROUTE_NAME,
            collab.scanner,
            collab.clipboard,
            collab.sheets,
        );
        Self {
            refresh: RefreshCoordinator::new(collab.store.clone()),
            carousel: CarouselPositionTracker::new(wallet_count, policy),
            scan: Arc::new(ScanFlow {
                dispatcher,
                resolver: collab.resolver,
                navigator: collab.navigator.clone(),
                haptics: collab.haptics.clone(),
            }),
            store: collab.store,
            analytics: collab.analytics,
            navigator: collab.navigator,
            haptics: collab.haptics,
            platform,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn loading(&self) -> bool {
        self.refresh.loading()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.refresh.subscribe()
    }

    pub fn focus_index(&self) -> usize {
        self.carousel.index()
    }

    /// Screen mounted: clear the flag and refresh every wallet quietly.
    pub fn mount(&mut self) -> Option<JoinHandle<()>> {
        self.refresh.reset();
        self.refresh.spawn_refresh_all(false, true)
    }

    /// Screen gained focus.
    pub fn focus(&mut self) {
        let event = if self.store.balance().is_zero() {
            AnalyticsEvent::GotZeroBalance
        } else {
            AnalyticsEvent::GotNonzeroBalance
        };
        self.analytics.record(event);
        self.store.set_selected_wallet(None);
        self.carousel.set_focused(true);
    }

    /// Screen lost focus. Work already in flight keeps running.
    pub fn blur(&mut self) {
        self.carousel.set_focused(false);
    }

    pub fn scroll_settled(&mut self, offset_x: f64, viewport_width: f64) -> Settled {
        let wallets = self.store.wallets();
        let transition = self
            .carousel
            .on_scroll_settle(offset_x, viewport_width, &wallets, Utc::now());
        let refresh = match transition {
            Transition::Moved {
                index,
                refresh: true,
            } => Some(self.refresh.spawn_refresh_one(index)),
            _ => None,
        };
        Settled {
            transition,
            refresh,
        }
    }

    pub fn pull_to_refresh(&self) -> Option<JoinHandle<()>> {
        self.refresh.spawn_refresh_all(true, false)
    }

    /// Desktop refresh button; it is disabled while loading.
    pub fn refresh_pressed(&self) -> Option<JoinHandle<()>> {
        if self.refresh.loading() {
            return None;
        }
        self.refresh.spawn_refresh_all(true, false)
    }

    pub fn wallet_clicked(&self, index: usize) {
        let wallets = self.store.wallets();
        let route = match wallets.get(index) {
            Some(wallet) => Route::WalletTransactions {
                wallet_id: wallet.id,
                kind: wallet.kind,
            },
            None => Route::AddWallet,
        };
        self.navigator.go_to(route);
    }

    pub fn wallet_long_pressed(&self) {
        if self.store.wallets().len() > 1 {
            self.navigator.go_to(Route::ReorderWallets);
        } else {
            self.haptics.trigger(HapticFeedback::NotificationError);
        }
    }

    pub fn add_wallet_pressed(&self) {
        self.navigator.go_to(Route::AddWallet);
    }

    pub fn settings_pressed(&self) {
        self.navigator.go_to(Route::Settings);
    }

    /// Run the scan button's gesture in the background.
    pub fn scan(&self, gesture: ScanGesture) -> JoinHandle<()> {
        let flow = self.scan.clone();
        tokio::spawn(async move { flow.run(gesture).await })
    }

    /// Forward a scanned or pasted payload to navigation.
    pub fn on_result(&self, value: Option<String>) {
        self.scan.on_result(value);
    }

    /// Call after every render that may follow a store update.
    pub fn wallets_changed(&mut self) -> Option<CarouselScroll> {
        self.carousel.on_wallets_changed(self.store.wallets().len())
    }

    pub fn render_model(&self, env: &LayoutEnv) -> ListRenderModel {
        ListRenderModel::build(
            &self.store.wallets(),
            self.store.transactions(None, FEED_LIMIT),
            self.refresh.loading(),
            self.store.is_electrum_disabled(),
            env,
        )
    }
}
