use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use deck_engine::{
    CarouselScroll, Collaborators, EngineError, Platform, Sats, ScanGesture, StalenessPolicy,
    Transaction, Transition, Wallet, WalletKind, WalletsListScreen,
    collab::{
        ActionSheetPresenter, Analytics, AnalyticsEvent, Clipboard, HapticFeedback, Haptics,
        Navigator, ResultCollab, Route, RouteResolver, Scanner, WalletStore,
    },
    render::LayoutEnv,
    scan::ActionSheet,
};

#[derive(Default)]
struct Store {
    wallets: Mutex<Vec<Arc<Wallet>>>,
    disabled: bool,
    fail: bool,
    refreshes: Mutex<Vec<(Option<usize>, bool)>>,
    selected: Mutex<Vec<Option<Uuid>>>,
}

impl Store {
    fn with_wallets(wallets: Vec<Wallet>) -> Self {
        Self {
            wallets: Mutex::new(wallets.into_iter().map(Arc::new).collect()),
            ..Self::default()
        }
    }

    fn refreshes(&self) -> Vec<(Option<usize>, bool)> {
        self.refreshes.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletStore for Store {
    fn wallets(&self) -> Vec<Arc<Wallet>> {
        self.wallets.lock().unwrap().clone()
    }

    fn balance(&self) -> Sats {
        self.wallets
            .lock()
            .unwrap()
            .iter()
            .fold(Sats::ZERO, |total, wallet| total + wallet.balance)
    }

    fn transactions(&self, _wallet: Option<Uuid>, _limit: usize) -> Vec<Transaction> {
        Vec::new()
    }

    async fn refresh_all_wallet_transactions(
        &self,
        focus: Option<usize>,
        show_update_status: bool,
    ) -> ResultCollab<()> {
        self.refreshes
            .lock()
            .unwrap()
            .push((focus, show_update_status));
        if self.fail {
            return Err(EngineError::Refresh("server went away".to_string()));
        }
        Ok(())
    }

    fn set_selected_wallet(&self, wallet: Option<Uuid>) {
        self.selected.lock().unwrap().push(wallet);
    }

    fn is_electrum_disabled(&self) -> bool {
        self.disabled
    }
}

/// Records every platform-side effect.
#[derive(Default)]
struct Platformish {
    clipboard: String,
    scanned: Option<String>,
    choice: Option<usize>,
    routes: Mutex<Vec<Route>>,
    haptics: Mutex<Vec<HapticFeedback>>,
    events: Mutex<Vec<AnalyticsEvent>>,
    sheets: Mutex<Vec<ActionSheet>>,
}

#[async_trait]
impl Scanner for Platformish {
    async fn scan_qr(&self, _launched_by: &str, _merged: bool) -> ResultCollab<Option<String>> {
        Ok(self.scanned.clone())
    }

    async fn pick_image_and_read_qr(&self) -> ResultCollab<Option<String>> {
        Err(EngineError::Scan("no QR code in image".to_string()))
    }

    async fn read_qr_from_image_sheet(&self) -> ResultCollab<Option<String>> {
        Ok(self.scanned.clone())
    }
}

#[async_trait]
impl Clipboard for Platformish {
    async fn content(&self) -> ResultCollab<String> {
        Ok(self.clipboard.clone())
    }
}

#[async_trait]
impl ActionSheetPresenter for Platformish {
    async fn present(&self, sheet: &ActionSheet) -> Option<usize> {
        self.sheets.lock().unwrap().push(sheet.clone());
        self.choice
    }
}

impl Analytics for Platformish {
    fn record(&self, event: AnalyticsEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Navigator for Platformish {
    fn go_to(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

impl Haptics for Platformish {
    fn trigger(&self, feedback: HapticFeedback) {
        self.haptics.lock().unwrap().push(feedback);
    }
}

impl RouteResolver for Platformish {
    fn route_for(&self, payload: &str) -> Option<Route> {
        payload
            .strip_prefix("bitcoin:")
            .map(|address| Route::SendDetails {
                address: address.to_string(),
                amount: None,
                memo: None,
            })
    }
}

fn fresh_wallet(label: &str) -> Wallet {
    let mut wallet = Wallet::new(label, WalletKind::HdSegwitBech32);
    wallet.mark_checked(Utc::now());
    wallet
}

fn build_screen(
    store: Store,
    platform: Platform,
    side: Platformish,
) -> (WalletsListScreen, Arc<Store>, Arc<Platformish>) {
    let store = Arc::new(store);
    let side = Arc::new(side);
    let collab = Collaborators {
        store: store.clone(),
        scanner: side.clone(),
        clipboard: side.clone(),
        sheets: side.clone(),
        analytics: side.clone(),
        navigator: side.clone(),
        haptics: side.clone(),
        resolver: side.clone(),
    };
    let screen = WalletsListScreen::new(collab, platform, StalenessPolicy::default());
    (screen, store, side)
}

#[tokio::test]
async fn scrolling_to_stale_wallet_refreshes_it_once() {
    let mut stale = fresh_wallet("Cold storage");
    stale.last_transaction_check = Some(Utc::now() - TimeDelta::minutes(6));
    let store = Store::with_wallets(vec![fresh_wallet("Daily"), fresh_wallet("Savings"), stale]);
    let (mut screen, store, _side) = build_screen(store, Platform::Ios, Platformish::default());

    let settled = screen.scroll_settled(2.0 * 390.0, 390.0);

    assert_eq!(
        settled.transition,
        Transition::Moved {
            index: 2,
            refresh: true
        }
    );
    settled.refresh.unwrap().await.unwrap();
    assert_eq!(screen.focus_index(), 2);
    assert_eq!(store.refreshes(), vec![(Some(2), false)]);
    assert!(!screen.loading());
}

#[tokio::test]
async fn scrolling_to_fresh_wallet_or_sentinel_does_not_refresh() {
    let store = Store::with_wallets(vec![fresh_wallet("Daily"), fresh_wallet("Savings")]);
    let (mut screen, store, _side) = build_screen(store, Platform::Android, Platformish::default());

    let to_fresh = screen.scroll_settled(390.0, 390.0);
    let to_sentinel = screen.scroll_settled(780.0, 390.0);

    assert!(to_fresh.refresh.is_none());
    assert_eq!(
        to_sentinel.transition,
        Transition::Moved {
            index: 2,
            refresh: false
        }
    );
    assert!(to_sentinel.refresh.is_none());
    assert!(store.refreshes().is_empty());
}

#[tokio::test]
async fn blurred_screen_ignores_scrolls() {
    let store = Store::with_wallets(vec![Wallet::new("Never synced", WalletKind::Legacy)]);
    let (mut screen, store, _side) = build_screen(store, Platform::Ios, Platformish::default());

    screen.blur();
    let settled = screen.scroll_settled(390.0, 390.0);
    assert_eq!(settled.transition, Transition::Suppressed);

    screen.focus();
    screen.scroll_settled(0.0, 390.0);
    assert_eq!(screen.focus_index(), 0);
    assert!(store.refreshes().is_empty());
}

#[tokio::test]
async fn mount_refreshes_everything_quietly() {
    let store = Store::with_wallets(vec![fresh_wallet("Daily")]);
    let (mut screen, store, _side) = build_screen(store, Platform::Ios, Platformish::default());

    let handle = screen.mount().unwrap();
    assert!(!screen.loading());
    handle.await.unwrap();

    assert_eq!(store.refreshes(), vec![(None, true)]);
    assert!(!screen.loading());
}

#[tokio::test]
async fn disabled_refresh_never_raises_loading() {
    let store = Store {
        disabled: true,
        ..Store::with_wallets(vec![fresh_wallet("Daily")])
    };
    let (screen, store, _side) = build_screen(store, Platform::Android, Platformish::default());
    let loading = screen.subscribe_loading();

    let handle = screen.pull_to_refresh();

    assert!(handle.is_none());
    assert!(!loading.has_changed().unwrap(), "loading was published");
    assert!(!*loading.borrow());
    assert!(store.refreshes().is_empty());
    let env = LayoutEnv {
        platform: Platform::Android,
        is_tablet: false,
        window_width: 390.0,
        screen_width: 390.0,
    };
    assert!(!screen.render_model(&env).pull_to_refresh);
}

#[tokio::test]
async fn failed_pull_to_refresh_clears_loading() {
    let store = Store {
        fail: true,
        ..Store::with_wallets(vec![fresh_wallet("Daily")])
    };
    let (screen, _store, _side) = build_screen(store, Platform::Ios, Platformish::default());

    let handle = screen.pull_to_refresh().unwrap();
    assert!(screen.loading());
    assert!(screen.refresh_pressed().is_none());
    handle.await.unwrap();

    assert!(!screen.loading());
}

#[tokio::test]
async fn carousel_follows_collection_length() {
    let store = Store::with_wallets(vec![fresh_wallet("A"), fresh_wallet("B")]);
    let (mut screen, store, _side) = build_screen(store, Platform::Ios, Platformish::default());

    store.wallets.lock().unwrap().push(Arc::new(fresh_wallet("C")));
    assert_eq!(screen.wallets_changed(), Some(CarouselScroll::ToWallet(2)));
    screen.scroll_settled(300.0, 100.0);
    assert_eq!(screen.focus_index(), 3);

    store.wallets.lock().unwrap().pop();
    store.wallets.lock().unwrap().pop();
    assert_eq!(screen.wallets_changed(), Some(CarouselScroll::ResetSelection));
    assert_eq!(screen.focus_index(), 0);
    assert_eq!(screen.wallets_changed(), None);
}

#[tokio::test]
async fn focus_records_balance_and_clears_selection() {
    let mut rich = fresh_wallet("Rich");
    rich.balance = Sats::new(21_000);
    let (mut screen, store, side) = build_screen(
        Store::with_wallets(vec![rich]),
        Platform::Ios,
        Platformish::default(),
    );
    screen.focus();

    let (mut empty, _, empty_side) = build_screen(Store::default(), Platform::Ios, Platformish::default());
    empty.focus();

    assert_eq!(*side.events.lock().unwrap(), vec![AnalyticsEvent::GotNonzeroBalance]);
    assert_eq!(*empty_side.events.lock().unwrap(), vec![AnalyticsEvent::GotZeroBalance]);
    assert_eq!(*store.selected.lock().unwrap(), vec![None]);
}

#[tokio::test]
async fn scan_tap_navigates_to_resolved_route() {
    let side = Platformish {
        scanned: Some("bitcoin:bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh".to_string()),
        ..Platformish::default()
    };
    let (screen, _store, side) = build_screen(
        Store::with_wallets(vec![fresh_wallet("Daily")]),
        Platform::Android,
        side,
    );

    screen.scan(ScanGesture::Tap).await.unwrap();

    assert_eq!(
        *side.routes.lock().unwrap(),
        vec![Route::SendDetails {
            address: "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh".to_string(),
            amount: None,
            memo: None,
        }]
    );
    assert_eq!(*side.haptics.lock().unwrap(), vec![HapticFeedback::ImpactLight]);
}

#[tokio::test]
async fn empty_or_failed_scans_do_nothing() {
    let (screen, _store, side) = build_screen(
        Store::with_wallets(vec![fresh_wallet("Daily")]),
        Platform::Ios,
        Platformish {
            scanned: Some(String::new()),
            clipboard: "bitcoin:bc1qclip".to_string(),
            choice: Some(1),
            ..Platformish::default()
        },
    );

    screen.scan(ScanGesture::Tap).await.unwrap();
    screen.scan(ScanGesture::LongPress).await.unwrap();
    screen.on_result(None);

    assert_eq!(side.sheets.lock().unwrap()[0].options.len(), 4);
    assert!(side.routes.lock().unwrap().is_empty());
    assert!(side.haptics.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unroutable_payload_is_dropped() {
    let (screen, _store, side) = build_screen(Store::default(), Platform::Desktop, Platformish::default());

    screen.on_result(Some("hello".to_string()));

    assert!(side.routes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn wallet_card_navigation() {
    let daily = fresh_wallet("Daily");
    let daily_id = daily.id;
    let (screen, _store, side) = build_screen(
        Store::with_wallets(vec![daily]),
        Platform::Ios,
        Platformish::default(),
    );

    screen.wallet_clicked(0);
    screen.wallet_clicked(1);
    screen.wallet_long_pressed();
    screen.settings_pressed();

    assert_eq!(
        *side.routes.lock().unwrap(),
        vec![
            Route::WalletTransactions {
                wallet_id: daily_id,
                kind: WalletKind::HdSegwitBech32
            },
            Route::AddWallet,
            Route::Settings,
        ]
    );
    assert_eq!(
        *side.haptics.lock().unwrap(),
        vec![HapticFeedback::NotificationError]
    );
}

#[tokio::test]
async fn long_press_with_many_wallets_reorders() {
    let (screen, _store, side) = build_screen(
        Store::with_wallets(vec![fresh_wallet("A"), fresh_wallet("B")]),
        Platform::Ios,
        Platformish::default(),
    );

    screen.wallet_long_pressed();

    assert_eq!(*side.routes.lock().unwrap(), vec![Route::ReorderWallets]);
}
