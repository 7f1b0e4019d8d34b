//! What the wallets list shows: the carousel section, the transaction feed,
//! and the scan button, with the large-screen and empty-state rules.

use std::sync::Arc;

use crate::{Platform, Transaction, Wallet};

pub const WALLETS_TITLE: &str = "Wallets";
pub const TRANSACTIONS_TITLE: &str = "Transactions";
pub const EMPTY_FEED_HEADLINE: &str = "Your transactions will appear here.";
pub const EMPTY_FEED_HINT: &str = "Start with your wallet.";
pub const SCAN_LABEL: &str = "Scan";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionKey {
    Carousel,
    Transactions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CarouselItem {
    Wallet(Arc<Wallet>),
    /// Trailing "add a new wallet" card.
    AddWallet,
}

/// Window metrics the layout decision depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutEnv {
    pub platform: Platform,
    pub is_tablet: bool,
    pub window_width: f64,
    pub screen_width: f64,
}

/// Large screens show wallets in a side panel instead of the carousel.
pub fn is_large_screen(env: &LayoutEnv) -> bool {
    match env.platform {
        Platform::Android => env.is_tablet,
        Platform::Ios | Platform::Desktop => {
            (env.window_width >= env.screen_width / 2.0 && env.is_tablet)
                || env.platform == Platform::Desktop
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CarouselSection {
    pub title: &'static str,
    pub items: Vec<CarouselItem>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefreshButton {
    pub enabled: bool,
    pub opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransactionsHeader {
    pub title: &'static str,
    /// Desktop has no pull-to-refresh, it gets a button instead.
    pub refresh: Option<RefreshButton>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyState {
    pub headline: &'static str,
    pub hint: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanButton {
    pub label: &'static str,
    pub long_press: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListRenderModel {
    pub large_screen: bool,
    /// `None` on large screens.
    pub carousel: Option<CarouselSection>,
    pub transactions_header: TransactionsHeader,
    pub transactions: Vec<Transaction>,
    pub empty_state: Option<EmptyState>,
    pub scan_button: Option<ScanButton>,
    pub pull_to_refresh: bool,
    pub refreshing: bool,
}

impl ListRenderModel {
    pub fn build(
        wallets: &[Arc<Wallet>],
        transactions: Vec<Transaction>,
        loading: bool,
        electrum_disabled: bool,
        env: &LayoutEnv,
    ) -> Self {
        let large_screen = is_large_screen(env);
        let desktop = env.platform == Platform::Desktop;

        let carousel = (!large_screen).then(|| CarouselSection {
            title: WALLETS_TITLE,
            items: wallets
                .iter()
                .cloned()
                .map(CarouselItem::Wallet)
                .chain(std::iter::once(CarouselItem::AddWallet))
                .collect(),
        });

        let refresh = desktop.then(|| RefreshButton {
            enabled: !loading,
            opacity: if loading { 1.0 } else { 0.5 },
        });

        let empty_state = (transactions.is_empty() && !loading).then_some(EmptyState {
            headline: EMPTY_FEED_HEADLINE,
            hint: EMPTY_FEED_HINT,
        });

        let scan_button = (!wallets.is_empty()).then_some(ScanButton {
            label: SCAN_LABEL,
            long_press: !desktop,
        });

        Self {
            large_screen,
            carousel,
            transactions_header: TransactionsHeader {
                title: TRANSACTIONS_TITLE,
                refresh,
            },
            transactions,
            empty_state,
            scan_button,
            pull_to_refresh: !electrum_disabled,
            refreshing: loading,
        }
    }

    pub fn sections(&self) -> [SectionKey; 2] {
        [SectionKey::Carousel, SectionKey::Transactions]
    }
}
