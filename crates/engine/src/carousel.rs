//! Tracks which wallet the horizontally paged carousel is showing.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{StalenessPolicy, Wallet};

/// Outcome of a scroll-settle event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The screen is not focused, the event was ignored.
    Suppressed,
    /// Momentum stopped at the index it started from.
    Unchanged,
    /// Focus moved. `refresh` is set when the newly focused wallet is stale.
    Moved { index: usize, refresh: bool },
}

/// Scroll the view must perform after the wallet collection changed length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselScroll {
    /// A wallet was appended, show it.
    ToWallet(usize),
    /// A wallet was removed, focus is back on the first card.
    ResetSelection,
}

#[derive(Debug, Clone)]
pub struct CarouselPositionTracker {
    index: usize,
    focused: bool,
    wallet_count: usize,
    policy: StalenessPolicy,
}

impl CarouselPositionTracker {
    pub fn new(wallet_count: usize, policy: StalenessPolicy) -> Self {
        Self {
            index: 0,
            focused: true,
            wallet_count,
            policy,
        }
    }

    /// Current focus, in `[0, wallet count]`. The last value is the "add
    /// wallet" card.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Handle the end of a momentum scroll at `offset_x` in a viewport of
    /// `viewport_width`.
    pub fn on_scroll_settle(
        &mut self,
        offset_x: f64,
        viewport_width: f64,
        wallets: &[Arc<Wallet>],
        now: DateTime<Utc>,
    ) -> Transition {
        if !self.focused {
            return Transition::Suppressed;
        }
        if !offset_x.is_finite() || !viewport_width.is_finite() || viewport_width <= 0.0 {
            tracing::debug!(offset_x, viewport_width, "ignoring scroll settle without a page width");
            return Transition::Unchanged;
        }

        let index = page_index(offset_x, viewport_width, wallets.len());
        if index == self.index {
            tracing::debug!(index, "scroll settled on the page it started from");
            return Transition::Unchanged;
        }

        self.index = index;
        let refresh = match wallets.get(index) {
            Some(wallet) => {
                let stale = self.policy.is_stale(&wallet.freshness(), now);
                if stale {
                    tracing::debug!(
                        label = wallet.label.as_str(),
                        "wallet due for a balance or transaction refresh"
                    );
                }
                stale
            }
            None => {
                tracing::debug!(index, "scroll settled on the add wallet card");
                false
            }
        };

        Transition::Moved { index, refresh }
    }

    /// Observe the collection length after a render.
    pub fn on_wallets_changed(&mut self, wallet_count: usize) -> Option<CarouselScroll> {
        let previous = self.wallet_count;
        self.wallet_count = wallet_count;

        if wallet_count > previous {
            Some(CarouselScroll::ToWallet(previous))
        } else if wallet_count < previous {
            self.index = 0;
            Some(CarouselScroll::ResetSelection)
        } else {
            None
        }
    }
}

fn page_index(offset_x: f64, viewport_width: f64, wallet_count: usize) -> usize {
    let page = (offset_x / viewport_width).ceil();
    if page <= 0.0 {
        0
    } else if page >= wallet_count as f64 {
        wallet_count
    } else {
        page as usize
    }
}
