//! Decides when a wallet's balance or transactions are out of date.
//!
//! The policy never looks at a live wallet: it works on a [`FreshnessSnapshot`]
//! copied out of the wallet, so it can be evaluated without a store.

use chrono::{DateTime, TimeDelta, Utc};

/// The freshness-related fields of a wallet at a point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FreshnessSnapshot {
    pub last_balance_check: Option<DateTime<Utc>>,
    pub last_transaction_check: Option<DateTime<Utc>>,
    pub has_unconfirmed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StalenessPolicy {
    balance_interval: TimeDelta,
    transaction_interval: TimeDelta,
    /// Used instead of `transaction_interval` while confirmations are pending.
    pending_interval: TimeDelta,
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self {
            balance_interval: TimeDelta::minutes(5),
            transaction_interval: TimeDelta::minutes(5),
            pending_interval: TimeDelta::seconds(60),
        }
    }
}

impl StalenessPolicy {
    pub fn new(
        balance_interval: TimeDelta,
        transaction_interval: TimeDelta,
        pending_interval: TimeDelta,
    ) -> Self {
        Self {
            balance_interval,
            transaction_interval,
            pending_interval,
        }
    }

    /// Returns `true` when the balance should be fetched again.
    pub fn balance_due(&self, snapshot: &FreshnessSnapshot, now: DateTime<Utc>) -> bool {
        elapsed(snapshot.last_balance_check, now, self.balance_interval)
    }

    /// Returns `true` when the transaction list should be fetched again.
    pub fn transactions_due(&self, snapshot: &FreshnessSnapshot, now: DateTime<Utc>) -> bool {
        let interval = if snapshot.has_unconfirmed {
            self.pending_interval
        } else {
            self.transaction_interval
        };
        elapsed(snapshot.last_transaction_check, now, interval)
    }

    /// A wallet is stale when either its balance or its transactions are due.
    pub fn is_stale(&self, snapshot: &FreshnessSnapshot, now: DateTime<Utc>) -> bool {
        self.balance_due(snapshot, now) || self.transactions_due(snapshot, now)
    }
}

fn elapsed(last: Option<DateTime<Utc>>, now: DateTime<Utc>, interval: TimeDelta) -> bool {
    match last {
        Some(last) => now.signed_duration_since(last) >= interval,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn snapshot(balance_age: i64, tx_age: i64, has_unconfirmed: bool) -> FreshnessSnapshot {
        FreshnessSnapshot {
            last_balance_check: Some(now() - TimeDelta::seconds(balance_age)),
            last_transaction_check: Some(now() - TimeDelta::seconds(tx_age)),
            has_unconfirmed,
        }
    }

    #[test]
    fn stale_iff_either_predicate_holds() {
        let policy = StalenessPolicy::default();
        let cases = [
            (10, 10, false),
            (301, 10, true),
            (10, 301, true),
            (301, 301, true),
        ];

        for (balance_age, tx_age, expected) in cases {
            let snap = snapshot(balance_age, tx_age, false);
            let either = policy.balance_due(&snap, now()) || policy.transactions_due(&snap, now());
            assert_eq!(policy.is_stale(&snap, now()), expected);
            assert_eq!(policy.is_stale(&snap, now()), either);
        }
    }

    #[test]
    fn never_checked_is_stale() {
        let policy = StalenessPolicy::default();
        assert!(policy.is_stale(&FreshnessSnapshot::default(), now()));
    }

    #[test]
    fn interval_boundary_is_due() {
        let policy = StalenessPolicy::default();
        let snap = snapshot(300, 0, false);
        assert!(policy.balance_due(&snap, now()));
        assert!(!policy.transactions_due(&snap, now()));
    }

    #[test]
    fn unconfirmed_transactions_use_short_interval() {
        let policy = StalenessPolicy::default();

        assert!(!policy.transactions_due(&snapshot(0, 90, false), now()));
        assert!(policy.transactions_due(&snapshot(0, 90, true), now()));
        assert!(!policy.transactions_due(&snapshot(0, 30, true), now()));
    }

    #[test]
    fn custom_intervals() {
        let policy = StalenessPolicy::new(
            TimeDelta::seconds(10),
            TimeDelta::seconds(20),
            TimeDelta::seconds(5),
        );

        assert!(policy.balance_due(&snapshot(10, 0, false), now()));
        assert!(!policy.transactions_due(&snapshot(0, 19, false), now()));
        assert!(policy.transactions_due(&snapshot(0, 5, true), now()));
    }
}
