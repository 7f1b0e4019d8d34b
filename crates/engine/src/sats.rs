use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::EngineError;

const SATS_PER_BTC: i64 = 100_000_000;

/// Display unit preferred by a wallet for its balance and transactions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceUnit {
    #[default]
    Btc,
    Sats,
}

/// Signed bitcoin amount represented as **integer satoshis**.
///
/// The value is signed:
/// - positive = incoming / increase
/// - negative = outgoing / decrease
///
/// # Examples
///
/// ```rust
/// use deck_engine::{BalanceUnit, Sats};
///
/// let amount = Sats::new(1_234);
/// assert_eq!(amount.format(BalanceUnit::Sats), "1234 sats");
/// assert_eq!(amount.format(BalanceUnit::Btc), "0.00001234 BTC");
/// ```
///
/// Parsing accepts a BTC decimal with at most 8 fractional digits:
///
/// ```rust
/// use deck_engine::Sats;
///
/// assert_eq!("0.001".parse::<Sats>().unwrap().sats(), 100_000);
/// assert!("0.000000001".parse::<Sats>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sats(i64);

impl Sats {
    pub const ZERO: Sats = Sats(0);

    /// Creates a new amount from integer satoshis.
    #[must_use]
    pub const fn new(sats: i64) -> Self {
        Self(sats)
    }

    /// Returns the raw value in satoshis.
    #[must_use]
    pub const fn sats(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Sats) -> Option<Sats> {
        self.0.checked_add(rhs.0).map(Sats)
    }

    /// Formats the amount in the given unit, with the unit suffix.
    #[must_use]
    pub fn format(self, unit: BalanceUnit) -> String {
        match unit {
            BalanceUnit::Sats => format!("{} sats", self.0),
            BalanceUnit::Btc => format!("{self} BTC"),
        }
    }
}

impl fmt::Display for Sats {
    /// Writes the amount as a BTC decimal with 8 fractional digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / SATS_PER_BTC as u64;
        let frac = abs % SATS_PER_BTC as u64;
        write!(f, "{sign}{whole}.{frac:08}")
    }
}

impl From<i64> for Sats {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Sats> for i64 {
    fn from(value: Sats) -> Self {
        value.0
    }
}

impl Add for Sats {
    type Output = Sats;

    /// Saturates at the `i64` bounds instead of overflowing.
    fn add(self, rhs: Sats) -> Self::Output {
        self.checked_add(rhs).unwrap_or_else(|| {
            tracing::warn!(lhs = self.0, rhs = rhs.0, "amount overflow, saturating");
            Sats(self.0.saturating_add(rhs.0))
        })
    }
}

impl AddAssign for Sats {
    fn add_assign(&mut self, rhs: Sats) {
        *self = *self + rhs;
    }
}

impl Sub for Sats {
    type Output = Sats;

    fn sub(self, rhs: Sats) -> Self::Output {
        Sats(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Sats {
    type Output = Sats;

    fn neg(self) -> Self::Output {
        Sats(self.0.saturating_neg())
    }
}

impl FromStr for Sats {
    type Err = EngineError;

    /// Parses a BTC decimal string (as found in BIP21 `amount=`) into satoshis.
    ///
    /// Validation rules:
    /// - no sign, amounts in payment requests are always positive
    /// - max 8 fractional digits
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidAmount(format!("invalid amount \"{s}\""));
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidAmount("empty amount".to_string()));
        }

        let (whole_str, frac_str) = match trimmed.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (trimmed, ""),
        };

        if whole_str.is_empty() && frac_str.is_empty() {
            return Err(invalid());
        }
        if !whole_str.chars().all(|c| c.is_ascii_digit())
            || !frac_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if frac_str.len() > 8 {
            return Err(EngineError::InvalidAmount("too many decimals".to_string()));
        }

        let whole: i64 = if whole_str.is_empty() {
            0
        } else {
            whole_str.parse().map_err(|_| overflow())?
        };
        let frac: i64 = if frac_str.is_empty() {
            0
        } else {
            format!("{frac_str:0<8}").parse().map_err(|_| invalid())?
        };

        whole
            .checked_mul(SATS_PER_BTC)
            .and_then(|v| v.checked_add(frac))
            .map(Sats)
            .ok_or_else(overflow)
    }
}
