
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use crate::error::{RebateError, Result};

/// Number of decimal places carried by the settlement asset
pub const DECIMALS: u32 = 18;

const SCALE: u128 = 1_000_000_000_000_000_000; // 10^18

/// Fixed-point token amount with 18 decimal places
/// Stored as raw base units; rebates are never negative.
/// Serialized as an exact decimal string such as "1.123".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u128);

impl Amount {
    /// Zero amount
    pub const ZERO: Amount = Amount(0);

    /// Create from raw base units
    pub const fn from_raw(raw: u128) -> Self {
        Amount(raw)
    }

    /// Get the raw base units
    pub const fn raw(&self) -> u128 {
        self.0
    }

    /// Create from whole token units
    pub const fn from_units(units: u64) -> Self {
        Amount((units as u128) * SCALE)
    }

    /// Parse an exact decimal string such as "1.123"
    pub fn from_decimal_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(RebateError::InvalidAmount(format!("cannot parse: {:?}", s)));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(RebateError::InvalidAmount(format!("cannot parse: {:?}", s)));
        }
        if frac.len() > DECIMALS as usize {
            return Err(RebateError::InvalidAmount(format!(
                "more than {} fractional digits: {}",
                DECIMALS, s
            )));
        }

        let whole_units: u128 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| RebateError::InvalidAmount(format!("cannot parse: {}", s)))?
        };
        let frac_units: u128 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{:0<width$}", frac, width = DECIMALS as usize);
            padded
                .parse()
                .map_err(|_| RebateError::InvalidAmount(format!("cannot parse: {}", s)))?
        };

        whole_units
            .checked_mul(SCALE)
            .and_then(|w| w.checked_add(frac_units))
            .map(Amount)
            .ok_or(RebateError::AmountOverflow)
    }

    /// Check if amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition
    pub fn checked_add(&self, other: Self) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or(RebateError::AmountOverflow)
    }

    /// Checked subtraction
    pub fn checked_sub(&self, other: Self) -> Result<Self> {
        self.0
            .checked_sub(other.0)
            .map(Amount)
            .ok_or_else(|| RebateError::InvalidAmount("underflow in subtraction".to_string()))
    }

    /// Sum an iterator of amounts, failing on overflow
    pub fn checked_sum<I: IntoIterator<Item = Amount>>(iter: I) -> Result<Self> {
        iter.into_iter()
            .try_fold(Amount::ZERO, |acc, amount| acc.checked_add(amount))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Amount::from_decimal_str(&raw).map_err(de::Error::custom)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / SCALE;
        let frac = self.0 % SCALE;
        if frac == 0 {
            return write!(f, "{}", whole);
        }
        let digits = format!("{:018}", frac);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}
