//! Fixed-point monetary amounts.
//!
//! Every quantity entering the engine (configuration constants, entry fees,
//! user-supplied win rates, prize values) passes through
//! [`Amount::normalize`] before any arithmetic, so all downstream math is
//! exact decimal math with no binary floating-point representation error.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from amount normalization.
#[derive(Debug, thiserror::Error)]
pub enum AmountError {
    #[error("negative amounts are not accepted: {0}")]
    Negative(Decimal),

    #[error("not a decimal amount: {0:?}")]
    Unparseable(String),
}

// ---------------------------------------------------------------------------
// RawAmount
// ---------------------------------------------------------------------------

/// The closed set of source representations accepted at the boundary.
///
/// Anything else must be converted by the caller; there is no fallback
/// parse for arbitrary types.
#[derive(Debug, Clone)]
pub enum RawAmount {
    Integer(i64),
    Float(f64),
    Text(String),
    Fixed(Decimal),
}

impl From<i32> for RawAmount {
    fn from(n: i32) -> Self {
        RawAmount::Integer(n as i64)
    }
}

impl From<i64> for RawAmount {
    fn from(n: i64) -> Self {
        RawAmount::Integer(n)
    }
}

impl From<u32> for RawAmount {
    fn from(n: u32) -> Self {
        RawAmount::Integer(n as i64)
    }
}

impl From<f64> for RawAmount {
    fn from(n: f64) -> Self {
        RawAmount::Float(n)
    }
}

impl From<&str> for RawAmount {
    fn from(s: &str) -> Self {
        RawAmount::Text(s.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(s: String) -> Self {
        RawAmount::Text(s)
    }
}

impl From<Decimal> for RawAmount {
    fn from(d: Decimal) -> Self {
        RawAmount::Fixed(d)
    }
}

impl From<Amount> for RawAmount {
    fn from(a: Amount) -> Self {
        RawAmount::Fixed(a.0)
    }
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// Monetary amount backed by `rust_decimal::Decimal`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Amount(pub Decimal);

impl Amount {
    /// Zero value
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Create from a `Decimal` value without normalization.
    ///
    /// Used for internal results of exact decimal arithmetic; external
    /// input goes through [`Amount::normalize`] instead.
    pub fn from_decimal(d: Decimal) -> Self {
        Self(d)
    }

    /// Whether the value is exactly zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Normalize an external input into a non-negative amount truncated
    /// toward zero to exactly two fractional digits.
    ///
    /// A fixed-point input strictly greater than zero is returned unchanged
    /// without re-truncation. Everything else is parsed and truncated (never
    /// rounded to nearest, so computed prices never exceed the configured
    /// peg). A negative result is rejected.
    pub fn normalize(input: impl Into<RawAmount>) -> Result<Amount, AmountError> {
        let decimal = match input.into() {
            RawAmount::Fixed(d) if d > Decimal::ZERO => return Ok(Amount(d)),
            RawAmount::Fixed(d) => d,
            RawAmount::Integer(n) => Decimal::from(n),
            RawAmount::Float(n) => {
                Decimal::from_f64(n).ok_or_else(|| AmountError::Unparseable(n.to_string()))?
            }
            RawAmount::Text(s) => {
                Decimal::from_str(s.trim()).map_err(|_| AmountError::Unparseable(s))?
            }
        };
        // Truncate first, then pad to exactly two fractional digits; the
        // rescale never rounds because the scale can only grow here.
        let mut truncated = decimal.trunc_with_scale(2);
        truncated.rescale(2);
        if truncated < Decimal::ZERO {
            return Err(AmountError::Negative(truncated));
        }
        Ok(Amount(truncated))
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), Add::add)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
