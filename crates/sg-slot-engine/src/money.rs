//! Exact money arithmetic
//!
//! Balances, wagers and payouts are whole cents. Line payouts are
//! accumulated in basis units (cent × hundredth) and rounded once.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::symbols::PayValue;

/// An amount of credits, stored as cents
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Credits(i64);

impl Credits {
    pub const ZERO: Credits = Credits(0);

    /// Largest amount accepted from input (100 000 000 000.00)
    ///
    /// Leaves headroom for line basis arithmetic at the top pay value
    /// times the largest multiplier and boost.
    pub const MAX: Credits = Credits(10_000_000_000_000);

    /// Create from a cent count
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole units (e.g. `Credits::units(10)` is 10.00)
    pub const fn units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Convert a decimal amount, rounding half away from zero at the cent
    ///
    /// Returns `None` for NaN, infinite or out-of-range input (beyond
    /// ±[`Credits::MAX`]).
    pub fn from_decimal(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents.abs() > Self::MAX.0 as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// Round an accumulated basis amount (1/10000 unit) to cents
    pub fn from_basis(basis: i64) -> Self {
        let cents = if basis >= 0 {
            (basis + 50) / 100
        } else {
            (basis - 50) / 100
        };
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Decimal view for presentation
    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Basis amount of `self × pay`, exact
    pub fn basis_times(self, pay: PayValue) -> i64 {
        self.0 * i64::from(pay.hundredths())
    }

    /// Multiply by a whole factor
    pub fn times(self, factor: u32) -> Self {
        Self(self.0 * i64::from(factor))
    }

    /// `self / other` as a plain ratio (0 when `other` is zero)
    pub fn ratio_to(self, other: Credits) -> f64 {
        if other.0 == 0 {
            0.0
        } else {
            self.0 as f64 / other.0 as f64
        }
    }

    pub fn checked_sub(self, other: Credits) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_add(self, other: Credits) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Add for Credits {
    type Output = Credits;

    fn add(self, rhs: Self) -> Self::Output {
        Credits(self.0 + rhs.0)
    }
}

impl AddAssign for Credits {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Credits {
    type Output = Credits;

    fn sub(self, rhs: Self) -> Self::Output {
        Credits(self.0 - rhs.0)
    }
}

impl SubAssign for Credits {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl std::iter::Sum for Credits {
    fn sum<I: Iterator<Item = Credits>>(iter: I) -> Self {
        iter.fold(Credits::ZERO, |acc, c| acc + c)
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}
