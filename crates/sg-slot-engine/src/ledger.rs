//! Wager / balance ledger
//!
//! One debit at spin start, at most one credit at resolution. The balance
//! never goes negative and the wager stays within [`MIN_WAGER`] and
//! [`MAX_WAGER`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Credits;

/// Smallest accepted wager (1.00)
pub const MIN_WAGER: Credits = Credits::units(1);

/// Largest accepted wager
pub const MAX_WAGER: Credits = Credits::MAX;

/// Wager step for the ± buttons (1.00)
pub const WAGER_STEP: Credits = Credits::units(1);

/// Ledger refusals
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient funds: balance {balance} below wager {wager}")]
    InsufficientFunds { balance: Credits, wager: Credits },
}

/// Balance, wager and last win
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balance: Credits,
    wager: Credits,
    last_win: Credits,
}

impl Ledger {
    /// Opening ledger; the wager is clamped to the accepted range
    pub fn new(balance: Credits, wager: Credits) -> Self {
        assert!(!balance.is_negative(), "opening balance must not be negative");
        Self {
            balance,
            wager: wager.clamp(MIN_WAGER, MAX_WAGER),
            last_win: Credits::ZERO,
        }
    }

    /// Normalise free-form wager input: two-decimal rounding, non-finite
    /// or below the minimum becomes the minimum, above the maximum becomes
    /// the maximum
    pub fn normalize_wager(value: f64) -> Credits {
        if value.is_finite() && value >= MAX_WAGER.as_decimal() {
            return MAX_WAGER;
        }
        match Credits::from_decimal(value) {
            Some(wager) if wager >= MIN_WAGER => wager,
            _ => MIN_WAGER,
        }
    }

    pub fn balance(&self) -> Credits {
        self.balance
    }

    pub fn wager(&self) -> Credits {
        self.wager
    }

    pub fn last_win(&self) -> Credits {
        self.last_win
    }

    /// Set the wager from free-form input, returning the stored value
    pub fn set_wager(&mut self, value: f64) -> Credits {
        self.wager = Self::normalize_wager(value);
        self.wager
    }

    pub fn increment_wager(&mut self) -> Credits {
        self.wager = self.wager.saturating_add(WAGER_STEP).min(MAX_WAGER);
        self.wager
    }

    pub fn decrement_wager(&mut self) -> Credits {
        self.wager = (self.wager - WAGER_STEP).max(MIN_WAGER);
        self.wager
    }

    pub fn can_cover(&self) -> bool {
        self.balance >= self.wager
    }

    /// Take the wager for a new spin, returning the amount debited
    pub fn debit(&mut self) -> Result<Credits, LedgerError> {
        let wager = self.wager;
        let balance = self.balance.checked_sub(wager).filter(|b| !b.is_negative()).ok_or(
            LedgerError::InsufficientFunds {
                balance: self.balance,
                wager,
            },
        )?;
        self.balance = balance;
        Ok(wager)
    }

    /// Record a resolution: credits `payout` when positive, always sets
    /// the last win
    pub fn settle(&mut self, payout: Credits) {
        assert!(!payout.is_negative(), "payout must not be negative");
        if payout > Credits::ZERO {
            self.balance = self.balance.saturating_add(payout);
        }
        self.last_win = payout;
    }
}
