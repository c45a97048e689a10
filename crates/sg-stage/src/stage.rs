//! Stage — The enum of every canonical spin phase
//!
//! A Stage is NOT an animation and NOT a timer callback.
//! A Stage is the SEMANTIC MEANING of a moment in the spin flow.

use serde::{Deserialize, Serialize};

use crate::taxonomy::BigWinTier;

/// Canonical spin stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stage {
    // ═══════════════════════════════════════════════════════════════════════
    // SPIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Spin accepted, wager debited
    SpinStart {
        /// Wager taken for this spin
        wager: f64,
        /// Balance after the debit
        balance: f64,
    },

    /// Spin request refused for lack of funds
    SpinRefused {
        balance: f64,
        wager: f64,
    },

    /// One intermediate animation grid was shown
    ReelFrame {
        /// Frame index (0-based)
        frame_index: u32,
        /// Total frames in this animation
        frame_count: u32,
    },

    /// Animation finished, candidate grid is on screen
    SpinSettled,

    /// Spin fully resolved, ready for the next one
    SpinEnd {
        /// Amount credited for this spin
        win_amount: f64,
        /// Balance after the credit
        balance: f64,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // WIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Bonus multiplier drawn for a normal resolution
    MultiplierDrawn {
        /// Multiplier factor, `None` shown as "—"
        #[serde(default)]
        multiplier: Option<u32>,
    },

    /// Win celebration starting
    WinPresent {
        /// Total win amount
        win_amount: f64,
        /// Number of paying lines
        #[serde(default)]
        line_count: u8,
    },

    /// Big win overlay shown
    BigWinStart {
        tier: BigWinTier,
        /// Payout divided by wager
        effective_multiplier: f64,
    },

    /// Big win overlay dismissed
    BigWinEnd {
        tier: BigWinTier,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // BONUS EVENT
    // ═══════════════════════════════════════════════════════════════════════
    /// Bonus event triggered, theme starts fading
    BonusEnter {
        /// Name of the symbol the event will lock
        target: String,
    },

    /// Free spin of the fading phase (no locking)
    BonusFadeSpin,

    /// Locking phase started
    BonusActivate {
        spins_remaining: u32,
    },

    /// One lock-in re-spin
    BonusLock {
        /// Re-spins left after this one
        spins_remaining: u32,
        /// Cells holding the target or the wild
        locked_cells: u8,
    },

    /// Bonus event concluded
    BonusExit {
        /// Grid filled and the boost was applied
        forced_win: bool,
        win_amount: f64,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // SESSION
    // ═══════════════════════════════════════════════════════════════════════
    /// Auto-play switched off by the engine or the player
    AutoPlayStopped,
}

impl Stage {
    /// Get the stage category for grouping
    pub fn category(&self) -> StageCategory {
        match self {
            Stage::SpinStart { .. }
            | Stage::SpinRefused { .. }
            | Stage::ReelFrame { .. }
            | Stage::SpinSettled
            | Stage::SpinEnd { .. } => StageCategory::SpinLifecycle,

            Stage::MultiplierDrawn { .. }
            | Stage::WinPresent { .. }
            | Stage::BigWinStart { .. }
            | Stage::BigWinEnd { .. } => StageCategory::WinLifecycle,

            Stage::BonusEnter { .. }
            | Stage::BonusFadeSpin
            | Stage::BonusActivate { .. }
            | Stage::BonusLock { .. }
            | Stage::BonusExit { .. } => StageCategory::Bonus,

            Stage::AutoPlayStopped => StageCategory::Session,
        }
    }

    /// Get stage type name (snake_case, matches the serde tag)
    pub fn type_name(&self) -> &'static str {
        match self {
            Stage::SpinStart { .. } => "spin_start",
            Stage::SpinRefused { .. } => "spin_refused",
            Stage::ReelFrame { .. } => "reel_frame",
            Stage::SpinSettled => "spin_settled",
            Stage::SpinEnd { .. } => "spin_end",
            Stage::MultiplierDrawn { .. } => "multiplier_drawn",
            Stage::WinPresent { .. } => "win_present",
            Stage::BigWinStart { .. } => "big_win_start",
            Stage::BigWinEnd { .. } => "big_win_end",
            Stage::BonusEnter { .. } => "bonus_enter",
            Stage::BonusFadeSpin => "bonus_fade_spin",
            Stage::BonusActivate { .. } => "bonus_activate",
            Stage::BonusLock { .. } => "bonus_lock",
            Stage::BonusExit { .. } => "bonus_exit",
            Stage::AutoPlayStopped => "auto_play_stopped",
        }
    }

    /// Stages that conclude a spin request (accepted or not)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::SpinEnd { .. } | Stage::SpinRefused { .. })
    }
}

/// Stage category for grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageCategory {
    SpinLifecycle,
    WinLifecycle,
    Bonus,
    Session,
}

impl StageCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SpinLifecycle => "Spin Lifecycle",
            Self::WinLifecycle => "Win Lifecycle",
            Self::Bonus => "Bonus Event",
            Self::Session => "Session",
        }
    }
}
