//! In-flight session state
//!
//! The machine holds exactly one [`SessionPhase`]. A spin request is only
//! accepted from `Idle`, which is what keeps one spin in flight at a time.

use serde::{Deserialize, Serialize};

use crate::animator::SpinAnimator;
use crate::bonus::BonusEvent;
use crate::money::Credits;
use crate::outcome::ForcedOutcome;
use crate::scheduler::TimerId;
use crate::timing::TimingConfig;

/// A spin between debit and credit
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSpin {
    pub id: u64,
    /// Wager locked at debit time
    pub wager: Credits,
    /// Balance before the debit
    pub balance_before: Credits,
    pub started_at_ms: u64,
    /// Timing captured when the spin started
    pub timing: TimingConfig,
    pub forced: ForcedOutcome,
}

/// What the machine is doing right now
#[derive(Debug, Clone, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    /// Reel animation running
    Spinning {
        spin: ActiveSpin,
        animator: SpinAnimator,
    },
    /// Bonus event replacing the normal resolution
    Bonus {
        spin: ActiveSpin,
        event: BonusEvent,
        /// Pending fading free spin, cancelled on activation
        fade_timer: Option<TimerId>,
    },
    /// Torn down; every request is refused
    TornDown,
}

impl SessionPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionPhase::Idle)
    }

    /// A spin is between debit and credit
    pub fn in_flight(&self) -> bool {
        matches!(
            self,
            SessionPhase::Spinning { .. } | SessionPhase::Bonus { .. }
        )
    }

    pub fn active_spin(&self) -> Option<&ActiveSpin> {
        match self {
            SessionPhase::Spinning { spin, .. } | SessionPhase::Bonus { spin, .. } => Some(spin),
            SessionPhase::Idle | SessionPhase::TornDown => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Spinning { .. } => "spinning",
            SessionPhase::Bonus { .. } => "bonus",
            SessionPhase::TornDown => "torn_down",
        }
    }
}

/// Player toggles that persist across spins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionFlags {
    pub auto_play: bool,
    pub turbo: bool,
}

/// Scheduled continuation, handled by the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tick {
    AnimationFrame,
    BonusFadeSpin,
    BonusActivate,
    BonusLock,
    AutoPlay,
    BigWinDismiss,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_queries() {
        let spin = ActiveSpin {
            id: 1,
            wager: Credits::units(10),
            balance_before: Credits::units(100),
            started_at_ms: 0,
            timing: TimingConfig::normal(),
            forced: ForcedOutcome::default(),
        };
        let spinning = SessionPhase::Spinning {
            spin,
            animator: SpinAnimator::new(12),
        };

        assert!(spinning.in_flight());
        assert_eq!(spinning.active_spin().map(|s| s.id), Some(1));
        assert_eq!(spinning.name(), "spinning");
        assert!(SessionPhase::default().is_idle());
        assert!(!SessionPhase::TornDown.in_flight());
    }
}
