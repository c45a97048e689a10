//! Session statistics

use serde::{Deserialize, Serialize};

use crate::money::Credits;
use crate::outcome::{Resolution, SpinOutcome};
use sg_stage::BigWinTier;

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub refused_spins: u64,
    pub total_wagered: Credits,
    pub total_won: Credits,
    pub wins: u64,
    pub losses: u64,
    pub bonus_events: u64,
    pub bonus_forced_wins: u64,
    pub multipliers_drawn: u64,
    pub big_wins: u64,
    pub super_wins: u64,
    pub mega_wins: u64,
    pub max_win: Credits,
    pub max_effective_multiplier: f64,
}

impl SessionStats {
    /// Fold one resolved spin in
    pub fn record(&mut self, outcome: &SpinOutcome) {
        self.total_spins += 1;
        self.total_wagered += outcome.wager;
        self.total_won += outcome.payout;

        if outcome.is_win() {
            self.wins += 1;
        } else {
            self.losses += 1;
        }

        match outcome.resolution {
            Resolution::Normal => {
                if outcome.multiplier.is_some() {
                    self.multipliers_drawn += 1;
                }
            }
            Resolution::BonusForcedWin { .. } => {
                self.bonus_events += 1;
                self.bonus_forced_wins += 1;
            }
            Resolution::BonusSettle { .. } => self.bonus_events += 1,
        }

        match outcome.big_win {
            Some(BigWinTier::Big) => self.big_wins += 1,
            Some(BigWinTier::Super) => self.super_wins += 1,
            Some(BigWinTier::Mega) => self.mega_wins += 1,
            None => {}
        }

        self.max_win = self.max_win.max(outcome.payout);
        self.max_effective_multiplier = self
            .max_effective_multiplier
            .max(outcome.effective_multiplier);
    }

    pub fn record_refusal(&mut self) {
        self.refused_spins += 1;
    }

    /// Calculate RTP
    pub fn rtp(&self) -> f64 {
        if self.total_wagered > Credits::ZERO {
            self.total_won.ratio_to(self.total_wagered) * 100.0
        } else {
            0.0
        }
    }

    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Net result for the player (won minus wagered)
    pub fn net(&self) -> Credits {
        self.total_won - self.total_wagered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellSet, Grid};
    use crate::symbols::Symbol;

    fn outcome(wager: i64, payout: i64, resolution: Resolution) -> SpinOutcome {
        let wager = Credits::units(wager);
        let payout = Credits::units(payout);
        SpinOutcome {
            spin_id: 1,
            wager,
            grid: Grid::filled(Symbol::Star),
            payout,
            winning_cells: CellSet::new(),
            line_wins: Vec::new(),
            multiplier: None,
            resolution,
            balance_before: Credits::units(100),
            balance_after: Credits::units(100) - wager + payout,
            effective_multiplier: payout.ratio_to(wager),
            big_win: None,
            started_at_ms: 0,
            resolved_at_ms: 1200,
        }
    }

    #[test]
    fn test_record_and_rates() {
        let mut stats = SessionStats::default();
        stats.record(&outcome(10, 0, Resolution::Normal));
        stats.record(&outcome(10, 30, Resolution::Normal));
        stats.record(&outcome(
            10,
            0,
            Resolution::BonusSettle {
                target: Symbol::Bell,
            },
        ));
        stats.record_refusal();

        assert_eq!(stats.total_spins, 3);
        assert_eq!(stats.refused_spins, 1);
        assert_eq!(stats.total_wagered, Credits::units(30));
        assert_eq!(stats.total_won, Credits::units(30));
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 2);
        assert_eq!(stats.bonus_events, 1);
        assert_eq!(stats.max_win, Credits::units(30));
        assert!((stats.rtp() - 100.0).abs() < 1e-9);
        assert!((stats.hit_rate() - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.net(), Credits::ZERO);
    }

    #[test]
    fn test_empty_rates() {
        let stats = SessionStats::default();
        assert_eq!(stats.rtp(), 0.0);
        assert_eq!(stats.hit_rate(), 0.0);
    }
}
