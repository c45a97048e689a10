//! Spin outcomes and spin requests

use serde::{Deserialize, Serialize};

use crate::grid::{CellSet, Grid};
use crate::money::Credits;
use crate::multiplier::Multiplier;
use crate::paytable::LineWin;
use crate::symbols::Symbol;
use sg_stage::BigWinTier;

/// Which path resolved a spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Resolution {
    /// Multiplier draw plus payline evaluation
    Normal,
    /// Bonus event held every cell; payout boosted
    BonusForcedWin { target: Symbol },
    /// Bonus event ran out of spins; payout unboosted
    BonusSettle { target: Symbol },
}

impl Resolution {
    pub fn is_bonus(&self) -> bool {
        !matches!(self, Resolution::Normal)
    }

    pub fn is_forced_win(&self) -> bool {
        matches!(self, Resolution::BonusForcedWin { .. })
    }
}

/// Complete result of one resolved spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub spin_id: u64,
    /// Wager debited at spin start
    pub wager: Credits,
    pub grid: Grid,
    pub payout: Credits,
    pub winning_cells: CellSet,
    pub line_wins: Vec<LineWin>,
    /// Drawn multiplier (normal path only)
    pub multiplier: Option<Multiplier>,
    pub resolution: Resolution,
    /// Balance before the debit
    pub balance_before: Credits,
    /// Balance after the credit
    pub balance_after: Credits,
    /// `payout / wager`
    pub effective_multiplier: f64,
    pub big_win: Option<BigWinTier>,
    pub started_at_ms: u64,
    pub resolved_at_ms: u64,
}

impl SpinOutcome {
    pub fn is_win(&self) -> bool {
        self.payout > Credits::ZERO
    }

    /// `balance_before - wager + payout == balance_after`
    pub fn is_conserved(&self) -> bool {
        self.balance_before - self.wager + self.payout == self.balance_after
    }

    pub fn duration_ms(&self) -> u64 {
        self.resolved_at_ms.saturating_sub(self.started_at_ms)
    }
}

/// Pinned draws for one spin (testing / demo)
///
/// Unset fields fall back to the machine's entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ForcedOutcome {
    /// Candidate grid after the animation
    pub grid: Option<Grid>,
    /// Force the bonus trigger on or off
    pub bonus: Option<bool>,
    /// Force the multiplier draw (normal path)
    pub multiplier: Option<Option<Multiplier>>,
    /// Force the bonus target
    pub bonus_target: Option<Symbol>,
}

impl ForcedOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn with_bonus(mut self, bonus: bool) -> Self {
        self.bonus = Some(bonus);
        self
    }

    pub fn with_multiplier(mut self, multiplier: Option<Multiplier>) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    pub fn with_bonus_target(mut self, target: Symbol) -> Self {
        self.bonus = Some(true);
        self.bonus_target = Some(target);
        self
    }
}

/// Answer to a spin request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpinRequest {
    /// Wager debited, animation running
    Started { spin_id: u64 },
    /// A spin is already in flight; nothing changed
    InFlight,
    /// Balance below wager; nothing debited
    Refused { balance: Credits, wager: Credits },
    /// Machine torn down
    TornDown,
}

impl SpinRequest {
    pub fn is_started(&self) -> bool {
        matches!(self, SpinRequest::Started { .. })
    }

    pub fn spin_id(&self) -> Option<u64> {
        match self {
            SpinRequest::Started { spin_id } => Some(*spin_id),
            _ => None,
        }
    }
}

/// Big win overlay currently shown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BigWinPresentation {
    pub tier: BigWinTier,
    pub effective_multiplier: f64,
    pub payout: Credits,
    pub shown_at_ms: u64,
    pub dismiss_at_ms: u64,
}

impl BigWinPresentation {
    pub fn title(&self) -> &'static str {
        self.tier.display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forced_outcome_builder() {
        let forced = ForcedOutcome::new()
            .with_grid(Grid::filled(Symbol::Bell))
            .with_multiplier(None)
            .with_bonus_target(Symbol::Cherry);

        assert_eq!(forced.grid, Some(Grid::filled(Symbol::Bell)));
        assert_eq!(forced.multiplier, Some(None));
        assert_eq!(forced.bonus, Some(true));
        assert_eq!(forced.bonus_target, Some(Symbol::Cherry));
    }

    #[test]
    fn test_spin_request_serialization() {
        let json = serde_json::to_string(&SpinRequest::Started { spin_id: 3 }).unwrap();
        assert_eq!(json, r#"{"type":"started","spin_id":3}"#);
        assert_eq!(SpinRequest::Started { spin_id: 3 }.spin_id(), Some(3));
        assert_eq!(SpinRequest::InFlight.spin_id(), None);
    }

    #[test]
    fn test_resolution_flags() {
        assert!(!Resolution::Normal.is_bonus());
        let forced = Resolution::BonusForcedWin {
            target: Symbol::Dragon,
        };
        assert!(forced.is_bonus() && forced.is_forced_win());
    }
}
