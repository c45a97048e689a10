//! Lock-and-respin bonus event
//!
//! Entered on a 5% roll right after the candidate grid. The event picks a
//! non-wild target, free-spins during a fading intro, then locks
//! target/wild cells and respins the rest until the whole grid is held
//! (forced win, payout boosted) or the spin budget runs out (settle,
//! payout unboosted).
//!
//! ```text
//!   none ──trigger──▶ fading ──fade_duration──▶ active ──┬─ all held ──▶ forced win
//!                      ▲  │ (every fade_interval)        │
//!                      └──┘                              └─ budget 0 ──▶ settle
//! ```

use serde::{Deserialize, Serialize};

use crate::entropy::EntropySource;
use crate::grid::{Cell, Grid};
use crate::money::Credits;
use crate::paytable::{Evaluation, evaluate};
use crate::symbols::Symbol;

// ═══════════════════════════════════════════════════════════════════════════════
// CONFIG
// ═══════════════════════════════════════════════════════════════════════════════

/// Bonus event tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusConfig {
    /// Chance per spin that the event replaces the normal path
    pub trigger_probability: f64,
    /// Free-spin cadence while fading (ms)
    pub fade_interval_ms: u64,
    /// Fading intro length before locking starts (ms)
    pub fade_duration_ms: u64,
    /// Lock-and-respin cadence (ms)
    pub lock_interval_ms: u64,
    /// Lock ticks before the event settles
    pub spin_budget: u32,
    /// Payout factor on a forced win
    pub boost_factor: u32,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            trigger_probability: 0.05,
            fade_interval_ms: 250,
            fade_duration_ms: 1500,
            lock_interval_ms: 450,
            spin_budget: 6,
            boost_factor: 10,
        }
    }
}

impl BonusConfig {
    /// Trigger roll; `roll` is uniform in `[0, 1)`
    pub fn triggers(&self, roll: f64) -> bool {
        roll < self.trigger_probability
    }

    /// Problems with this config, empty when valid
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !(0.0..=1.0).contains(&self.trigger_probability) {
            problems.push(format!(
                "bonus trigger_probability {} outside [0, 1]",
                self.trigger_probability
            ));
        }
        if self.spin_budget == 0 {
            problems.push("bonus spin_budget must be at least 1".to_string());
        }
        if self.boost_factor == 0 {
            problems.push("bonus boost_factor must be at least 1".to_string());
        }
        if self.fade_interval_ms == 0 || self.lock_interval_ms == 0 {
            problems.push("bonus intervals must be non-zero".to_string());
        }
        problems
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// STATE
// ═══════════════════════════════════════════════════════════════════════════════

/// Bonus phase as seen by observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusPhase {
    #[default]
    None,
    Fading,
    Active,
}

/// Observer snapshot of the bonus event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BonusEventState {
    pub phase: BonusPhase,
    pub target: Option<Symbol>,
    pub spins_remaining: u32,
}

impl BonusEventState {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.phase != BonusPhase::None
    }
}

/// Result of one lock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStep {
    /// Respun grid, more ticks follow
    Continue(Grid),
    /// Every cell is target or wild
    ForcedWin(Grid),
    /// Budget exhausted
    Settle(Grid),
}

impl LockStep {
    pub fn grid(&self) -> &Grid {
        match self {
            LockStep::Continue(g) | LockStep::ForcedWin(g) | LockStep::Settle(g) => g,
        }
    }
}

/// A running bonus event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusEvent {
    target: Symbol,
    phase: BonusPhase,
    spins_remaining: u32,
    fade_spins: u32,
}

impl BonusEvent {
    /// Start fading with a uniformly drawn non-wild target
    pub fn enter<E: EntropySource + ?Sized>(entropy: &mut E) -> Self {
        Self::with_target(Symbol::draw_non_wild(entropy))
    }

    /// Start fading with a fixed target
    ///
    /// A wild target is swapped for the first non-wild symbol.
    pub fn with_target(target: Symbol) -> Self {
        let target = if target.is_wild() {
            Symbol::NON_WILD[0]
        } else {
            target
        };
        Self {
            target,
            phase: BonusPhase::Fading,
            spins_remaining: 0,
            fade_spins: 0,
        }
    }

    pub fn target(&self) -> Symbol {
        self.target
    }

    pub fn phase(&self) -> BonusPhase {
        self.phase
    }

    pub fn spins_remaining(&self) -> u32 {
        self.spins_remaining
    }

    pub fn fade_spins(&self) -> u32 {
        self.fade_spins
    }

    pub fn state(&self) -> BonusEventState {
        BonusEventState {
            phase: self.phase,
            target: Some(self.target),
            spins_remaining: self.spins_remaining,
        }
    }

    /// Whether a symbol is held during locking
    pub fn is_locked(&self, symbol: Symbol) -> bool {
        symbol == self.target || symbol.is_wild()
    }

    /// Free spin during the fading intro (no locking)
    pub fn fade_spin<E: EntropySource + ?Sized>(&mut self, entropy: &mut E) -> Grid {
        self.fade_spins += 1;
        Grid::random(entropy)
    }

    /// Switch to the locking phase with a full budget
    pub fn activate(&mut self, config: &BonusConfig) {
        self.phase = BonusPhase::Active;
        self.spins_remaining = config.spin_budget.max(1);
    }

    /// Hold target/wild cells and redraw the rest, row-major
    pub fn relock<E: EntropySource + ?Sized>(&self, grid: &Grid, entropy: &mut E) -> Grid {
        let mut next = *grid;
        for cell in Cell::all() {
            if !self.is_locked(grid.get(cell)) {
                next.set(cell, Symbol::draw(entropy));
            }
        }
        next
    }

    /// One lock-and-respin tick
    pub fn lock_tick<E: EntropySource + ?Sized>(&mut self, grid: &Grid, entropy: &mut E) -> LockStep {
        let next = self.relock(grid, entropy);

        if next.count_where(|s| self.is_locked(s)) == next.cells().count() {
            self.finish();
            return LockStep::ForcedWin(next);
        }

        self.spins_remaining = self.spins_remaining.saturating_sub(1);
        if self.spins_remaining == 0 {
            self.finish();
            LockStep::Settle(next)
        } else {
            LockStep::Continue(next)
        }
    }

    fn finish(&mut self) {
        self.phase = BonusPhase::None;
        self.spins_remaining = 0;
    }
}

/// Forced win: the grid evaluated with no multiplier, then boosted
pub fn resolve_forced_win(grid: &Grid, wager: Credits, config: &BonusConfig) -> Evaluation {
    evaluate(grid, wager, None).boosted(config.boost_factor)
}

/// Exhaustion: the grid evaluated with no multiplier and no boost
pub fn resolve_settle(grid: &Grid, wager: Credits) -> Evaluation {
    evaluate(grid, wager, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::ScriptedEntropy;

    fn grid(rows: [&str; 3]) -> Grid {
        Grid::from_glyph_rows(rows).unwrap()
    }

    #[test]
    fn test_trigger_threshold() {
        let config = BonusConfig::default();
        assert!(config.triggers(0.0));
        assert!(config.triggers(0.049));
        assert!(!config.triggers(0.05));
        assert!(config.problems().is_empty());
    }

    #[test]
    fn test_invalid_config() {
        let config = BonusConfig {
            trigger_probability: 1.5,
            spin_budget: 0,
            boost_factor: 0,
            ..Default::default()
        };
        assert_eq!(config.problems().len(), 3);
    }

    #[test]
    fn test_target_never_wild() {
        // index 6 would be the wild in the full alphabet; wraps to 0 among six
        let mut entropy = ScriptedEntropy::new().with_indices([6]);
        let event = BonusEvent::enter(&mut entropy);
        assert_eq!(event.target(), Symbol::Dragon);
        assert_eq!(BonusEvent::with_target(Symbol::WILD).target(), Symbol::Dragon);
    }

    #[test]
    fn test_relock_holds_target_and_wild() {
        let event = BonusEvent::with_target(Symbol::Bell);
        let start = grid(["🔔💎⭐", "🍒🔔🍀", "🐉💰🔔"]);
        // five unlocked cells all redraw to bells (index 3)
        let mut entropy = ScriptedEntropy::new().with_fallback_index(3);
        let next = event.relock(&start, &mut entropy);
        assert_eq!(next.count_where(|s| event.is_locked(s)), 9);
        assert_eq!(next.get(Cell::new(0, 1)), Symbol::Diamond);
    }

    #[test]
    fn test_forced_win_ends_event() {
        let config = BonusConfig::default();
        let mut event = BonusEvent::with_target(Symbol::Bell);
        event.activate(&config);
        assert_eq!(event.state().spins_remaining, 6);

        let start = grid(["🔔💎⭐", "🍒🔔🍀", "🐉💰🔔"]);
        let mut entropy = ScriptedEntropy::new().with_fallback_index(3);
        let step = event.lock_tick(&start, &mut entropy);

        assert!(matches!(step, LockStep::ForcedWin(_)));
        assert_eq!(event.phase(), BonusPhase::None);

        // five bell lines at wager 1, boosted ×10
        let eval = resolve_forced_win(step.grid(), Credits::units(1), &config);
        assert_eq!(eval.payout, Credits::units(50));
    }

    #[test]
    fn test_exhaustion_settles_unboosted() {
        let config = BonusConfig::default();
        let mut event = BonusEvent::with_target(Symbol::Dragon);
        event.activate(&config);

        // unlocked cells always redraw to star (index 5): never all held
        let mut entropy = ScriptedEntropy::new().with_fallback_index(5);
        let mut current = grid(["🐉⭐⭐", "⭐⭐⭐", "⭐⭐⭐"]);
        let mut ticks = 0;
        let last = loop {
            ticks += 1;
            match event.lock_tick(&current, &mut entropy) {
                LockStep::Continue(g) => current = g,
                LockStep::Settle(g) => break g,
                LockStep::ForcedWin(_) => panic!("grid can never be fully held"),
            }
        };

        assert_eq!(ticks, 6);
        assert_eq!(event.state().spins_remaining, 0);
        // rows 1, 2 and the anti-diagonal pay star
        let eval = resolve_settle(&last, Credits::units(10));
        assert_eq!(eval.payout, Credits::units(6));
        assert_eq!(eval.multiplier, None);
    }
}
