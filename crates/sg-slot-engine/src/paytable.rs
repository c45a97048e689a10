//! Paylines and win calculation

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, CellSet, Grid};
use crate::money::Credits;
use crate::multiplier::Multiplier;
use crate::symbols::{PayValue, Symbol};

/// A payline definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Payline {
    /// Payline index (0-based)
    pub index: u8,
    /// Short name for logs
    pub name: &'static str,
    /// Cells in order
    pub cells: [Cell; 3],
}

/// The five fixed paylines: three rows and two diagonals
pub const PAYLINES: [Payline; 5] = [
    Payline {
        index: 0,
        name: "top",
        cells: [Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)],
    },
    Payline {
        index: 1,
        name: "middle",
        cells: [Cell::new(1, 0), Cell::new(1, 1), Cell::new(1, 2)],
    },
    Payline {
        index: 2,
        name: "bottom",
        cells: [Cell::new(2, 0), Cell::new(2, 1), Cell::new(2, 2)],
    },
    Payline {
        index: 3,
        name: "diagonal",
        cells: [Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 2)],
    },
    Payline {
        index: 4,
        name: "anti_diagonal",
        cells: [Cell::new(0, 2), Cell::new(1, 1), Cell::new(2, 0)],
    },
];

/// A win on a single payline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineWin {
    /// Payline index
    pub line_index: u8,
    /// Paying symbol (the wild for an all-wild line)
    pub symbol: Symbol,
    /// Wilds that substituted on this line
    pub wild_count: u8,
    /// Pay value used
    pub pay_value: PayValue,
    /// Cells of the line
    pub cells: [Cell; 3],
    /// Unrounded line amount in ten-thousandths of a unit
    pub basis: i64,
}

impl LineWin {
    /// Line amount before multiplier and rounding, as a decimal
    pub fn amount(&self) -> f64 {
        self.basis as f64 / 10_000.0
    }
}

/// Evaluate one line in isolation
pub fn evaluate_line(grid: &Grid, payline: &Payline, wager: Credits) -> Option<LineWin> {
    let symbols = payline.cells.map(|cell| grid.get(cell));
    let wild_count = symbols.iter().filter(|s| s.is_wild()).count() as u8;
    let mut non_wild = symbols.iter().copied().filter(|s| !s.is_wild());

    let symbol = match non_wild.next() {
        // All three wild: the wild pays on its own value
        None => Symbol::WILD,
        Some(first) => {
            if !non_wild.all(|s| s == first) {
                return None;
            }
            first
        }
    };

    Some(LineWin {
        line_index: payline.index,
        symbol,
        wild_count,
        pay_value: symbol.pay_value(),
        cells: payline.cells,
        basis: wager.basis_times(symbol.pay_value()),
    })
}

/// Result of evaluating a grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Paying lines
    pub line_wins: Vec<LineWin>,
    /// Union of every paying line's cells
    pub winning_cells: CellSet,
    /// Multiplier applied (normal path only)
    pub multiplier: Option<Multiplier>,
    /// Total payout, rounded to the cent
    pub payout: Credits,
}

impl Evaluation {
    /// A non-paying evaluation
    pub fn empty() -> Self {
        Self {
            line_wins: Vec::new(),
            winning_cells: CellSet::new(),
            multiplier: None,
            payout: Credits::ZERO,
        }
    }

    pub fn is_win(&self) -> bool {
        self.payout > Credits::ZERO
    }

    pub fn line_count(&self) -> usize {
        self.line_wins.len()
    }

    /// Scale the payout by a whole factor (bonus boost)
    pub fn boosted(mut self, factor: u32) -> Self {
        self.payout = self.payout.times(factor);
        self
    }
}

/// Evaluate every payline of a grid
///
/// Lines are additive; the sum is multiplied and then rounded once.
pub fn evaluate(grid: &Grid, wager: Credits, multiplier: Option<Multiplier>) -> Evaluation {
    let mut line_wins = Vec::new();
    let mut winning_cells = CellSet::new();
    let mut basis: i64 = 0;

    for payline in &PAYLINES {
        if let Some(win) = evaluate_line(grid, payline, wager) {
            basis += win.basis;
            winning_cells.extend(win.cells);
            line_wins.push(win);
        }
    }

    if let Some(m) = multiplier {
        basis *= i64::from(m.factor());
    }

    Evaluation {
        line_wins,
        winning_cells,
        multiplier,
        payout: Credits::from_basis(basis),
    }
}
