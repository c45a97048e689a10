//! The 3×3 symbol grid

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entropy::EntropySource;
use crate::symbols::Symbol;

pub const ROWS: usize = 3;
pub const COLS: usize = 3;

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Every cell, row-major
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..ROWS as u8).flat_map(|row| (0..COLS as u8).map(move |col| Cell::new(row, col)))
    }
}

/// Set of highlighted cells; inserting twice is a no-op
pub type CellSet = BTreeSet<Cell>;

/// A fully populated 3×3 grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    rows: [[Symbol; COLS]; ROWS],
}

impl Grid {
    /// Build from rows (top to bottom)
    pub const fn from_rows(rows: [[Symbol; COLS]; ROWS]) -> Self {
        Self { rows }
    }

    /// Every cell holds the same symbol
    pub const fn filled(symbol: Symbol) -> Self {
        Self {
            rows: [[symbol; COLS]; ROWS],
        }
    }

    /// Draw every cell independently (with replacement)
    pub fn random<E: EntropySource + ?Sized>(entropy: &mut E) -> Self {
        let mut rows = [[Symbol::Dragon; COLS]; ROWS];
        for row in rows.iter_mut() {
            for cell in row.iter_mut() {
                *cell = Symbol::draw(entropy);
            }
        }
        Self { rows }
    }

    /// Parse a grid from glyph rows, e.g. `["🐉🐉🐉", "🍀💰🔔", "⭐🍒💎"]`
    pub fn from_glyph_rows(rows: [&str; ROWS]) -> Option<Self> {
        let mut grid = [[Symbol::Dragon; COLS]; ROWS];
        for (r, text) in rows.iter().enumerate() {
            let mut symbols = Vec::with_capacity(COLS);
            let mut rest = *text;
            while !rest.is_empty() {
                let symbol = Symbol::ALL
                    .into_iter()
                    .find(|s| rest.starts_with(s.glyph()))?;
                symbols.push(symbol);
                rest = &rest[symbol.glyph().len()..];
            }
            if symbols.len() != COLS {
                return None;
            }
            grid[r].copy_from_slice(&symbols);
        }
        Some(Self { rows: grid })
    }

    pub fn get(&self, cell: Cell) -> Symbol {
        self.rows[cell.row as usize][cell.col as usize]
    }

    pub fn set(&mut self, cell: Cell, symbol: Symbol) {
        self.rows[cell.row as usize][cell.col as usize] = symbol;
    }

    pub fn rows(&self) -> &[[Symbol; COLS]; ROWS] {
        &self.rows
    }

    /// Iterate `(cell, symbol)` row-major
    pub fn cells(&self) -> impl Iterator<Item = (Cell, Symbol)> + '_ {
        Cell::all().map(move |cell| (cell, self.get(cell)))
    }

    /// Count cells matching a predicate
    pub fn count_where(&self, mut predicate: impl FnMut(Symbol) -> bool) -> usize {
        self.cells().filter(|(_, s)| predicate(*s)).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for symbol in row {
                f.write_str(symbol.glyph())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::ScriptedEntropy;

    #[test]
    fn test_cells_row_major() {
        let cells: Vec<_> = Cell::all().collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[5], Cell::new(1, 2));
        assert_eq!(cells[8], Cell::new(2, 2));
    }

    #[test]
    fn test_random_grid_draws_nine_cells() {
        let mut entropy = ScriptedEntropy::new().with_indices(0..9);
        let grid = Grid::random(&mut entropy);
        assert_eq!(grid.get(Cell::new(0, 0)), Symbol::Dragon);
        assert_eq!(grid.get(Cell::new(1, 0)), Symbol::Bell);
        assert_eq!(grid.get(Cell::new(2, 0)), Symbol::Diamond);
        // 8 % 7 = 1
        assert_eq!(grid.get(Cell::new(2, 2)), Symbol::Clover);
        assert_eq!(entropy.remaining(), (0, 0));
    }

    #[test]
    fn test_glyph_rows() {
        let grid = Grid::from_glyph_rows(["🐉🐉🐉", "🍀💰🔔", "⭐🍒💎"]).unwrap();
        assert_eq!(grid.get(Cell::new(1, 1)), Symbol::MoneyBag);
        assert_eq!(grid.get(Cell::new(2, 2)), Symbol::Diamond);
        assert_eq!(grid.to_string(), "🐉🐉🐉\n🍀💰🔔\n⭐🍒💎");

        assert!(Grid::from_glyph_rows(["🐉🐉", "🍀💰🔔", "⭐🍒💎"]).is_none());
        assert!(Grid::from_glyph_rows(["🐉🐉x", "🍀💰🔔", "⭐🍒💎"]).is_none());
    }

    #[test]
    fn test_count_where() {
        let grid = Grid::from_glyph_rows(["💎🐉💎", "🐉🐉🐉", "⭐💎⭐"]).unwrap();
        assert_eq!(grid.count_where(|s| s.is_wild()), 3);
        assert_eq!(grid.count_where(|s| s == Symbol::Dragon), 4);
    }
}
