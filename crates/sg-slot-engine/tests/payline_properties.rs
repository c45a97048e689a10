//! Payline property tests for sg-slot-engine
//!
//! - Lines are additive and rounded once
//! - No line is counted twice
//! - An all-wild line always pays the wild value
//! - Winning cells are exactly the union of paying lines

use proptest::prelude::*;
use sg_slot_engine::{
    Cell, CellSet, Credits, Grid, Multiplier, PAYLINES, Symbol, evaluate, evaluate_line,
};

// ─────────────────────────────────────────────────────────────────────────────
// Strategies
// ─────────────────────────────────────────────────────────────────────────────

fn arb_symbol() -> impl Strategy<Value = Symbol> {
    (0..Symbol::ALL.len()).prop_map(|i| Symbol::ALL[i])
}

/// Grids skewed toward matches so paying lines actually show up
fn arb_grid() -> impl Strategy<Value = Grid> {
    let sparse = prop::collection::vec(arb_symbol(), 9);
    let dense = prop::collection::vec(
        prop_oneof![Just(Symbol::Dragon), Just(Symbol::Bell), Just(Symbol::WILD)],
        9,
    );
    prop_oneof![sparse, dense].prop_map(|cells| {
        let mut grid = Grid::filled(Symbol::Star);
        for (cell, symbol) in Cell::all().zip(cells) {
            grid.set(cell, symbol);
        }
        grid
    })
}

fn arb_wager() -> impl Strategy<Value = Credits> {
    (100i64..100_000).prop_map(Credits::from_cents)
}

fn arb_multiplier() -> impl Strategy<Value = Option<Multiplier>> {
    prop_oneof![
        Just(None),
        Just(Some(Multiplier::X2)),
        Just(Some(Multiplier::X5)),
        Just(Some(Multiplier::X10)),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    /// Total payout is the multiplied sum of independent lines, rounded once
    #[test]
    fn prop_lines_are_additive(grid in arb_grid(), wager in arb_wager(), multiplier in arb_multiplier()) {
        let eval = evaluate(&grid, wager, multiplier);

        let basis: i64 = PAYLINES
            .iter()
            .filter_map(|line| evaluate_line(&grid, line, wager))
            .map(|win| win.basis)
            .sum();
        let factor = multiplier.map_or(1, |m| i64::from(m.factor()));

        prop_assert_eq!(eval.payout, Credits::from_basis(basis * factor));
        prop_assert_eq!(eval.line_wins.iter().map(|w| w.basis).sum::<i64>(), basis);
    }

    /// Each payline contributes at most once
    #[test]
    fn prop_no_line_counted_twice(grid in arb_grid(), wager in arb_wager()) {
        let eval = evaluate(&grid, wager, None);

        prop_assert!(eval.line_count() <= PAYLINES.len());
        let indices: Vec<u8> = eval.line_wins.iter().map(|w| w.line_index).collect();
        prop_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));

        for win in &eval.line_wins {
            let expected = if win.wild_count == 3 { Symbol::WILD } else { win.symbol };
            prop_assert_eq!(win.symbol, expected);
            prop_assert_eq!(win.basis, wager.basis_times(win.symbol.pay_value()));
        }
    }

    /// A line of three wilds pays wager × the wild's value
    #[test]
    fn prop_all_wild_line_pays_wild_value(grid in arb_grid(), wager in arb_wager(), line in 0..PAYLINES.len()) {
        let payline = &PAYLINES[line];
        let mut grid = grid;
        for cell in payline.cells {
            grid.set(cell, Symbol::WILD);
        }

        let win = evaluate_line(&grid, payline, wager);
        prop_assert!(win.is_some());
        let win = win.unwrap();
        prop_assert_eq!(win.symbol, Symbol::WILD);
        prop_assert_eq!(win.wild_count, 3);
        prop_assert_eq!(win.basis, wager.cents() * 800);
    }

    /// Highlights are the union of the paying lines' cells
    #[test]
    fn prop_winning_cells_are_union(grid in arb_grid(), wager in arb_wager()) {
        let eval = evaluate(&grid, wager, None);
        let union: CellSet = eval.line_wins.iter().flat_map(|w| w.cells).collect();

        prop_assert_eq!(&eval.winning_cells, &union);
        prop_assert_eq!(eval.is_win(), !union.is_empty());
    }

    /// A drawn multiplier never lowers the payout
    #[test]
    fn prop_multiplier_never_lowers_payout(grid in arb_grid(), wager in arb_wager(), multiplier in arb_multiplier()) {
        let plain = evaluate(&grid, wager, None).payout;
        let boosted = evaluate(&grid, wager, multiplier).payout;
        prop_assert!(boosted >= plain);
    }
}
