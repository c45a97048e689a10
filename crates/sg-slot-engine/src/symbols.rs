//! Symbol alphabet and the random symbol source

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entropy::EntropySource;

/// Pay value of a symbol, in hundredths of the wager
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayValue(u32);

impl PayValue {
    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    pub const fn hundredths(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for PayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "×{}", self.as_f64())
    }
}

/// One of the seven reel symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Symbol {
    Dragon = 0,
    Clover = 1,
    MoneyBag = 2,
    Bell = 3,
    Cherry = 4,
    Star = 5,
    /// Wild - substitutes for every other symbol
    Diamond = 6,
}

impl Symbol {
    /// Full alphabet in reel order
    pub const ALL: [Symbol; 7] = [
        Symbol::Dragon,
        Symbol::Clover,
        Symbol::MoneyBag,
        Symbol::Bell,
        Symbol::Cherry,
        Symbol::Star,
        Symbol::Diamond,
    ];

    /// Every symbol a bonus event may target
    pub const NON_WILD: [Symbol; 6] = [
        Symbol::Dragon,
        Symbol::Clover,
        Symbol::MoneyBag,
        Symbol::Bell,
        Symbol::Cherry,
        Symbol::Star,
    ];

    /// The single wild symbol
    pub const WILD: Symbol = Symbol::Diamond;

    /// Payout multiplier applied to the wager for a full line
    pub const fn pay_value(self) -> PayValue {
        let hundredths = match self {
            Symbol::Star => 20,
            Symbol::Cherry => 50,
            Symbol::MoneyBag => 75,
            Symbol::Bell => 100,
            Symbol::Clover => 200,
            Symbol::Dragon => 400,
            Symbol::Diamond => 800,
        };
        PayValue::from_hundredths(hundredths)
    }

    pub const fn is_wild(self) -> bool {
        matches!(self, Symbol::Diamond)
    }

    /// Reel glyph
    pub const fn glyph(self) -> &'static str {
        match self {
            Symbol::Dragon => "🐉",
            Symbol::Clover => "🍀",
            Symbol::MoneyBag => "💰",
            Symbol::Bell => "🔔",
            Symbol::Cherry => "🍒",
            Symbol::Star => "⭐",
            Symbol::Diamond => "💎",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Symbol::Dragon => "dragon",
            Symbol::Clover => "clover",
            Symbol::MoneyBag => "money_bag",
            Symbol::Bell => "bell",
            Symbol::Cherry => "cherry",
            Symbol::Star => "star",
            Symbol::Diamond => "diamond",
        }
    }

    /// Look up by glyph
    pub fn from_glyph(glyph: &str) -> Option<Symbol> {
        Self::ALL.into_iter().find(|s| s.glyph() == glyph)
    }

    /// Uniform draw over the whole alphabet
    pub fn draw<E: EntropySource + ?Sized>(entropy: &mut E) -> Symbol {
        Self::ALL[entropy.index(Self::ALL.len())]
    }

    /// Uniform draw over the non-wild symbols
    pub fn draw_non_wild<E: EntropySource + ?Sized>(entropy: &mut E) -> Symbol {
        Self::NON_WILD[entropy.index(Self::NON_WILD.len())]
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}
