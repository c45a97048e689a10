//! Bonus multiplier drawn on normal resolutions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entropy::EntropySource;

/// Multiplier applied to a normal-path payout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Multiplier {
    X2,
    X5,
    X10,
}

impl Multiplier {
    pub const fn factor(self) -> u32 {
        match self {
            Multiplier::X2 => 2,
            Multiplier::X5 => 5,
            Multiplier::X10 => 10,
        }
    }

    /// Display label, "—" when no multiplier was drawn
    pub fn label(multiplier: Option<Multiplier>) -> String {
        match multiplier {
            Some(m) => m.to_string(),
            None => "—".to_string(),
        }
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.factor())
    }
}

/// Probability bands, evaluated in ascending order (first match wins)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiplierBands {
    /// `r` below this → ×10
    pub x10_below: f64,
    /// `r` below this → ×5
    pub x5_below: f64,
    /// `r` below this → ×2, otherwise none
    pub x2_below: f64,
}

impl Default for MultiplierBands {
    fn default() -> Self {
        Self {
            x10_below: 0.005,
            x5_below: 0.04,
            x2_below: 0.22,
        }
    }
}

impl MultiplierBands {
    /// Map one uniform roll to a multiplier
    pub fn resolve(&self, r: f64) -> Option<Multiplier> {
        if r < self.x10_below {
            Some(Multiplier::X10)
        } else if r < self.x5_below {
            Some(Multiplier::X5)
        } else if r < self.x2_below {
            Some(Multiplier::X2)
        } else {
            None
        }
    }

    /// Draw using a single uniform roll
    pub fn draw<E: EntropySource + ?Sized>(&self, entropy: &mut E) -> Option<Multiplier> {
        self.resolve(entropy.unit())
    }

    /// Thresholds must ascend inside `[0, 1]`
    pub fn is_valid(&self) -> bool {
        let bands = [self.x10_below, self.x5_below, self.x2_below];
        bands.iter().all(|b| (0.0..=1.0).contains(b))
            && bands.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// Probability of each outcome (x10, x5, x2, none)
    pub fn probabilities(&self) -> [f64; 4] {
        [
            self.x10_below,
            self.x5_below - self.x10_below,
            self.x2_below - self.x5_below,
            1.0 - self.x2_below,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::ScriptedEntropy;

    #[test]
    fn test_resolve_bands() {
        let bands = MultiplierBands::default();
        assert_eq!(bands.resolve(0.0), Some(Multiplier::X10));
        assert_eq!(bands.resolve(0.003), Some(Multiplier::X10));
        assert_eq!(bands.resolve(0.005), Some(Multiplier::X5));
        assert_eq!(bands.resolve(0.039), Some(Multiplier::X5));
        assert_eq!(bands.resolve(0.10), Some(Multiplier::X2));
        assert_eq!(bands.resolve(0.22), None);
        assert_eq!(bands.resolve(0.50), None);
    }

    #[test]
    fn test_draw_consumes_one_roll() {
        let bands = MultiplierBands::default();
        let mut entropy = ScriptedEntropy::new().with_units([0.003, 0.10, 0.50]);
        assert_eq!(bands.draw(&mut entropy), Some(Multiplier::X10));
        assert_eq!(bands.draw(&mut entropy), Some(Multiplier::X2));
        assert_eq!(bands.draw(&mut entropy), None);
    }

    #[test]
    fn test_validation() {
        assert!(MultiplierBands::default().is_valid());
        let inverted = MultiplierBands {
            x10_below: 0.3,
            x5_below: 0.1,
            x2_below: 0.5,
        };
        assert!(!inverted.is_valid());

        let p = MultiplierBands::default().probabilities();
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!((p[3] - 0.78).abs() < 1e-12);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Multiplier::label(Some(Multiplier::X5)), "x5");
        assert_eq!(Multiplier::label(None), "—");
    }
}
