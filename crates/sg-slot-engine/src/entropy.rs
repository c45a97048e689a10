//! Randomness seam
//!
//! Every draw in the engine (cells, multiplier roll, bonus trigger, bonus
//! target) goes through [`EntropySource`]. Production machines use a
//! seedable ChaCha stream; tests script the exact values.

use std::collections::VecDeque;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Source of uniform draws
pub trait EntropySource {
    /// Uniform value in `[0, 1)`
    fn unit(&mut self) -> f64;

    /// Uniform index in `[0, len)`; `len` is never zero
    fn index(&mut self, len: usize) -> usize;
}

impl EntropySource for ChaCha8Rng {
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

impl EntropySource for StdRng {
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Create the default stream, reproducible when a seed is given
pub fn seeded_entropy(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_os_rng(),
    }
}

/// Scripted draws for replays and tests
///
/// Queued values are consumed first; once a queue runs dry the fallback
/// value is returned forever. Indices wrap modulo `len`.
#[derive(Debug, Clone)]
pub struct ScriptedEntropy {
    units: VecDeque<f64>,
    indices: VecDeque<usize>,
    fallback_unit: f64,
    fallback_index: usize,
}

impl ScriptedEntropy {
    /// Empty script: units fall back to 0.99 (no bonus, no multiplier),
    /// indices fall back to 0
    pub fn new() -> Self {
        Self {
            units: VecDeque::new(),
            indices: VecDeque::new(),
            fallback_unit: 0.99,
            fallback_index: 0,
        }
    }

    pub fn with_units(mut self, units: impl IntoIterator<Item = f64>) -> Self {
        self.units.extend(units);
        self
    }

    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    pub fn with_fallback_unit(mut self, unit: f64) -> Self {
        self.fallback_unit = unit;
        self
    }

    pub fn with_fallback_index(mut self, index: usize) -> Self {
        self.fallback_index = index;
        self
    }

    /// Values still queued (units, indices)
    pub fn remaining(&self) -> (usize, usize) {
        (self.units.len(), self.indices.len())
    }
}

impl Default for ScriptedEntropy {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropySource for ScriptedEntropy {
    fn unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(self.fallback_unit)
    }

    fn index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(self.fallback_index) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_streams_repeat() {
        let mut a = seeded_entropy(Some(42));
        let mut b = seeded_entropy(Some(42));
        for _ in 0..32 {
            assert_eq!(a.index(7), b.index(7));
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn test_unit_range() {
        let mut rng = seeded_entropy(Some(7));
        for _ in 0..1000 {
            let u = rng.unit();
            assert!((0.0..1.0).contains(&u));
            assert!(rng.index(9) < 9);
        }
    }

    #[test]
    fn test_scripted_fallbacks() {
        let mut script = ScriptedEntropy::new()
            .with_units([0.003])
            .with_indices([8])
            .with_fallback_index(2);

        assert_eq!(script.unit(), 0.003);
        assert_eq!(script.unit(), 0.99);
        assert_eq!(script.index(7), 1);
        assert_eq!(script.index(7), 2);
        assert_eq!(script.remaining(), (0, 0));
    }
}
