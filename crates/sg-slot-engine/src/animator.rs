//! Spin animation
//!
//! A spin shows `frame_count` fully random grids, one per tick. On the
//! last tick a fresh grid is drawn immediately and becomes the candidate
//! final grid. The animator holds no timers; the machine schedules one
//! tick per `frame_delay_ms`.

use serde::{Deserialize, Serialize};

use crate::entropy::EntropySource;
use crate::grid::Grid;

/// One animation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStep {
    /// Intermediate frame; more ticks follow
    Frame { index: u32, grid: Grid },
    /// Last frame plus the candidate final grid
    Final {
        index: u32,
        frame: Grid,
        candidate: Grid,
    },
}

/// Frame counter for one spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinAnimator {
    frame_count: u32,
    shown: u32,
}

impl SpinAnimator {
    /// At least one frame is always shown
    pub fn new(frame_count: u32) -> Self {
        Self {
            frame_count: frame_count.max(1),
            shown: 0,
        }
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn frames_shown(&self) -> u32 {
        self.shown
    }

    pub fn is_finished(&self) -> bool {
        self.shown >= self.frame_count
    }

    /// Draw the next frame
    ///
    /// Ticking past the final step keeps returning `Final` with fresh
    /// grids; the machine never does so.
    pub fn tick<E: EntropySource + ?Sized>(&mut self, entropy: &mut E) -> AnimationStep {
        let index = self.shown;
        self.shown = self.shown.saturating_add(1);
        let frame = Grid::random(entropy);

        if self.shown >= self.frame_count {
            AnimationStep::Final {
                index,
                frame,
                candidate: Grid::random(entropy),
            }
        } else {
            AnimationStep::Frame { index, grid: frame }
        }
    }
}

/// Run a whole animation without timers, returning the candidate grid
pub fn animate<E, F>(entropy: &mut E, frame_count: u32, mut on_frame: F) -> Grid
where
    E: EntropySource + ?Sized,
    F: FnMut(u32, &Grid),
{
    let mut animator = SpinAnimator::new(frame_count);
    loop {
        match animator.tick(entropy) {
            AnimationStep::Frame { index, grid } => on_frame(index, &grid),
            AnimationStep::Final {
                index,
                frame,
                candidate,
            } => {
                on_frame(index, &frame);
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::ScriptedEntropy;
    use crate::symbols::Symbol;

    #[test]
    fn test_frame_count_and_candidate() {
        let mut entropy = ScriptedEntropy::new();
        let mut animator = SpinAnimator::new(3);

        assert!(matches!(animator.tick(&mut entropy), AnimationStep::Frame { index: 0, .. }));
        assert!(matches!(animator.tick(&mut entropy), AnimationStep::Frame { index: 1, .. }));
        assert!(matches!(animator.tick(&mut entropy), AnimationStep::Final { index: 2, .. }));
        assert!(animator.is_finished());
    }

    #[test]
    fn test_zero_frames_clamped() {
        let animator = SpinAnimator::new(0);
        assert_eq!(animator.frame_count(), 1);
    }

    #[test]
    fn test_candidate_drawn_after_last_frame() {
        // 2 frames × 9 cells, then the candidate's 9 cells
        let indices = std::iter::repeat_n(1, 18).chain(std::iter::repeat_n(4, 9));
        let mut entropy = ScriptedEntropy::new().with_indices(indices);

        let mut frames = Vec::new();
        let candidate = animate(&mut entropy, 2, |index, grid| frames.push((index, *grid)));

        assert_eq!(frames.len(), 2);
        assert!(frames.iter().all(|(_, g)| *g == Grid::filled(Symbol::Clover)));
        assert_eq!(candidate, Grid::filled(Symbol::Cherry));
        assert_eq!(entropy.remaining(), (0, 0));
    }
}
