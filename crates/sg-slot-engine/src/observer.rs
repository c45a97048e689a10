//! Rendering collaborator seam
//!
//! The machine pushes every displayed grid, every stage transition and
//! every final outcome through [`SpinObserver`]. All methods default to
//! no-ops so a renderer only implements what it draws.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::outcome::SpinOutcome;
use sg_stage::{StageEvent, StageTrace};

/// What produced a displayed grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FrameKind {
    /// Random spin-animation frame
    Animation { index: u32, count: u32 },
    /// Candidate final grid
    Settled,
    /// Free spin of the bonus fading phase
    BonusFade,
    /// Lock-and-respin grid
    BonusLock { spins_remaining: u32 },
    /// Idle quick shuffle
    Shuffle,
}

/// One displayed grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameNotice {
    pub spin_id: Option<u64>,
    pub kind: FrameKind,
    pub grid: Grid,
    pub timestamp_ms: u64,
}

/// Frame sink and termination sink
pub trait SpinObserver {
    /// Called once per displayed grid
    fn on_frame(&mut self, _frame: &FrameNotice) {}

    /// Called for every stage transition
    fn on_stage(&mut self, _event: &StageEvent) {}

    /// Called exactly once per resolved spin
    fn on_spin_complete(&mut self, _outcome: &SpinOutcome) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SpinObserver for NullObserver {}

/// Observer that records stages into a [`StageTrace`]
#[derive(Debug, Clone)]
pub struct TraceObserver {
    trace: StageTrace,
    frames: u64,
    outcomes: Vec<SpinOutcome>,
}

impl TraceObserver {
    pub fn new(trace_id: impl Into<String>) -> Self {
        Self {
            trace: StageTrace::new(trace_id, "segalla-3x3"),
            frames: 0,
            outcomes: Vec::new(),
        }
    }

    pub fn trace(&self) -> &StageTrace {
        &self.trace
    }

    pub fn into_trace(self) -> StageTrace {
        self.trace
    }

    pub fn frames_seen(&self) -> u64 {
        self.frames
    }

    pub fn outcomes(&self) -> &[SpinOutcome] {
        &self.outcomes
    }
}

impl Default for TraceObserver {
    fn default() -> Self {
        Self::new("session")
    }
}

impl SpinObserver for TraceObserver {
    fn on_frame(&mut self, _frame: &FrameNotice) {
        self.frames += 1;
    }

    fn on_stage(&mut self, event: &StageEvent) {
        self.trace.push(event.clone());
    }

    fn on_spin_complete(&mut self, outcome: &SpinOutcome) {
        self.outcomes.push(outcome.clone());
    }
}
