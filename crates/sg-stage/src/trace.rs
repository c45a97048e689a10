//! StageTrace — A recorded sequence of stage events for a session
//!
//! A trace captures the full timeline of one or more spins.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::StageEvent;
use crate::stage::{Stage, StageCategory};
use crate::taxonomy::BigWinTier;

/// Trace (de)serialization failure
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Trace serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A complete trace of stage events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTrace {
    /// Unique identifier for this trace
    pub trace_id: String,

    /// Game identifier
    pub game_id: String,

    /// All events in chronological order
    pub events: Vec<StageEvent>,

    /// When this trace was recorded
    pub recorded_at: DateTime<Utc>,

    /// Timing profile name in effect when recording started
    #[serde(default)]
    pub timing_profile: Option<String>,

    /// Custom metadata
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl StageTrace {
    /// Create a new empty trace
    pub fn new(trace_id: impl Into<String>, game_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            game_id: game_id.into(),
            events: Vec::new(),
            recorded_at: Utc::now(),
            timing_profile: None,
            metadata: serde_json::Map::new(),
        }
    }

    /// Add an event to the trace
    pub fn push(&mut self, event: StageEvent) {
        self.events.push(event);
    }

    /// Set timing profile name
    pub fn with_timing_profile(mut self, profile: impl Into<String>) -> Self {
        self.timing_profile = Some(profile.into());
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get total duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => last.timestamp_ms.saturating_sub(first.timestamp_ms),
            _ => 0,
        }
    }

    /// Get events by category
    pub fn events_by_category(&self, category: StageCategory) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| e.stage.category() == category)
            .collect()
    }

    /// Get events by stage type name
    pub fn events_by_type(&self, type_name: &str) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| e.stage.type_name() == type_name)
            .collect()
    }

    /// Get all events of one spin
    pub fn spin_events(&self, spin_id: u64) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| e.spin_id == Some(spin_id))
            .collect()
    }

    /// Check if trace contains a specific stage type
    pub fn has_stage(&self, type_name: &str) -> bool {
        self.events.iter().any(|e| e.stage.type_name() == type_name)
    }

    /// Sum of amounts credited across all SpinEnd events
    pub fn total_won(&self) -> f64 {
        self.events
            .iter()
            .filter_map(|e| match &e.stage {
                Stage::SpinEnd { win_amount, .. } => Some(*win_amount),
                _ => None,
            })
            .sum()
    }

    /// Get highest big win tier in trace
    pub fn max_big_win_tier(&self) -> Option<BigWinTier> {
        self.events
            .iter()
            .filter_map(|e| match &e.stage {
                Stage::BigWinStart { tier, .. } => Some(*tier),
                _ => None,
            })
            .max()
    }

    /// Validate lifecycle pairing of every recorded spin
    pub fn validate(&self) -> TraceValidation {
        let mut started = BTreeSet::new();
        let mut ended = BTreeSet::new();
        // Spin id of the bonus currently open, if any
        let mut bonus_open: Option<Option<u64>> = None;
        let mut unpaired_bonus = false;
        let mut monotonic = true;
        let mut last_ts = 0;

        for event in &self.events {
            if event.timestamp_ms < last_ts {
                monotonic = false;
            }
            last_ts = event.timestamp_ms;

            match (&event.stage, event.spin_id) {
                (Stage::SpinStart { .. }, Some(id)) => {
                    started.insert(id);
                }
                (Stage::SpinEnd { .. }, Some(id)) => {
                    ended.insert(id);
                }
                (Stage::BonusEnter { .. }, id) => {
                    if bonus_open.replace(id).is_some() {
                        unpaired_bonus = true;
                    }
                }
                (Stage::BonusExit { .. }, id) => {
                    if bonus_open.take() != Some(id) {
                        unpaired_bonus = true;
                    }
                }
                _ => {}
            }
        }

        TraceValidation {
            spins_started: started.len(),
            spins_ended: ended.len(),
            // The final spin may still be in flight when recording stops
            open_spins: started.difference(&ended).count(),
            bonus_unpaired: unpaired_bonus,
            monotonic_timestamps: monotonic,
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json_pretty(&self) -> Result<String, TraceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Validation result for a trace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceValidation {
    pub spins_started: usize,
    pub spins_ended: usize,
    pub open_spins: usize,
    /// A bonus exit without a matching enter of the same spin, or a
    /// second enter before the exit
    pub bonus_unpaired: bool,
    pub monotonic_timestamps: bool,
}

impl TraceValidation {
    /// At most one spin may be open (the one still animating)
    pub fn is_valid(&self) -> bool {
        self.open_spins <= 1 && !self.bonus_unpaired && self.monotonic_timestamps
    }

    /// Get list of warnings
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();

        if self.open_spins > 1 {
            warnings.push("More than one spin without SPIN_END");
        }
        if self.bonus_unpaired {
            warnings.push("Bonus enter/exit not paired within one spin");
        }
        if !self.monotonic_timestamps {
            warnings.push("Timestamps go backwards");
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spin(trace: &mut StageTrace, id: u64, start: u64, win: f64) {
        trace.push(
            StageEvent::new(Stage::SpinStart { wager: 10.0, balance: 990.0 }, start)
                .with_spin(Some(id)),
        );
        trace.push(StageEvent::new(Stage::SpinSettled, start + 1200).with_spin(Some(id)));
        trace.push(
            StageEvent::new(Stage::SpinEnd { win_amount: win, balance: 990.0 + win }, start + 1200)
                .with_spin(Some(id)),
        );
    }

    #[test]
    fn test_trace_totals() {
        let mut trace = StageTrace::new("t-1", "segalla");
        spin(&mut trace, 1, 0, 40.0);
        spin(&mut trace, 2, 2000, 0.0);

        assert_eq!(trace.len(), 6);
        assert_eq!(trace.total_won(), 40.0);
        assert_eq!(trace.duration_ms(), 3200);
        assert_eq!(trace.spin_events(2).len(), 3);
        assert!(trace.has_stage("spin_settled"));
        assert_eq!(trace.events_by_category(StageCategory::SpinLifecycle).len(), 6);
        assert!(trace.events_by_category(StageCategory::Bonus).is_empty());
        assert!(trace.validate().is_valid());
    }

    #[test]
    fn test_trace_validation_flags_backwards_time() {
        let mut trace = StageTrace::new("t-2", "segalla");
        spin(&mut trace, 1, 5000, 0.0);
        trace.push(StageEvent::new(Stage::AutoPlayStopped, 10));

        let validation = trace.validate();
        assert!(!validation.monotonic_timestamps);
        assert!(!validation.is_valid());
        assert_eq!(validation.warnings(), vec!["Timestamps go backwards"]);
    }

    #[test]
    fn test_trace_validation_pairs_bonus_per_spin() {
        let enter = |id| {
            StageEvent::new(Stage::BonusEnter { target: "bell".to_string() }, 0).with_spin(Some(id))
        };
        let exit = |id| {
            StageEvent::new(Stage::BonusExit { forced_win: false, win_amount: 0.0 }, 10)
                .with_spin(Some(id))
        };

        let mut paired = StageTrace::new("t-5", "segalla");
        paired.push(enter(1));
        paired.push(exit(1));
        paired.push(enter(2));
        assert!(!paired.validate().bonus_unpaired);

        let mut crossed = StageTrace::new("t-6", "segalla");
        crossed.push(enter(1));
        crossed.push(exit(2));
        let validation = crossed.validate();
        assert!(validation.bonus_unpaired);
        assert!(!validation.is_valid());
        assert_eq!(validation.warnings(), vec!["Bonus enter/exit not paired within one spin"]);

        let mut orphan = StageTrace::new("t-7", "segalla");
        orphan.push(exit(3));
        assert!(orphan.validate().bonus_unpaired);
    }

    #[test]
    fn test_max_big_win_tier() {
        let mut trace = StageTrace::new("t-3", "segalla");
        trace.push(StageEvent::new(
            Stage::BigWinStart { tier: BigWinTier::Super, effective_multiplier: 12.0 },
            0,
        ));
        trace.push(StageEvent::new(
            Stage::BigWinStart { tier: BigWinTier::Big, effective_multiplier: 8.0 },
            10,
        ));
        assert_eq!(trace.max_big_win_tier(), Some(BigWinTier::Super));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut trace = StageTrace::new("t-4", "segalla")
            .with_timing_profile("turbo")
            .with_metadata("seed", serde_json::json!(42));
        spin(&mut trace, 1, 0, 2.5);

        let json = trace.to_json_pretty().unwrap();
        let back = StageTrace::from_json(&json).unwrap();
        assert_eq!(back, trace);
        assert_eq!(back.metadata.get("seed"), Some(&serde_json::json!(42)));
    }
}
