//! StageEvent — A stage occurrence with metadata
//!
//! Wraps a Stage with its virtual timestamp and the spin it belongs to.

use serde::{Deserialize, Serialize};

use crate::stage::Stage;

/// A stage event with full metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEvent {
    /// The canonical stage
    pub stage: Stage,

    /// Session clock in milliseconds
    pub timestamp_ms: u64,

    /// Spin the stage belongs to (none for session-level stages)
    #[serde(default)]
    pub spin_id: Option<u64>,

    /// Custom tags for filtering/routing
    #[serde(default)]
    pub tags: Vec<String>,
}

impl StageEvent {
    /// Create a new stage event
    pub fn new(stage: Stage, timestamp_ms: u64) -> Self {
        Self {
            stage,
            timestamp_ms,
            spin_id: None,
            tags: Vec::new(),
        }
    }

    /// Attach the owning spin
    pub fn with_spin(mut self, spin_id: Option<u64>) -> Self {
        self.spin_id = spin_id;
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Get stage type name
    pub fn type_name(&self) -> &'static str {
        self.stage.type_name()
    }
}
