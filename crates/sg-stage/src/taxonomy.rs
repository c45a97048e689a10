//! Stage Taxonomy — Enums for presentation elements

use serde::{Deserialize, Serialize};

/// Big win tier classification
///
/// Tiers by effective multiplier (payout / wager):
/// - Big: 8x+
/// - Super: 10x+
/// - Mega: 15x+
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BigWinTier {
    Big,
    Super,
    Mega,
}

impl BigWinTier {
    /// All tiers, lowest first
    pub const ALL: [BigWinTier; 3] = [Self::Big, Self::Super, Self::Mega];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Big => "BIG WIN",
            Self::Super => "SUPER WIN",
            Self::Mega => "MEGA WIN",
        }
    }

    /// Tier level (for ordering and intensity)
    pub fn level(&self) -> u8 {
        match self {
            Self::Big => 1,
            Self::Super => 2,
            Self::Mega => 3,
        }
    }
}

impl std::fmt::Display for BigWinTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
