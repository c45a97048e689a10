//! Timing profiles for the spin animation and auto-play cadence

use serde::{Deserialize, Serialize};

/// Timing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Normal gameplay timing
    #[default]
    Normal,
    /// Fast/Turbo mode
    Turbo,
}

impl TimingProfile {
    pub fn from_turbo(turbo: bool) -> Self {
        if turbo { Self::Turbo } else { Self::Normal }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Turbo => "Turbo",
        }
    }
}

/// Detailed timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Profile type
    pub profile: TimingProfile,

    /// Random grids shown before the candidate grid
    pub frame_count: u32,

    /// Delay between animation frames (ms)
    pub frame_delay_ms: u64,

    /// Pause before auto-play starts the next spin (ms)
    pub auto_play_pause_ms: u64,

    /// Big win overlay lifetime (ms)
    pub big_win_display_ms: u64,
}

impl TimingConfig {
    /// Normal gameplay timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            frame_count: 12,
            frame_delay_ms: 100,
            auto_play_pause_ms: 700,
            big_win_display_ms: 3000,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            frame_count: 6,
            frame_delay_ms: 60,
            auto_play_pause_ms: 150,
            big_win_display_ms: 3000,
        }
    }

    /// Wall time from spin start to candidate grid
    pub fn animation_duration_ms(&self) -> u64 {
        u64::from(self.frame_count) * self.frame_delay_ms
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

/// Both profiles, switchable at runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingProfiles {
    pub normal: TimingConfig,
    pub turbo: TimingConfig,
}

impl Default for TimingProfiles {
    fn default() -> Self {
        Self {
            normal: TimingConfig::normal(),
            turbo: TimingConfig::turbo(),
        }
    }
}

impl TimingProfiles {
    pub fn get(&self, profile: TimingProfile) -> &TimingConfig {
        match profile {
            TimingProfile::Normal => &self.normal,
            TimingProfile::Turbo => &self.turbo,
        }
    }
}
