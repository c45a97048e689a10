//! Machine configuration
//!
//! Every section carries `#[serde(default)]`, so a config file only needs
//! the keys it changes:
//!
//! ```yaml
//! starting_balance: 250
//! bonus:
//!   trigger_probability: 0.5
//! seed: 42
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bonus::BonusConfig;
use crate::error::{SlotError, SlotResult};
use crate::ledger::{Ledger, MAX_WAGER, MIN_WAGER};
use crate::money::Credits;
use crate::multiplier::MultiplierBands;
use crate::timing::{TimingConfig, TimingProfiles};
use sg_stage::BigWinTier;

/// Configuration validation failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("starting balance {0} must be a finite, non-negative amount no larger than {max}", max = Credits::MAX)]
    InvalidBalance(f64),

    #[error("starting wager {0} must be a finite amount between 1 and {max}", max = MAX_WAGER)]
    InvalidWager(f64),

    #[error("multiplier bands must ascend within [0, 1]")]
    InvalidMultiplierBands,

    #[error("{0}")]
    InvalidBonus(String),

    #[error("big win thresholds must be positive and ascending (big <= super <= mega)")]
    InvalidThresholds,

    #[error("timing profile {0} needs a non-zero frame delay")]
    InvalidTiming(String),
}

// ═══════════════════════════════════════════════════════════════════════════════
// BIG WIN THRESHOLDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Effective-multiplier thresholds (payout / wager) per big-win tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BigWinThresholds {
    pub big: f64,
    #[serde(rename = "super")]
    pub super_win: f64,
    pub mega: f64,
}

impl Default for BigWinThresholds {
    fn default() -> Self {
        Self {
            big: 8.0,
            super_win: 10.0,
            mega: 15.0,
        }
    }
}

impl BigWinThresholds {
    /// Highest tier reached by `ratio`, if any
    pub fn tier_for(&self, ratio: f64) -> Option<BigWinTier> {
        if ratio >= self.mega {
            Some(BigWinTier::Mega)
        } else if ratio >= self.super_win {
            Some(BigWinTier::Super)
        } else if ratio >= self.big {
            Some(BigWinTier::Big)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.big > 0.0 && self.big <= self.super_win && self.super_win <= self.mega
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MACHINE CONFIG
// ═══════════════════════════════════════════════════════════════════════════════

/// Full machine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Opening balance (decimal credits)
    pub starting_balance: f64,
    /// Opening wager (decimal credits)
    pub starting_wager: f64,
    pub timing: TimingProfiles,
    pub bonus: BonusConfig,
    pub multiplier: MultiplierBands,
    pub big_win: BigWinThresholds,
    /// Entropy seed; OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            starting_balance: 1000.0,
            starting_wager: 10.0,
            timing: TimingProfiles::default(),
            bonus: BonusConfig::default(),
            multiplier: MultiplierBands::default(),
            big_win: BigWinThresholds::default(),
            seed: None,
        }
    }
}

impl MachineConfig {
    /// Parse from JSON
    pub fn from_json_str(json: &str) -> SlotResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from YAML
    pub fn from_yaml_str(yaml: &str) -> SlotResult<Self> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn from_path(path: impl AsRef<Path>) -> SlotResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Self::from_json_str(&text),
            "yaml" | "yml" => Self::from_yaml_str(&text),
            other => Err(SlotError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json_pretty(&self) -> SlotResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match Credits::from_decimal(self.starting_balance) {
            Some(balance) if !balance.is_negative() => {}
            _ => return Err(ConfigError::InvalidBalance(self.starting_balance)),
        }
        match Credits::from_decimal(self.starting_wager) {
            Some(wager) if (MIN_WAGER..=MAX_WAGER).contains(&wager) => {}
            _ => return Err(ConfigError::InvalidWager(self.starting_wager)),
        }
        if !self.multiplier.is_valid() {
            return Err(ConfigError::InvalidMultiplierBands);
        }
        if let Some(problem) = self.bonus.problems().into_iter().next() {
            return Err(ConfigError::InvalidBonus(problem));
        }
        if !self.big_win.is_valid() {
            return Err(ConfigError::InvalidThresholds);
        }
        for timing in [&self.timing.normal, &self.timing.turbo] {
            validate_timing(timing)?;
        }
        Ok(())
    }

    /// Opening balance in cents
    pub fn starting_balance_credits(&self) -> Credits {
        Credits::from_decimal(self.starting_balance).unwrap_or(Credits::ZERO)
    }

    /// Opening ledger
    pub fn ledger(&self) -> Ledger {
        Ledger::new(
            self.starting_balance_credits().max(Credits::ZERO),
            Ledger::normalize_wager(self.starting_wager),
        )
    }
}

fn validate_timing(timing: &TimingConfig) -> Result<(), ConfigError> {
    if timing.frame_delay_ms == 0 {
        return Err(ConfigError::InvalidTiming(
            timing.profile.display_name().to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = MachineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ledger().balance(), Credits::units(1000));
        assert_eq!(config.ledger().wager(), Credits::units(10));
    }

    #[test]
    fn test_tiers() {
        let t = BigWinThresholds::default();
        assert_eq!(t.tier_for(6.0), None);
        assert_eq!(t.tier_for(8.0), Some(BigWinTier::Big));
        assert_eq!(t.tier_for(12.0), Some(BigWinTier::Super));
        assert_eq!(t.tier_for(20.0), Some(BigWinTier::Mega));
    }

    #[test]
    fn test_partial_json() {
        let config = MachineConfig::from_json_str(
            r#"{ "starting_balance": 250, "bonus": { "spin_budget": 3 }, "seed": 9 }"#,
        )
        .unwrap();
        assert_eq!(config.starting_balance, 250.0);
        assert_eq!(config.bonus.spin_budget, 3);
        assert_eq!(config.bonus.lock_interval_ms, 450);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.timing.turbo.frame_count, 6);
    }

    #[test]
    fn test_yaml() {
        let yaml = "starting_wager: 2.5\nbig_win:\n  super: 11\nmultiplier:\n  x2_below: 0.3\n";
        let config = MachineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.starting_wager, 2.5);
        assert_eq!(config.big_win.super_win, 11.0);
        assert_eq!(config.multiplier.x2_below, 0.3);
        assert_eq!(config.multiplier.x10_below, 0.005);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = MachineConfig::from_json_str(r#"{ "starting_wager": 0.5 }"#).unwrap_err();
        assert!(matches!(err, SlotError::Config(ConfigError::InvalidWager(_))));

        let err = MachineConfig::from_json_str(r#"{ "bonus": { "trigger_probability": 2 } }"#)
            .unwrap_err();
        assert!(matches!(err, SlotError::Config(ConfigError::InvalidBonus(_))));

        let bad = MachineConfig {
            big_win: BigWinThresholds {
                big: 20.0,
                super_win: 10.0,
                mega: 15.0,
            },
            ..Default::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::InvalidThresholds));
    }

    #[test]
    fn test_rejects_out_of_range_amounts() {
        let err = MachineConfig::from_json_str(r#"{ "starting_balance": 1e17 }"#).unwrap_err();
        assert!(matches!(err, SlotError::Config(ConfigError::InvalidBalance(b)) if b == 1e17));

        let huge_wager = MachineConfig {
            starting_wager: 1e300,
            ..Default::default()
        };
        assert_eq!(huge_wager.validate(), Err(ConfigError::InvalidWager(1e300)));

        let at_cap = MachineConfig {
            starting_balance: 1e11,
            starting_wager: 1e11,
            ..Default::default()
        };
        assert!(at_cap.validate().is_ok());
        assert_eq!(at_cap.ledger().balance(), Credits::MAX);
        assert_eq!(at_cap.ledger().wager(), MAX_WAGER);
    }

    #[test]
    fn test_unknown_extension() {
        let path = std::env::temp_dir().join("sg-slot-engine-config-test.toml");
        std::fs::write(&path, "seed = 1").unwrap();
        let err = MachineConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, SlotError::UnsupportedFormat(ref ext) if ext == "toml"));
        let _ = std::fs::remove_file(&path);
    }
}
