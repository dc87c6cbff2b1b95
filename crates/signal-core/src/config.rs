//! Game Configuration
//!
//! All tunable match policy lives here and loads from a TOML file. Every
//! default matches the shipped game balance; a partial config file
//! overrides only the keys it names.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::setup;

/// Error loading or parsing a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Influence awarded to a player per action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardTable {
    /// Spread to a named faction
    pub spread_targeted: f64,
    /// Broadcast spread, awarded once regardless of faction count
    pub spread_broadcast: f64,
    pub alter: f64,
    /// Awarded regardless of how many factions actually held the fragment
    pub hide: f64,
}

impl Default for RewardTable {
    fn default() -> Self {
        Self {
            spread_targeted: 1.0,
            spread_broadcast: 0.5,
            alter: 1.5,
            hide: 0.8,
        }
    }
}

/// Belief strength applied to factions per spread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadStrengths {
    /// Applied to the one named faction
    pub targeted: f64,
    /// Applied to every faction
    pub broadcast: f64,
}

impl Default for SpreadStrengths {
    fn default() -> Self {
        Self {
            targeted: 2.0,
            broadcast: 1.0,
        }
    }
}

/// Numeric thresholds for the faction decision ladder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionThresholds {
    /// Strongest belief above this makes the faction zealous
    pub zealous_belief: f64,
    /// Strongest belief above this makes the faction aggressive
    pub aggressive_belief: f64,
    /// Strongest belief below this crashes a believing faction
    pub crash_belief_floor: f64,
    /// Belief variance above this crashes a faction with no dominant belief
    pub crash_variance_ceiling: f64,
    /// Relationship score above this qualifies a faction as allied
    pub ally_relationship: f64,
    /// Level a relationship is raised to when an alliance forms
    pub allied_level: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            zealous_belief: 15.0,
            aggressive_belief: 10.0,
            crash_belief_floor: 2.0,
            crash_variance_ceiling: 10.0,
            ally_relationship: 3.0,
            allied_level: 4.0,
        }
    }
}

/// Complete match configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Faction names, created in this order at initialization
    pub factions: Vec<String>,
    /// Fragments dealt to each player as their starting hand
    pub hand_size: usize,
    /// Factions a hide action strips the fragment from
    pub hide_targets: usize,
    /// Seconds consumed per round when the caller supplies no elapsed time
    pub round_tick_seconds: f64,
    /// Deadline for any single collaborator call
    pub oracle_timeout_ms: u64,
    /// Seed for match setup; random when absent
    pub seed: Option<u64>,
    pub rewards: RewardTable,
    pub spread: SpreadStrengths,
    pub thresholds: DecisionThresholds,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            factions: setup::default_faction_names(),
            hand_size: 3,
            hide_targets: 2,
            round_tick_seconds: 10.0,
            oracle_timeout_ms: 500,
            seed: None,
            rewards: RewardTable::default(),
            spread: SpreadStrengths::default(),
            thresholds: DecisionThresholds::default(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Checks that the configuration can host a match at all.
    pub fn validate(&self) -> Result<(), crate::GameError> {
        if self.factions.is_empty() {
            return Err(crate::GameError::Configuration(
                "at least one faction is required".to_string(),
            ));
        }
        if self.hand_size == 0 {
            return Err(crate::GameError::Configuration(
                "hand_size must be at least 1".to_string(),
            ));
        }
        if self.round_tick_seconds <= 0.0 {
            return Err(crate::GameError::Configuration(
                "round_tick_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_game_balance() {
        let config = GameConfig::default();

        assert_eq!(config.factions.len(), 5);
        assert_eq!(config.hand_size, 3);
        assert_eq!(config.hide_targets, 2);
        assert_eq!(config.rewards.spread_targeted, 1.0);
        assert_eq!(config.rewards.spread_broadcast, 0.5);
        assert_eq!(config.rewards.alter, 1.5);
        assert_eq!(config.rewards.hide, 0.8);
        assert_eq!(config.spread.targeted, 2.0);
        assert_eq!(config.spread.broadcast, 1.0);
        assert_eq!(config.thresholds.zealous_belief, 15.0);
        assert_eq!(config.thresholds.aggressive_belief, 10.0);
        assert_eq!(config.thresholds.crash_belief_floor, 2.0);
        assert_eq!(config.thresholds.ally_relationship, 3.0);
    }

    #[test]
    fn test_partial_toml_overrides_named_keys_only() {
        let config = GameConfig::from_toml(
            r#"
            hand_size = 5

            [rewards]
            alter = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(config.hand_size, 5);
        assert_eq!(config.rewards.alter, 2.0);
        // Untouched keys keep their defaults
        assert_eq!(config.rewards.hide, 0.8);
        assert_eq!(config.factions.len(), 5);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = GameConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = GameConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed.factions, config.factions);
        assert_eq!(parsed.thresholds.allied_level, config.thresholds.allied_level);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        std::fs::write(&path, "round_tick_seconds = 5.0\n").unwrap();

        let config = GameConfig::from_file(&path).unwrap();
        assert_eq!(config.round_tick_seconds, 5.0);
    }

    #[test]
    fn test_validate_rejects_empty_factions() {
        let config = GameConfig {
            factions: vec![],
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_hand() {
        let config = GameConfig {
            hand_size: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
