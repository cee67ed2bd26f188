//! Game configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then environment
//! variables prefixed with `DICEMAGE_`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::engine::DEFAULT_REROLL_LIMIT;

/// Tunable match parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Maximum (and starting) health per side
    pub max_health: u32,
    /// Shield each side starts with
    pub starting_shield: u32,
    /// Mana each side starts with
    pub starting_mana: u32,
    /// Dice in each side's loadout
    pub dice_per_side: usize,
    /// Rerolls available per turn
    pub reroll_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_health: 30,
            starting_shield: 0,
            starting_mana: 0,
            dice_per_side: 3,
            reroll_limit: DEFAULT_REROLL_LIMIT,
        }
    }
}

impl GameConfig {
    /// Load configuration, layering file and environment over defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(GameConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        let config: GameConfig = figment
            .merge(Env::prefixed("DICEMAGE_"))
            .extract()
            .context("loading game configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_health == 0 {
            bail!("max_health must be at least 1");
        }
        if self.dice_per_side == 0 {
            bail!("dice_per_side must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_health, 30);
        assert_eq!(config.dice_per_side, 3);
        assert_eq!(config.reroll_limit, 3);
    }

    #[test]
    fn test_zero_health_rejected() {
        let config = GameConfig {
            max_health: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_dice_rejected() {
        let config = GameConfig {
            dice_per_side: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dicemage.toml");
        std::fs::write(&path, "max_health = 50\nreroll_limit = 1\n").unwrap();

        let config = GameConfig::load(Some(&path)).unwrap();
        assert_eq!(config.max_health, 50);
        assert_eq!(config.reroll_limit, 1);
        // Untouched keys keep their defaults
        assert_eq!(config.dice_per_side, 3);
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let config = GameConfig::load(Some(Path::new("/nonexistent/dicemage.toml"))).unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
