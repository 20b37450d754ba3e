//! Game configuration with documented constants
//!
//! Every orchestration tunable lives here. Per-type stat tables (creature,
//! hero, room costs) are fixed match tables on their enums instead.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, UnderlordError};
use crate::core::types::Seconds;

/// Configuration for the dungeon simulation
///
/// Defaults reproduce the standard game pacing. A TOML file only needs to
/// name the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === WORLD ===
    /// Seed for grid generation and in-tick randomness.
    /// `None` draws from entropy, so every game differs.
    pub seed: Option<u64>,

    /// Number of imps present when the game is created
    pub starting_imps: u32,

    // === ECONOMY ===
    /// Gold in the treasury at game creation
    ///
    /// Deliberately above the base treasury capacity: the opening bankroll
    /// is kept, but deposits add nothing until it is spent down.
    pub starting_gold: u32,

    /// Price of summoning one imp
    pub imp_cost: u32,

    /// Seconds between wage payments
    pub wage_interval: Seconds,

    /// Happiness lost by every creature when wages cannot be paid
    pub unpaid_happiness_penalty: f32,

    // === HEART ===
    /// Heart regeneration in HP per second
    pub heart_regen_rate: f32,

    /// Seconds the heart must go undamaged before regenerating
    pub heart_regen_delay: Seconds,

    // === CREATURES ===
    /// Seconds between creature attraction attempts
    pub creature_spawn_interval: Seconds,

    /// Creatures housed per lair
    pub lair_capacity: u32,

    /// Hunger restored per feeding at a hatchery
    pub feed_amount: f32,

    /// Training progress gained per second in a training room
    ///
    /// At 2.0 a creature levels up after ~50 seconds of training.
    pub training_rate: f32,

    /// Happiness gained per second while working in a room
    pub work_happiness_rate: f32,

    /// Creatures below this happiness leave the dungeon
    pub leave_happiness_threshold: f32,

    /// Training stops having effect at this level
    pub max_creature_level: u32,

    /// Seconds before a dead creature may be respawned
    pub respawn_delay: Seconds,

    /// Fraction of the creature's base cost charged to respawn it
    pub respawn_cost_fraction: f32,

    /// Seconds a prisoner must be held before conversion
    pub prison_convert_time: Seconds,

    // === IMPS ===
    /// Imps within this many tiles of a hero drop their work and flee
    pub imp_flee_radius: u32,

    // === WAVES ===
    /// Seconds between hero waves
    pub wave_interval: Seconds,

    /// Length of the warning window before a wave arrives
    pub wave_warning: Seconds,

    // === HAZARDS ===
    /// Damage per second dealt to anything standing on lava
    pub lava_damage_per_second: f32,

    // === PRESENTATION ===
    /// Maximum number of messages kept in the player message log
    pub message_log_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            starting_imps: 3,

            starting_gold: 2000,
            imp_cost: 100,
            wage_interval: 60.0,
            unpaid_happiness_penalty: 20.0,

            heart_regen_rate: 1.0,
            heart_regen_delay: 5.0,

            creature_spawn_interval: 30.0,
            lair_capacity: 3,
            feed_amount: 30.0,
            training_rate: 2.0,
            work_happiness_rate: 0.5,
            leave_happiness_threshold: 10.0,
            max_creature_level: 10,
            respawn_delay: 30.0,
            respawn_cost_fraction: 0.5,
            prison_convert_time: 60.0,

            imp_flee_radius: 2,

            wave_interval: 120.0,
            wave_warning: 30.0,

            lava_damage_per_second: 10.0,

            message_log_capacity: 10,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.wave_interval <= 0.0 || self.wage_interval <= 0.0 {
            return Err(UnderlordError::Config(
                "wave_interval and wage_interval must be positive".into(),
            ));
        }

        if self.creature_spawn_interval <= 0.0 {
            return Err(UnderlordError::Config(
                "creature_spawn_interval must be positive".into(),
            ));
        }

        if self.wave_warning < 0.0 || self.wave_warning >= self.wave_interval {
            return Err(UnderlordError::Config(format!(
                "wave_warning ({}) must be within [0, wave_interval ({}))",
                self.wave_warning, self.wave_interval
            )));
        }

        if !(0.0..=1.0).contains(&self.respawn_cost_fraction) {
            return Err(UnderlordError::Config(format!(
                "respawn_cost_fraction ({}) must be within [0, 1]",
                self.respawn_cost_fraction
            )));
        }

        if self.lair_capacity == 0 {
            return Err(UnderlordError::Config("lair_capacity must be at least 1".into()));
        }

        if self.message_log_capacity == 0 {
            return Err(UnderlordError::Config(
                "message_log_capacity must be at least 1".into(),
            ));
        }

        if self.max_creature_level == 0 {
            return Err(UnderlordError::Config(
                "max_creature_level must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_overrides_only_named_keys() {
        let config = GameConfig::from_toml_str(
            r#"
            seed = 7
            wave_interval = 90.0
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.wave_interval, 90.0);
        assert_eq!(config.starting_gold, 2000);
        assert_eq!(config.lair_capacity, 3);
    }

    #[test]
    fn test_warning_longer_than_interval_is_rejected() {
        let result = GameConfig::from_toml_str(
            r#"
            wave_interval = 20.0
            wave_warning = 30.0
            "#,
        );
        assert!(matches!(result, Err(UnderlordError::Config(_))));
    }

    #[test]
    fn test_malformed_toml_is_reported() {
        let result = GameConfig::from_toml_str("wave_interval = \"soon\"");
        assert!(matches!(result, Err(UnderlordError::Toml(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = GameConfig::load("does/not/exist.toml");
        assert!(matches!(result, Err(UnderlordError::Io(_))));
    }

    #[test]
    fn test_zero_lair_capacity_is_rejected() {
        let config = GameConfig {
            lair_capacity: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
