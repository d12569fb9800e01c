//! Tunable game constants, loaded from TOML.
//!
//! Every section falls back to its defaults when absent, so an empty file
//! (or no file at all) yields the stock game balance.

use super::error::ConfigError;
use crate::character::CharacterIntake;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub pacing: PacingConfig,
    pub combat: CombatConfig,
    pub caps: DamageCaps,
    pub normal: EncounterRules,
    pub boss: EncounterRules,
    pub progression: ProgressionConfig,
    /// Intake used by the headless runner when no save exists.
    pub new_character: Option<CharacterIntake>,
}

/// Real-time pauses between narrative beats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub round_delay_ms: u64,
    pub encounter_delay_ms: u64,
    pub recovery_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            round_delay_ms: 1000,
            encounter_delay_ms: 500,
            recovery_delay_ms: 1000,
        }
    }
}

impl PacingConfig {
    pub fn round_delay(&self) -> Duration {
        Duration::from_millis(self.round_delay_ms)
    }

    pub fn encounter_delay(&self) -> Duration {
        Duration::from_millis(self.encounter_delay_ms)
    }

    pub fn recovery_delay(&self) -> Duration {
        Duration::from_millis(self.recovery_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Chance per loop iteration that a boss encounter is attempted.
    pub boss_chance: f64,
    /// Chance that a won normal encounter drops an item.
    pub drop_chance: f64,
    /// Half-width of the uniform damage spread.
    pub damage_range: u32,
    /// Round bound for each of the pet and player phases.
    pub max_phase_rounds: u32,
    /// Spells at or above this base damage put spellcasting on cooldown.
    pub spell_cooldown_threshold: u32,
    pub spell_cooldown_divisor: u32,
    pub spell_multiplier: f64,
    /// Fraction of max HP restored after a boss defeat.
    pub boss_hp_recovery: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            boss_chance: 0.02,
            drop_chance: 0.10,
            damage_range: 5,
            max_phase_rounds: 150,
            spell_cooldown_threshold: 1301,
            spell_cooldown_divisor: 650,
            spell_multiplier: 1.01,
            boss_hp_recovery: 0.9,
        }
    }
}

/// Single-hit caps as fractions of the target's max HP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageCaps {
    pub boss: f64,
    pub enemy_low: f64,
    pub enemy_high: f64,
    pub ally_low: f64,
    pub ally_high: f64,
    /// Highest attacker level that still uses the `_low` fractions.
    pub low_band_max_level: u32,
}

impl Default for DamageCaps {
    fn default() -> Self {
        Self {
            boss: 0.25,
            enemy_low: 0.10,
            enemy_high: 0.16,
            ally_low: 0.12,
            ally_high: 0.17,
            low_band_max_level: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CritSpec {
    pub chance: f64,
    pub multiplier: f64,
}

impl CritSpec {
    pub const fn new(chance: f64, multiplier: f64) -> Self {
        Self { chance, multiplier }
    }
}

/// Crit tables and defeat penalty for one kind of encounter. A TOML section
/// overriding these must list every key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterRules {
    pub player_physical: CritSpec,
    pub player_spell: CritSpec,
    pub foe_physical: CritSpec,
    /// Fraction of current XP kept after a defeat.
    pub xp_retained_on_defeat: f64,
}

impl EncounterRules {
    pub fn normal() -> Self {
        Self {
            player_physical: CritSpec::new(0.05, 1.5),
            player_spell: CritSpec::new(0.05, 1.5),
            foe_physical: CritSpec::new(0.03, 1.5),
            xp_retained_on_defeat: 0.9,
        }
    }

    pub fn boss() -> Self {
        Self {
            player_physical: CritSpec::new(0.03, 1.5),
            player_spell: CritSpec::new(0.03, 1.5),
            foe_physical: CritSpec::new(0.05, 2.0),
            xp_retained_on_defeat: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    pub xp_base: f64,
    pub xp_exponent: f64,
    /// Chance of moving to another level-appropriate area on a level-up.
    pub wanderlust_chance: f64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            xp_base: super::constants::XP_CURVE_BASE,
            xp_exponent: super::constants::XP_CURVE_EXPONENT,
            wanderlust_chance: 0.5,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pacing: PacingConfig::default(),
            combat: CombatConfig::default(),
            caps: DamageCaps::default(),
            normal: EncounterRules::normal(),
            boss: EncounterRules::boss(),
            progression: ProgressionConfig::default(),
            new_character: None,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("combat.boss_chance", self.combat.boss_chance),
            ("combat.drop_chance", self.combat.drop_chance),
            ("combat.boss_hp_recovery", self.combat.boss_hp_recovery),
            ("progression.wanderlust_chance", self.progression.wanderlust_chance),
            ("normal.player_physical.chance", self.normal.player_physical.chance),
            ("normal.player_spell.chance", self.normal.player_spell.chance),
            ("normal.foe_physical.chance", self.normal.foe_physical.chance),
            ("normal.xp_retained_on_defeat", self.normal.xp_retained_on_defeat),
            ("boss.player_physical.chance", self.boss.player_physical.chance),
            ("boss.player_spell.chance", self.boss.player_spell.chance),
            ("boss.foe_physical.chance", self.boss.foe_physical.chance),
            ("boss.xp_retained_on_defeat", self.boss.xp_retained_on_defeat),
            ("caps.boss", self.caps.boss),
            ("caps.enemy_low", self.caps.enemy_low),
            ("caps.enemy_high", self.caps.enemy_high),
            ("caps.ally_low", self.caps.ally_low),
            ("caps.ally_high", self.caps.ally_high),
        ];
        for (key, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{} must be within [0, 1], got {}",
                    key, value
                )));
            }
        }
        if self.combat.spell_cooldown_divisor == 0 {
            return Err(ConfigError::Validation(
                "combat.spell_cooldown_divisor must be positive".to_string(),
            ));
        }
        if self.combat.max_phase_rounds == 0 {
            return Err(ConfigError::Validation(
                "combat.max_phase_rounds must be positive".to_string(),
            ));
        }
        if self.progression.xp_base <= 0.0 || self.progression.xp_exponent <= 0.0 {
            return Err(ConfigError::Validation(
                "progression.xp_base and progression.xp_exponent must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Crit tables and penalties for the given encounter kind.
    pub fn rules(&self, boss: bool) -> &EncounterRules {
        if boss {
            &self.boss
        } else {
            &self.normal
        }
    }
}
