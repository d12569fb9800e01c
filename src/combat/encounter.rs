//! Encounter generation: template selection, level pick and stat scaling.

use super::types::Foe;
use crate::core::constants::*;
use crate::data::{BossTemplate, EnemyTemplate, GameData};
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::RangeInclusive;

/// Flavor word for how a foe's level compares to the player's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threat {
    Wild,
    Threatening,
    Formidable,
    Fearsome,
}

impl Threat {
    pub fn word(&self) -> &'static str {
        match self {
            Threat::Wild => "wild",
            Threat::Threatening => "threatening",
            Threat::Formidable => "formidable",
            Threat::Fearsome => "fearsome",
        }
    }
}

pub fn threat_descriptor(foe_level: u32, player_level: u32) -> Threat {
    match foe_level as i64 - player_level as i64 {
        d if d < 0 => Threat::Wild,
        0 => Threat::Threatening,
        1 => Threat::Formidable,
        _ => Threat::Fearsome,
    }
}

/// Pick weight of a foe level relative to the player.
pub fn level_weight(level: u32, player_level: u32) -> f64 {
    match level as i64 - player_level as i64 {
        d if d <= 0 => LEVEL_WEIGHT_AT_OR_BELOW,
        1 => LEVEL_WEIGHT_PLUS_ONE,
        2 => LEVEL_WEIGHT_PLUS_TWO,
        d => LEVEL_WEIGHT_FALLBACK_NUMERATOR / d as f64,
    }
}

/// Weighted pick from `levels`, favouring levels at or below the player's.
pub fn pick_weighted_level(levels: RangeInclusive<u32>, player_level: u32, rng: &mut impl Rng) -> u32 {
    let candidates: Vec<(u32, f64)> = levels
        .map(|level| (level, level_weight(level, player_level)))
        .collect();
    let total: f64 = candidates.iter().map(|(_, w)| w).sum();
    let roll = rng.gen::<f64>() * total;

    let mut cumulative = 0.0;
    for &(level, weight) in &candidates {
        cumulative += weight;
        if roll < cumulative {
            return level;
        }
    }
    candidates.last().map(|(level, _)| *level).unwrap_or(player_level)
}

/// Base values carried through level scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledStats {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub mr: u32,
    pub xp: u64,
}

/// Compounds enemy growth one level at a time from `from_level` to `to_level`.
/// HP rounds down, ATK/DEF round up, MR is untouched, XP gains a flat step per level.
pub fn scale_stats(base: ScaledStats, from_level: u32, to_level: u32) -> ScaledStats {
    let mut stats = base;
    for level in (from_level + 1)..=to_level {
        let growth = enemy_growth_for_level(level);
        stats.hp = grow_stat(stats.hp, growth.hp, false);
        stats.atk = grow_stat(stats.atk, growth.atk, true);
        stats.def = grow_stat(stats.def, growth.def, true);
        stats.xp += ENEMY_XP_PER_LEVEL;
    }
    stats
}

fn foe_from(name: &str, level: u32, stats: ScaledStats, is_boss: bool) -> Foe {
    Foe {
        name: name.to_string(),
        level,
        max_hp: stats.hp,
        current_hp: stats.hp,
        atk: stats.atk,
        def: stats.def,
        mr: stats.mr,
        xp: stats.xp,
        is_boss,
    }
}

/// The synthetic fallback enemy scaled from level 1 to `level`.
pub fn generic_enemy(level: u32) -> Foe {
    let base = ScaledStats {
        hp: GENERIC_ENEMY_HP,
        atk: GENERIC_ENEMY_ATK,
        def: GENERIC_ENEMY_DEF,
        mr: GENERIC_ENEMY_MR,
        xp: GENERIC_ENEMY_XP,
    };
    let level = level.max(1);
    foe_from(GENERIC_ENEMY_NAME, level, scale_stats(base, 1, level), false)
}

/// Levels a normal encounter may be drawn from for `player_level`.
pub fn encounter_band(player_level: u32) -> RangeInclusive<u32> {
    let low = player_level.saturating_sub(ENCOUNTER_LEVELS_BELOW).max(1);
    low..=player_level + ENCOUNTER_LEVELS_ABOVE
}

fn overlap(template: &EnemyTemplate, band: &RangeInclusive<u32>) -> Option<RangeInclusive<u32>> {
    let low = template.min_level.max(*band.start());
    let high = template.max_level.min(*band.end());
    (low <= high).then_some(low..=high)
}

/// Builds a scaled normal enemy for a player of `player_level` in `area_id`.
pub fn generate_enemy(data: &GameData, player_level: u32, area_id: &str, rng: &mut impl Rng) -> Foe {
    let band = encounter_band(player_level);
    let matches: Vec<(&EnemyTemplate, RangeInclusive<u32>)> = data
        .enemies
        .iter()
        .filter(|t| t.allowed_areas.iter().any(|a| a == area_id))
        .filter_map(|t| overlap(t, &band).map(|range| (t, range)))
        .collect();

    let Some((template, range)) = matches.choose(rng) else {
        let level = rng.gen_range(band);
        return generic_enemy(level);
    };

    let level = pick_weighted_level(range.clone(), player_level, rng);
    let base = ScaledStats {
        hp: template.hp,
        atk: template.atk,
        def: template.def,
        mr: template.mr,
        xp: template.xp,
    };
    foe_from(&template.name, level, scale_stats(base, template.min_level, level), false)
}

/// Picks a boss for `area_id` at its fixed stats, with its drop candidates.
/// `None` when the area has no boss.
pub fn generate_boss<'a>(data: &'a GameData, area_id: &str, rng: &mut impl Rng) -> Option<(Foe, &'a BossTemplate)> {
    let bosses = data.bosses_in(area_id);
    let boss = *bosses.choose(rng)?;
    let stats = ScaledStats {
        hp: boss.hp,
        atk: boss.atk,
        def: boss.def,
        mr: boss.mr,
        xp: boss.xp,
    };
    Some((foe_from(&boss.name, boss.level, stats, true), boss))
}
