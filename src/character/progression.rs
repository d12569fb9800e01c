//! XP curve, level-up stat growth and the level-up loop.

use super::class::Stats;
use super::types::Character;
use crate::character::SaveStore;
use crate::core::config::ProgressionConfig;
use crate::core::constants::{grow_stat, player_growth_for_level, MAX_LEVEL};
use crate::core::engine::Engine;
use crate::milestones::MilestoneKind;
use crate::ui::{LogTone, UiSink};
use crate::zones::{place_for_level, AreaMove};
use log::debug;
use rand::Rng;

/// XP needed to advance past `level`: `floor(base * level^exponent)`.
pub fn xp_for_level(level: u32, config: &ProgressionConfig) -> u64 {
    (config.xp_base * (level as f64).powf(config.xp_exponent)).floor() as u64
}

/// One level's growth using the regime of `new_level`.
pub fn grow_stats(stats: Stats, new_level: u32) -> Stats {
    let rates = player_growth_for_level(new_level);
    Stats {
        hp: grow_stat(stats.hp, rates.hp, false),
        atk: grow_stat(stats.atk, rates.atk, true),
        def: grow_stat(stats.def, rates.def, true),
        mag: grow_stat(stats.mag, rates.mag, true),
        mr: grow_stat(stats.mr, rates.mr, true),
    }
}

/// Consumes one level's worth of XP and applies the level-up to `character`.
/// Returns false at the level cap or when XP is short.
pub fn try_level_up(character: &mut Character, config: &ProgressionConfig) -> bool {
    if character.level >= MAX_LEVEL || character.xp < character.xp_to_next {
        return false;
    }
    character.xp -= character.xp_to_next;
    character.level += 1;
    character.xp_to_next = xp_for_level(character.level, config);
    character.stats = grow_stats(character.stats, character.level);
    character.heal_full();
    true
}

impl<U: UiSink, S: SaveStore, R: Rng> Engine<U, S, R> {
    /// Awards XP and processes each resulting level-up in turn. Returns the
    /// number of levels gained. XP past the level cap is kept.
    pub fn add_xp(&mut self, character: &mut Character, amount: u64) -> u32 {
        character.xp += amount;
        self.say(LogTone::Gain, format!("You gained {} XP.", amount));

        let mut gained = 0;
        while try_level_up(character, &self.config.progression) {
            gained += 1;
            debug!("{} reached level {}", character.name, character.level);
            self.say(
                LogTone::LevelUp,
                format!("Level Up! You are now level {}.", character.level),
            );

            if character.class.is_pet_class() && character.pet.is_none() {
                self.assign_pet(character);
            }
            self.update_area(character);
            self.check_milestones(character, MilestoneKind::Level, character.level as u64);

            self.refresh_all(character);
            self.persist(character);
        }
        gained
    }

    /// Re-evaluates the character's area after a level-up.
    pub(crate) fn update_area(&mut self, character: &mut Character) {
        let (area_move, area) = place_for_level(
            &self.data,
            character.current_area.as_deref(),
            character.level,
            self.config.progression.wanderlust_chance,
            &mut self.rng,
        );
        let (id, name) = (area.id.clone(), area.name.clone());

        let message = match area_move {
            AreaMove::Entered => format!("You enter a new area: {}.", name),
            AreaMove::Outgrown => format!(
                "You have outgrown your current area and now move to {}.",
                name
            ),
            AreaMove::Wanderlust => format!(
                "Feeling adventurous, you decide to move to {} even though you're still level appropriate for your current area.",
                name
            ),
            AreaMove::Stayed => return,
        };
        debug!("{} moves to {} ({:?})", character.name, id, area_move);
        character.current_area = Some(id);
        self.say(LogTone::Notice, message);
    }
}
