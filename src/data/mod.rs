//! Static reference tables: areas, enemies, bosses, items, spells, pets, milestones.

pub mod loader;
pub mod types;

pub use types::*;

use crate::character::Class;
use crate::core::error::DataError;
use crate::items::Item;
use log::{debug, warn};

#[derive(Debug, Clone)]
pub struct GameData {
    /// Sorted by increasing recommended level and never empty, which
    /// [`GameData::from_tables`] enforces.
    areas: Vec<Area>,
    pub enemies: Vec<EnemyTemplate>,
    pub bosses: Vec<BossTemplate>,
    pub items: Vec<Item>,
    pub spells: Vec<Spell>,
    pub pets: Vec<PetTemplate>,
    pub milestones: Vec<Milestone>,
}

impl GameData {
    /// Validates and assembles already-parsed tables.
    ///
    /// Structural problems (no areas, inverted level ranges) are errors.
    /// Dangling references between tables are only logged.
    pub fn from_tables(
        mut areas: Vec<Area>,
        enemies: Vec<EnemyTemplate>,
        bosses: Vec<BossTemplate>,
        items: Vec<Item>,
        spells: Vec<Spell>,
        pets: Vec<PetTemplate>,
        milestones: Vec<Milestone>,
    ) -> Result<Self, DataError> {
        if areas.is_empty() {
            return Err(DataError::NoAreas);
        }
        for area in &areas {
            check_range("areas", &area.id, area.recommended_level, area.max_level)?;
        }
        for enemy in &enemies {
            check_range("enemies", &enemy.id.to_string(), enemy.min_level, enemy.max_level)?;
        }
        for spell in &spells {
            check_range("spells", &spell.id.to_string(), spell.min_level, spell.max_level)?;
        }
        areas.sort_by_key(|area| area.recommended_level);

        let data = Self {
            areas,
            enemies,
            bosses,
            items,
            spells,
            pets,
            milestones,
        };
        data.warn_dangling_references();
        debug!(
            "loaded reference data: {} areas, {} enemies, {} bosses, {} items, {} spells, {} pets, {} milestones",
            data.areas.len(),
            data.enemies.len(),
            data.bosses.len(),
            data.items.len(),
            data.spells.len(),
            data.pets.len(),
            data.milestones.len()
        );
        Ok(data)
    }

    fn warn_dangling_references(&self) {
        for enemy in &self.enemies {
            for area_id in &enemy.allowed_areas {
                if self.area(area_id).is_none() {
                    warn!("enemy {} references unknown area '{}'", enemy.name, area_id);
                }
            }
        }
        for boss in &self.bosses {
            if self.area(&boss.area).is_none() {
                warn!("boss {} references unknown area '{}'", boss.name, boss.area);
            }
            if boss.drops.len() > 3 {
                warn!("boss {} lists {} drops; only three are expected", boss.name, boss.drops.len());
            }
            for id in &boss.drops {
                if self.item(*id).is_none() {
                    warn!("boss {} drops unknown item {}", boss.name, id);
                }
            }
        }
    }

    /// Areas in increasing recommended-level order.
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn area(&self, id: &str) -> Option<&Area> {
        self.areas.iter().find(|area| area.id == id)
    }

    pub fn item(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// First area whose band contains `level`, else the last (endgame) area.
    pub fn find_area_for_level(&self, level: u32) -> &Area {
        self.areas
            .iter()
            .find(|area| area.suits_level(level))
            .or_else(|| self.areas.last())
            .unwrap_or_else(|| unreachable!("from_tables rejects an empty area table"))
    }

    /// Spells usable by `class` at `level`.
    pub fn spells_for(&self, class: Class, level: u32) -> Vec<&Spell> {
        self.spells
            .iter()
            .filter(|spell| spell.usable_at(class, level))
            .collect()
    }

    pub fn pets_for(&self, class: Class) -> Vec<&PetTemplate> {
        self.pets.iter().filter(|pet| pet.class == class).collect()
    }

    pub fn bosses_in(&self, area_id: &str) -> Vec<&BossTemplate> {
        self.bosses.iter().filter(|boss| boss.area == area_id).collect()
    }
}

fn check_range(table: &'static str, id: &str, min: u32, max: u32) -> Result<(), DataError> {
    if min > max {
        return Err(DataError::LevelRange {
            table,
            id: id.to_string(),
            min,
            max,
        });
    }
    Ok(())
}
