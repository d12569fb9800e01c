use super::class::{Class, Race, Stats};
use crate::items::{Equipment, EquipmentBonuses};
use crate::milestones::MilestoneLog;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A summoned pet. A fresh copy of its template each time it joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePet {
    pub id: u32,
    pub name: String,
    /// Required level of the template it was summoned from.
    pub level: u32,
    pub stats: Stats,
    pub current_hp: u32,
}

impl ActivePet {
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn max_hp(&self) -> u32 {
        self.stats.hp
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    pub fn heal_full(&mut self) {
        self.current_hp = self.stats.hp;
    }
}

/// Lifetime counters shown on the stats panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameTotals {
    pub enemy_kills: u64,
    pub boss_kills: u64,
    pub item_drops: u64,
    pub death_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub race: Race,
    pub class: Class,
    pub gender: String,
    pub level: u32,
    pub xp: u64,
    pub xp_to_next: u64,
    /// Base stats, before equipment.
    #[serde(flatten)]
    pub stats: Stats,
    pub current_hp: u32,
    #[serde(default)]
    pub equipment: Equipment,
    /// Area id, re-resolved against reference data on load.
    #[serde(default)]
    pub current_area: Option<String>,
    #[serde(default)]
    pub pet: Option<ActivePet>,
    #[serde(default)]
    pub pet_died: bool,
    /// Rounds until the player may cast again.
    #[serde(default)]
    pub spell_cooldown: u32,
    #[serde(default)]
    pub totals: GameTotals,
    #[serde(default)]
    pub milestones: MilestoneLog,
    #[serde(default)]
    pub created_at: i64,
}

impl Character {
    pub fn max_hp(&self) -> u32 {
        self.stats.hp
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    pub fn heal_full(&mut self) {
        self.current_hp = self.stats.hp;
    }

    pub fn has_living_pet(&self) -> bool {
        self.pet.as_ref().map(ActivePet::is_alive).unwrap_or(false)
    }

    /// Base stats plus equipment modifiers, each floored at zero.
    pub fn effective_stats(&self) -> Stats {
        apply_bonuses(self.stats, self.equipment.bonuses())
    }
}

fn apply_bonuses(base: Stats, bonuses: EquipmentBonuses) -> Stats {
    let add = |value: u32, bonus: i32| (value as i64 + bonus as i64).max(0) as u32;
    Stats {
        hp: base.hp,
        atk: add(base.atk, bonuses.atk),
        def: add(base.def, bonuses.def),
        mag: add(base.mag, bonuses.mag),
        mr: add(base.mr, bonuses.mr),
    }
}
