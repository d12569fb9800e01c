//! Reference-data records. Immutable once loaded.

use crate::character::{Class, Stats};
use crate::milestones::MilestoneKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: String,
    pub name: String,
    pub recommended_level: u32,
    pub max_level: u32,
    pub max_item_level: u32,
    #[serde(default)]
    pub description: String,
    /// Item levels regular encounters here may drop.
    #[serde(default)]
    pub allowed_item_levels: Vec<u32>,
}

impl Area {
    pub fn suits_level(&self, level: u32) -> bool {
        self.recommended_level <= level && level <= self.max_level
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyTemplate {
    pub id: u32,
    pub name: String,
    pub min_level: u32,
    pub max_level: u32,
    #[serde(rename = "HP")]
    pub hp: u32,
    #[serde(rename = "ATK")]
    pub atk: u32,
    #[serde(rename = "DEF", default)]
    pub def: u32,
    #[serde(rename = "MR", default)]
    pub mr: u32,
    pub xp: u64,
    pub allowed_areas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossTemplate {
    pub id: u32,
    pub name: String,
    /// Id of the single area this boss appears in.
    pub area: String,
    pub level: u32,
    #[serde(rename = "HP")]
    pub hp: u32,
    #[serde(rename = "ATK")]
    pub atk: u32,
    #[serde(rename = "DEF", default)]
    pub def: u32,
    #[serde(rename = "MR", default)]
    pub mr: u32,
    pub xp: u64,
    /// Up to three candidate item ids.
    #[serde(default)]
    pub drops: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    pub id: u32,
    pub name: String,
    pub class: Class,
    pub min_level: u32,
    pub max_level: u32,
    pub base_damage: u32,
}

impl Spell {
    pub fn usable_at(&self, class: Class, level: u32) -> bool {
        self.class == class && self.min_level <= level && level <= self.max_level
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetTemplate {
    pub id: u32,
    pub name: String,
    pub class: Class,
    /// Character level required to summon.
    pub level: u32,
    pub hp: u32,
    pub atk: u32,
    #[serde(default)]
    pub def: u32,
    #[serde(default)]
    pub mag: u32,
    #[serde(default)]
    pub mr: u32,
}

impl PetTemplate {
    pub fn stats(&self) -> Stats {
        Stats::new(self.hp, self.atk, self.def, self.mag, self.mr)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: MilestoneKind,
    /// Threshold the event value must reach.
    pub value: u64,
}
