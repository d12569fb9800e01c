//! Reads the seven reference tables from embedded JSON or a directory.

use super::types::{Area, BossTemplate, EnemyTemplate, Milestone, PetTemplate, Spell};
use super::GameData;
use crate::core::error::DataError;
use crate::items::Item;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub const AREAS_FILE: &str = "areas.json";
pub const ENEMIES_FILE: &str = "enemies.json";
pub const BOSSES_FILE: &str = "bosses.json";
pub const ITEMS_FILE: &str = "items.json";
pub const SPELLS_FILE: &str = "spells.json";
pub const PETS_FILE: &str = "pets.json";
pub const MILESTONES_FILE: &str = "milestones.json";

const BUNDLED_AREAS: &str = include_str!("../../data/areas.json");
const BUNDLED_ENEMIES: &str = include_str!("../../data/enemies.json");
const BUNDLED_BOSSES: &str = include_str!("../../data/bosses.json");
const BUNDLED_ITEMS: &str = include_str!("../../data/items.json");
const BUNDLED_SPELLS: &str = include_str!("../../data/spells.json");
const BUNDLED_PETS: &str = include_str!("../../data/pets.json");
const BUNDLED_MILESTONES: &str = include_str!("../../data/milestones.json");

fn parse_table<T: DeserializeOwned>(table: &'static str, content: &str) -> Result<Vec<T>, DataError> {
    serde_json::from_str(content).map_err(|source| DataError::Parse { table, source })
}

fn read_table<T: DeserializeOwned>(dir: &Path, file: &str, table: &'static str) -> Result<Vec<T>, DataError> {
    let path = dir.join(file);
    let content = fs::read_to_string(&path).map_err(|source| DataError::Io {
        path: path.clone(),
        source,
    })?;
    parse_table(table, &content)
}

/// Raw tables before validation.
pub(super) struct Tables {
    pub areas: Vec<Area>,
    pub enemies: Vec<EnemyTemplate>,
    pub bosses: Vec<BossTemplate>,
    pub items: Vec<Item>,
    pub spells: Vec<Spell>,
    pub pets: Vec<PetTemplate>,
    pub milestones: Vec<Milestone>,
}

pub(super) fn bundled_tables() -> Result<Tables, DataError> {
    Ok(Tables {
        areas: parse_table("areas", BUNDLED_AREAS)?,
        enemies: parse_table("enemies", BUNDLED_ENEMIES)?,
        bosses: parse_table("bosses", BUNDLED_BOSSES)?,
        items: parse_table("items", BUNDLED_ITEMS)?,
        spells: parse_table("spells", BUNDLED_SPELLS)?,
        pets: parse_table("pets", BUNDLED_PETS)?,
        milestones: parse_table("milestones", BUNDLED_MILESTONES)?,
    })
}

pub(super) fn tables_from_dir(dir: &Path) -> Result<Tables, DataError> {
    Ok(Tables {
        areas: read_table(dir, AREAS_FILE, "areas")?,
        enemies: read_table(dir, ENEMIES_FILE, "enemies")?,
        bosses: read_table(dir, BOSSES_FILE, "bosses")?,
        items: read_table(dir, ITEMS_FILE, "items")?,
        spells: read_table(dir, SPELLS_FILE, "spells")?,
        pets: read_table(dir, PETS_FILE, "pets")?,
        milestones: read_table(dir, MILESTONES_FILE, "milestones")?,
    })
}

impl GameData {
    /// The reference data compiled into the binary.
    pub fn bundled() -> Result<Self, DataError> {
        let t = bundled_tables()?;
        Self::from_tables(t.areas, t.enemies, t.bosses, t.items, t.spells, t.pets, t.milestones)
    }

    /// Loads the seven `*.json` tables from `dir`.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, DataError> {
        let t = tables_from_dir(dir.as_ref())?;
        Self::from_tables(t.areas, t.enemies, t.bosses, t.items, t.spells, t.pets, t.milestones)
    }
}
