//! Character creation from validated intake strings.

use super::class::{Class, Race};
use super::progression::xp_for_level;
use super::types::{Character, GameTotals};
use crate::core::config::ProgressionConfig;
use crate::core::constants::STARTING_LEVEL;
use crate::core::error::CreationError;
use crate::data::GameData;
use crate::items::Equipment;
use crate::milestones::MilestoneLog;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What the creation form hands the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterIntake {
    pub name: String,
    pub race: String,
    pub class: String,
    pub gender: String,
}

impl CharacterIntake {
    pub fn new(name: &str, race: &str, class: &str, gender: &str) -> Self {
        Self {
            name: name.to_string(),
            race: race.to_string(),
            class: class.to_string(),
            gender: gender.to_string(),
        }
    }
}

impl Default for CharacterIntake {
    fn default() -> Self {
        Self::new("Adventurer", "Human", "Warrior", "Male")
    }
}

/// Builds a level-1 character in the starting area. No pet is assigned here.
pub fn create_character(
    intake: &CharacterIntake,
    data: &GameData,
    progression: &ProgressionConfig,
) -> Result<Character, CreationError> {
    let name = intake.name.trim();
    if name.is_empty() {
        return Err(CreationError::EmptyName);
    }
    let gender = intake.gender.trim();
    if gender.is_empty() {
        return Err(CreationError::EmptyGender);
    }
    let race: Race = intake.race.parse().map_err(CreationError::UnknownRace)?;
    let class: Class = intake.class.parse().map_err(CreationError::UnknownClass)?;
    if !race.allows(class) {
        return Err(CreationError::RestrictedCombination {
            race: race.to_string(),
            class: class.to_string(),
        });
    }

    let stats = class.base_stats();
    let start_area = data.find_area_for_level(STARTING_LEVEL);

    Ok(Character {
        id: Uuid::new_v4(),
        name: name.to_string(),
        race,
        class,
        gender: gender.to_string(),
        level: STARTING_LEVEL,
        xp: 0,
        xp_to_next: xp_for_level(STARTING_LEVEL, progression),
        stats,
        current_hp: stats.hp,
        equipment: Equipment::new(),
        current_area: Some(start_area.id.clone()),
        pet: None,
        pet_died: false,
        spell_cooldown: 0,
        totals: GameTotals::default(),
        milestones: MilestoneLog::new(),
        created_at: chrono::Utc::now().timestamp(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> GameData {
        GameData::bundled().unwrap()
    }

    #[test]
    fn test_creates_level_one_character() {
        let data = data();
        let c = create_character(
            &CharacterIntake::new("Kira", "High Elf", "Wizard", "Female"),
            &data,
            &ProgressionConfig::default(),
        )
        .unwrap();
        assert_eq!(c.level, 1);
        assert_eq!(c.xp, 0);
        assert_eq!(c.xp_to_next, 1000);
        assert_eq!(c.stats, Class::Wizard.base_stats());
        assert_eq!(c.current_hp, c.stats.hp);
        assert_eq!(
            c.current_area.as_deref(),
            Some(data.find_area_for_level(1).id.as_str())
        );
        assert!(c.pet.is_none());
    }

    #[test]
    fn test_unknown_class_rejected() {
        let err = create_character(
            &CharacterIntake::new("Kira", "Human", "Jester", "Female"),
            &data(),
            &ProgressionConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, CreationError::UnknownClass("Jester".into()));
    }

    #[test]
    fn test_unknown_race_rejected() {
        let err = create_character(
            &CharacterIntake::new("Kira", "Orc", "Warrior", "Female"),
            &data(),
            &ProgressionConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, CreationError::UnknownRace("Orc".into()));
    }

    #[test]
    fn test_restricted_combination_rejected() {
        let err = create_character(
            &CharacterIntake::new("Grug", "Ogre", "Wizard", "Male"),
            &data(),
            &ProgressionConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CreationError::RestrictedCombination { .. }));
    }

    #[test]
    fn test_blank_name_and_gender_rejected() {
        let data = data();
        let cfg = ProgressionConfig::default();
        assert_eq!(
            create_character(&CharacterIntake::new("  ", "Human", "Warrior", "Male"), &data, &cfg)
                .unwrap_err(),
            CreationError::EmptyName
        );
        assert_eq!(
            create_character(&CharacterIntake::new("Bo", "Human", "Warrior", ""), &data, &cfg)
                .unwrap_err(),
            CreationError::EmptyGender
        );
    }
}
