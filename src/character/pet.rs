//! Pet selection and summoning for the pet classes.

use super::class::Class;
use super::types::{ActivePet, Character};
use crate::character::SaveStore;
use crate::core::engine::Engine;
use crate::data::{GameData, PetTemplate};
use crate::milestones::MilestoneKind;
use crate::ui::{LogTone, UiSink, UnitKind};
use log::debug;
use rand::Rng;

/// The strongest pet the class may summon at `level`: the one with the
/// highest required level not above it.
pub fn select_pet(data: &GameData, class: Class, level: u32) -> Option<&PetTemplate> {
    data.pets_for(class)
        .into_iter()
        .filter(|pet| pet.level <= level)
        .max_by_key(|pet| pet.level)
}

/// A fresh, fully healed copy of the template.
pub fn summon(template: &PetTemplate) -> ActivePet {
    let stats = template.stats();
    ActivePet {
        id: template.id,
        name: template.name.clone(),
        level: template.level,
        stats,
        current_hp: stats.hp,
    }
}

impl<U: UiSink, S: SaveStore, R: Rng> Engine<U, S, R> {
    /// Replaces the character's pet with the best one available. Returns
    /// false, leaving the character petless, for non-pet classes or when no
    /// pet qualifies yet.
    pub fn assign_pet(&mut self, character: &mut Character) -> bool {
        if !character.class.is_pet_class() {
            character.pet = None;
            return false;
        }
        let Some(template) = select_pet(&self.data, character.class, character.level) else {
            debug!(
                "no {} pet available at level {}",
                character.class, character.level
            );
            character.pet = None;
            return false;
        };

        let pet = summon(template);
        let (name, level) = (pet.name.clone(), pet.level);
        character.pet = Some(pet);
        character.pet_died = false;

        self.say(
            LogTone::Recovery,
            format!("Your pet {} (Level {}) joins you!", name, level),
        );
        if let Some(pet) = &character.pet {
            self.ui.refresh_hp_bar(UnitKind::Pet, pet.current_hp, pet.max_hp());
        }
        self.check_milestones(character, MilestoneKind::Pet, level as u64);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{CharacterIntake, MemoryStore};
    use crate::core::config::GameConfig;
    use crate::ui::RecordingSink;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_select_pet_picks_highest_qualifying() {
        let data = GameData::bundled().unwrap();
        let pet = select_pet(&data, Class::Necromancer, 1).unwrap();
        assert_eq!(pet.level, 1);

        let high = select_pet(&data, Class::Necromancer, 100).unwrap();
        let best = data
            .pets_for(Class::Necromancer)
            .into_iter()
            .map(|p| p.level)
            .max()
            .unwrap();
        assert_eq!(high.level, best);
    }

    #[test]
    fn test_select_pet_none_for_melee_class() {
        let data = GameData::bundled().unwrap();
        assert!(select_pet(&data, Class::Warrior, 50).is_none());
    }

    fn create_test_engine(data: GameData) -> Engine<RecordingSink, MemoryStore, ChaCha8Rng> {
        Engine::new(
            data,
            GameConfig::default(),
            RecordingSink::new(),
            MemoryStore::new(),
            ChaCha8Rng::seed_from_u64(7),
        )
    }

    fn data_with_pet_levels_raised(by: u32) -> GameData {
        let mut data = GameData::bundled().unwrap();
        for pet in &mut data.pets {
            pet.level += by;
        }
        data
    }

    #[test]
    fn test_assign_pet_without_candidate_clears_pet() {
        let mut engine = create_test_engine(GameData::bundled().unwrap());
        let mut character = engine
            .create(&CharacterIntake::new("Zed", "Erudite", "Magician", "Male"))
            .unwrap();
        assert!(character.pet.is_some());

        engine.data = data_with_pet_levels_raised(4);
        assert!(!engine.assign_pet(&mut character));
        assert!(character.pet.is_none());
        assert_eq!(engine.ui().count_containing("joins you!"), 1);
    }

    #[test]
    fn test_assign_pet_clears_pet_for_melee_class() {
        let mut engine = create_test_engine(GameData::bundled().unwrap());
        let mut character = engine.create(&CharacterIntake::default()).unwrap();
        let template = select_pet(engine.data(), Class::Magician, 1).unwrap();
        character.pet = Some(summon(template));

        assert!(!engine.assign_pet(&mut character));
        assert!(character.pet.is_none());
    }

    #[test]
    fn test_summon_is_fully_healed_copy() {
        let data = GameData::bundled().unwrap();
        let template = select_pet(&data, Class::Magician, 1).unwrap();
        let pet = summon(template);
        assert_eq!(pet.current_hp, template.hp);
        assert_eq!(pet.name, template.name);
        assert!(pet.is_alive());
    }
}
