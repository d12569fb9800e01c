//! Playable classes and races with their fixed tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five combat stats shared by characters, pets and foes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    #[serde(rename = "HP")]
    pub hp: u32,
    #[serde(rename = "ATK")]
    pub atk: u32,
    #[serde(rename = "DEF")]
    pub def: u32,
    #[serde(rename = "MAG")]
    pub mag: u32,
    #[serde(rename = "MR")]
    pub mr: u32,
}

impl Stats {
    pub const fn new(hp: u32, atk: u32, def: u32, mag: u32, mr: u32) -> Self {
        Self {
            hp,
            atk,
            def,
            mag,
            mr,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Class {
    Bard,
    Beastlord,
    Berserker,
    Cleric,
    Druid,
    Enchanter,
    Magician,
    Monk,
    Necromancer,
    Paladin,
    Ranger,
    Rogue,
    Shadowknight,
    Shaman,
    Warrior,
    Wizard,
}

impl Class {
    pub const ALL: [Class; 16] = [
        Class::Bard,
        Class::Beastlord,
        Class::Berserker,
        Class::Cleric,
        Class::Druid,
        Class::Enchanter,
        Class::Magician,
        Class::Monk,
        Class::Necromancer,
        Class::Paladin,
        Class::Ranger,
        Class::Rogue,
        Class::Shadowknight,
        Class::Shaman,
        Class::Warrior,
        Class::Wizard,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Class::Bard => "Bard",
            Class::Beastlord => "Beastlord",
            Class::Berserker => "Berserker",
            Class::Cleric => "Cleric",
            Class::Druid => "Druid",
            Class::Enchanter => "Enchanter",
            Class::Magician => "Magician",
            Class::Monk => "Monk",
            Class::Necromancer => "Necromancer",
            Class::Paladin => "Paladin",
            Class::Ranger => "Ranger",
            Class::Rogue => "Rogue",
            Class::Shadowknight => "Shadowknight",
            Class::Shaman => "Shaman",
            Class::Warrior => "Warrior",
            Class::Wizard => "Wizard",
        }
    }

    /// Level-1 stats for a freshly created character.
    pub fn base_stats(&self) -> Stats {
        match self {
            Class::Bard => Stats::new(120, 12, 9, 0, 0),
            Class::Beastlord => Stats::new(110, 10, 10, 0, 0),
            Class::Berserker => Stats::new(120, 12, 9, 0, 0),
            Class::Cleric => Stats::new(110, 7, 8, 12, 0),
            Class::Druid => Stats::new(110, 7, 7, 12, 0),
            Class::Enchanter => Stats::new(95, 7, 7, 12, 0),
            Class::Magician => Stats::new(95, 7, 7, 9, 0),
            Class::Monk => Stats::new(130, 9, 12, 0, 0),
            Class::Necromancer => Stats::new(90, 9, 9, 9, 0),
            Class::Paladin => Stats::new(130, 9, 12, 8, 0),
            Class::Ranger => Stats::new(120, 12, 9, 0, 0),
            Class::Rogue => Stats::new(120, 12, 9, 0, 0),
            Class::Shadowknight => Stats::new(130, 10, 12, 8, 0),
            Class::Shaman => Stats::new(110, 7, 7, 12, 0),
            Class::Warrior => Stats::new(130, 10, 12, 0, 0),
            Class::Wizard => Stats::new(95, 7, 7, 12, 0),
        }
    }

    /// Classes that fight behind a summoned pet.
    pub fn is_pet_class(&self) -> bool {
        matches!(self, Class::Magician | Class::Necromancer | Class::Beastlord)
    }

    /// Primarily magical classes; selects the caster item-weight table.
    pub fn is_caster(&self) -> bool {
        matches!(
            self,
            Class::Cleric
                | Class::Druid
                | Class::Enchanter
                | Class::Magician
                | Class::Necromancer
                | Class::Shaman
                | Class::Wizard
        )
    }

    /// Percentage chance (0-100) of casting when a spell is available.
    pub fn spell_cast_chance(&self) -> u32 {
        match self {
            Class::Cleric => 60,
            Class::Druid => 75,
            Class::Enchanter => 80,
            Class::Magician => 75,
            Class::Necromancer => 60,
            Class::Paladin => 20,
            Class::Shaman => 80,
            Class::Shadowknight => 40,
            Class::Wizard => 90,
            _ => 0,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Class {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Class::ALL
            .iter()
            .copied()
            .find(|class| class.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| wanted.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Race {
    Human,
    #[serde(rename = "Half Elf")]
    HalfElf,
    #[serde(rename = "High Elf")]
    HighElf,
    #[serde(rename = "Dark Elf")]
    DarkElf,
    #[serde(rename = "Wood Elf")]
    WoodElf,
    Dwarf,
    Iksar,
    Ogre,
    Troll,
    Froglok,
    Drakkin,
    Barbarian,
    Erudite,
    Gnome,
    Halfling,
    #[serde(rename = "Vah Shir")]
    VahShir,
}

impl Race {
    pub const ALL: [Race; 16] = [
        Race::Human,
        Race::HalfElf,
        Race::HighElf,
        Race::DarkElf,
        Race::WoodElf,
        Race::Dwarf,
        Race::Iksar,
        Race::Ogre,
        Race::Troll,
        Race::Froglok,
        Race::Drakkin,
        Race::Barbarian,
        Race::Erudite,
        Race::Gnome,
        Race::Halfling,
        Race::VahShir,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Race::Human => "Human",
            Race::HalfElf => "Half Elf",
            Race::HighElf => "High Elf",
            Race::DarkElf => "Dark Elf",
            Race::WoodElf => "Wood Elf",
            Race::Dwarf => "Dwarf",
            Race::Iksar => "Iksar",
            Race::Ogre => "Ogre",
            Race::Troll => "Troll",
            Race::Froglok => "Froglok",
            Race::Drakkin => "Drakkin",
            Race::Barbarian => "Barbarian",
            Race::Erudite => "Erudite",
            Race::Gnome => "Gnome",
            Race::Halfling => "Halfling",
            Race::VahShir => "Vah Shir",
        }
    }

    /// Classes this race may choose.
    pub fn allowed_classes(&self) -> &'static [Class] {
        use Class::*;
        match self {
            Race::Human | Race::Drakkin => &[
                Bard,
                Cleric,
                Druid,
                Enchanter,
                Magician,
                Monk,
                Necromancer,
                Paladin,
                Ranger,
                Rogue,
                Shadowknight,
                Warrior,
                Wizard,
            ],
            Race::HalfElf => &[Bard, Druid, Paladin, Ranger, Rogue, Warrior],
            Race::HighElf => &[Cleric, Enchanter, Magician, Paladin, Wizard],
            Race::DarkElf => &[
                Cleric,
                Enchanter,
                Magician,
                Necromancer,
                Rogue,
                Shadowknight,
                Warrior,
                Wizard,
            ],
            Race::WoodElf => &[Bard, Beastlord, Druid, Ranger, Rogue, Warrior],
            Race::Dwarf => &[Berserker, Cleric, Paladin, Rogue, Warrior],
            Race::Iksar => &[Beastlord, Monk, Necromancer, Shadowknight, Shaman, Warrior],
            Race::Ogre | Race::Troll => &[Beastlord, Berserker, Shadowknight, Shaman, Warrior],
            Race::Froglok => &[
                Cleric,
                Monk,
                Necromancer,
                Paladin,
                Rogue,
                Shadowknight,
                Shaman,
                Warrior,
                Wizard,
            ],
            Race::Barbarian => &[Beastlord, Berserker, Rogue, Shaman, Warrior],
            Race::Erudite => &[
                Cleric,
                Enchanter,
                Magician,
                Necromancer,
                Paladin,
                Shadowknight,
                Wizard,
            ],
            Race::Gnome => &[
                Cleric,
                Enchanter,
                Magician,
                Necromancer,
                Paladin,
                Rogue,
                Shadowknight,
                Warrior,
                Wizard,
            ],
            Race::Halfling => &[Cleric, Druid, Paladin, Ranger, Rogue, Warrior],
            Race::VahShir => &[Bard, Beastlord, Berserker, Rogue, Shaman, Warrior],
        }
    }

    pub fn allows(&self, class: Class) -> bool {
        self.allowed_classes().contains(&class)
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Race {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Race::ALL
            .iter()
            .copied()
            .find(|race| race.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| wanted.to_string())
    }
}

/// Classes available to a race.
pub fn available_classes(race: Race) -> Vec<Class> {
    race.allowed_classes().to_vec()
}

/// Races that may play a class.
pub fn available_races(class: Class) -> Vec<Race> {
    Race::ALL
        .iter()
        .copied()
        .filter(|race| race.allows(class))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_class_has_base_stats() {
        for class in Class::ALL {
            let stats = class.base_stats();
            assert!(stats.hp > 0, "{} has no HP", class);
            assert!(stats.atk > 0, "{} has no ATK", class);
        }
    }

    #[test]
    fn test_warrior_base_stats() {
        assert_eq!(Class::Warrior.base_stats(), Stats::new(130, 10, 12, 0, 0));
    }

    #[test]
    fn test_pet_classes() {
        let pet_classes: Vec<Class> = Class::ALL
            .iter()
            .copied()
            .filter(Class::is_pet_class)
            .collect();
        assert_eq!(
            pet_classes,
            vec![Class::Beastlord, Class::Magician, Class::Necromancer]
        );
    }

    #[test]
    fn test_spell_cast_chance_zero_for_pure_melee() {
        assert_eq!(Class::Warrior.spell_cast_chance(), 0);
        assert_eq!(Class::Wizard.spell_cast_chance(), 90);
        assert_eq!(Class::Paladin.spell_cast_chance(), 20);
    }

    #[test]
    fn test_class_from_str_is_case_insensitive() {
        assert_eq!("wizard".parse::<Class>(), Ok(Class::Wizard));
        assert_eq!(" Shadowknight ".parse::<Class>(), Ok(Class::Shadowknight));
        assert!("Jester".parse::<Class>().is_err());
    }

    #[test]
    fn test_race_from_str_with_spaces() {
        assert_eq!("Vah Shir".parse::<Race>(), Ok(Race::VahShir));
        assert_eq!("dark elf".parse::<Race>(), Ok(Race::DarkElf));
        assert!("Orc".parse::<Race>().is_err());
    }

    #[test]
    fn test_race_serde_uses_display_names() {
        let json = serde_json::to_string(&Race::HalfElf).unwrap();
        assert_eq!(json, "\"Half Elf\"");
        let race: Race = serde_json::from_str("\"Wood Elf\"").unwrap();
        assert_eq!(race, Race::WoodElf);
    }

    #[test]
    fn test_available_classes_for_ogre() {
        assert_eq!(
            available_classes(Race::Ogre),
            vec![
                Class::Beastlord,
                Class::Berserker,
                Class::Shadowknight,
                Class::Shaman,
                Class::Warrior
            ]
        );
    }

    #[test]
    fn test_available_races_for_beastlord() {
        let races = available_races(Class::Beastlord);
        assert!(races.contains(&Race::Iksar));
        assert!(races.contains(&Race::VahShir));
        assert!(!races.contains(&Race::Human));
    }

    #[test]
    fn test_every_class_playable_by_some_race() {
        for class in Class::ALL {
            assert!(!available_races(class).is_empty(), "{} unplayable", class);
        }
    }
}
