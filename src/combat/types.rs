use crate::character::{ActivePet, Character};
use serde::{Deserialize, Serialize};

/// Which cap band an attacker's hits fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackerRole {
    Boss,
    Enemy,
    /// The player or their pet.
    Ally,
}

/// Offensive side of a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attacker {
    pub role: AttackerRole,
    pub level: u32,
    pub atk: u32,
    pub mag: u32,
}

/// Defensive side of a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Defender {
    pub def: u32,
    pub mr: u32,
    pub max_hp: u32,
}

/// A scaled combat instance of an enemy or boss template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Foe {
    pub name: String,
    pub level: u32,
    pub max_hp: u32,
    pub current_hp: u32,
    pub atk: u32,
    pub def: u32,
    pub mr: u32,
    pub xp: u64,
    pub is_boss: bool,
}

impl Foe {
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    pub fn as_attacker(&self) -> Attacker {
        Attacker {
            role: if self.is_boss {
                AttackerRole::Boss
            } else {
                AttackerRole::Enemy
            },
            level: self.level,
            atk: self.atk,
            mag: 0,
        }
    }

    pub fn as_defender(&self) -> Defender {
        Defender {
            def: self.def,
            mr: self.mr,
            max_hp: self.max_hp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatantKind {
    Player,
    Pet,
}

/// Uniform view of whichever ally is taking the offensive turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combatant {
    pub kind: CombatantKind,
    pub name: String,
    pub level: u32,
    pub atk: u32,
    pub def: u32,
    pub mag: u32,
    pub mr: u32,
    pub current_hp: u32,
    pub max_hp: u32,
}

impl Combatant {
    /// The player, with equipment applied.
    pub fn player(character: &Character) -> Self {
        let stats = character.effective_stats();
        Self {
            kind: CombatantKind::Player,
            name: character.name.clone(),
            level: character.level,
            atk: stats.atk,
            def: stats.def,
            mag: stats.mag,
            mr: stats.mr,
            current_hp: character.current_hp,
            max_hp: stats.hp,
        }
    }

    pub fn pet(pet: &ActivePet) -> Self {
        Self {
            kind: CombatantKind::Pet,
            name: pet.name.clone(),
            level: pet.level,
            atk: pet.stats.atk,
            def: pet.stats.def,
            mag: pet.stats.mag,
            mr: pet.stats.mr,
            current_hp: pet.current_hp,
            max_hp: pet.stats.hp,
        }
    }

    pub fn as_attacker(&self) -> Attacker {
        Attacker {
            role: AttackerRole::Ally,
            level: self.level,
            atk: self.atk,
            mag: self.mag,
        }
    }

    pub fn as_defender(&self) -> Defender {
        Defender {
            def: self.def,
            mr: self.mr,
            max_hp: self.max_hp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Stats;

    fn create_test_foe(is_boss: bool) -> Foe {
        Foe {
            name: "Bog Lurker".to_string(),
            level: 4,
            max_hp: 80,
            current_hp: 80,
            atk: 12,
            def: 6,
            mr: 2,
            xp: 300,
            is_boss,
        }
    }

    #[test]
    fn test_foe_take_damage_saturates() {
        let mut foe = create_test_foe(false);
        foe.take_damage(30);
        assert_eq!(foe.current_hp, 50);
        foe.take_damage(100);
        assert_eq!(foe.current_hp, 0);
        assert!(!foe.is_alive());
    }

    #[test]
    fn test_foe_role_follows_boss_tag() {
        assert_eq!(create_test_foe(true).as_attacker().role, AttackerRole::Boss);
        assert_eq!(create_test_foe(false).as_attacker().role, AttackerRole::Enemy);
        assert_eq!(create_test_foe(false).as_defender().max_hp, 80);
    }

    #[test]
    fn test_pet_view_uses_pet_stats() {
        let pet = ActivePet {
            id: 1,
            name: "Bone Servant".to_string(),
            level: 1,
            stats: Stats::new(60, 9, 5, 0, 0),
            current_hp: 42,
        };
        let view = Combatant::pet(&pet);
        assert_eq!(view.kind, CombatantKind::Pet);
        assert_eq!(view.current_hp, 42);
        assert_eq!(view.max_hp, 60);
        assert_eq!(view.as_attacker().role, AttackerRole::Ally);
    }
}
