use super::equipment::Equipment;
use super::types::{Item, Stat};
use crate::character::Class;
use crate::core::constants::{
    CASTER_WEIGHT_ATK, CASTER_WEIGHT_MAG, MELEE_WEIGHT_ATK, MELEE_WEIGHT_MAG, SCORE_PER_ITEM_LEVEL,
    WEIGHT_DEF,
};

/// Per-stat weights used when comparing items for a class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatWeights {
    pub atk: f64,
    pub def: f64,
    pub mag: f64,
}

impl StatWeights {
    pub fn for_class(class: Class) -> Self {
        if class.is_caster() {
            Self {
                atk: CASTER_WEIGHT_ATK,
                def: WEIGHT_DEF,
                mag: CASTER_WEIGHT_MAG,
            }
        } else {
            Self {
                atk: MELEE_WEIGHT_ATK,
                def: WEIGHT_DEF,
                mag: MELEE_WEIGHT_MAG,
            }
        }
    }
}

/// `(level * 10 + weighted modifiers) * rarity multiplier`. MR does not score.
pub fn score_item(item: &Item, class: Class) -> f64 {
    let weights = StatWeights::for_class(class);
    let baseline = item.level as f64 * SCORE_PER_ITEM_LEVEL;
    let modifier_sum = item.modifier(Stat::Atk) as f64 * weights.atk
        + item.modifier(Stat::Def) as f64 * weights.def
        + item.modifier(Stat::Mag) as f64 * weights.mag;

    (baseline + modifier_sum) * item.rarity.multiplier()
}

/// Equips `item` in its own slot if it strictly outscores what is there.
pub fn auto_equip_if_better(item: Item, equipment: &mut Equipment, class: Class) -> bool {
    let new_score = score_item(&item, class);
    let current_score = equipment
        .get(item.slot)
        .as_ref()
        .map(|current| score_item(current, class))
        .unwrap_or(0.0);

    if new_score > current_score {
        equipment.set(item.slot, Some(item));
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::{EquipmentSlot, Modifiers, Rarity};
    use super::*;

    fn create_test_item(level: u32, rarity: Rarity, mods: &[(Stat, i32)]) -> Item {
        Item {
            id: 10,
            name: "Test Helm".to_string(),
            slot: EquipmentSlot::Head,
            level,
            rarity,
            modifiers: mods.iter().copied().collect::<Modifiers>(),
        }
    }

    #[test]
    fn test_score_melee_weights() {
        let item = create_test_item(2, Rarity::Common, &[(Stat::Atk, 5), (Stat::Def, 5), (Stat::Mag, 4)]);
        // 20 + 5*1.0 + 5*0.8 + 4*0.5
        assert!((score_item(&item, Class::Warrior) - 31.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_caster_weights() {
        let item = create_test_item(2, Rarity::Common, &[(Stat::Atk, 5), (Stat::Def, 5), (Stat::Mag, 4)]);
        // 20 + 5*0.5 + 5*0.8 + 4*1.0
        assert!((score_item(&item, Class::Wizard) - 30.5).abs() < 1e-9);
    }

    #[test]
    fn test_score_ignores_mr() {
        let plain = create_test_item(3, Rarity::Rare, &[]);
        let with_mr = create_test_item(3, Rarity::Rare, &[(Stat::Mr, 50)]);
        assert_eq!(score_item(&plain, Class::Cleric), score_item(&with_mr, Class::Cleric));
    }

    #[test]
    fn test_rarity_multiplies_score() {
        let common = create_test_item(5, Rarity::Common, &[(Stat::Atk, 10)]);
        let legendary = create_test_item(5, Rarity::Legendary, &[(Stat::Atk, 10)]);
        assert!((score_item(&legendary, Class::Rogue) - 2.0 * score_item(&common, Class::Rogue)).abs() < 1e-9);
    }

    #[test]
    fn test_equips_into_empty_slot() {
        let mut eq = Equipment::new();
        let item = create_test_item(1, Rarity::Common, &[]);
        assert!(auto_equip_if_better(item.clone(), &mut eq, Class::Warrior));
        assert_eq!(eq.head, Some(item));
    }

    #[test]
    fn test_never_replaces_with_worse_or_equal() {
        let mut eq = Equipment::new();
        let good = create_test_item(5, Rarity::Epic, &[(Stat::Atk, 10)]);
        let worse = create_test_item(4, Rarity::Common, &[(Stat::Atk, 10)]);
        assert!(auto_equip_if_better(good.clone(), &mut eq, Class::Warrior));
        assert!(!auto_equip_if_better(worse, &mut eq, Class::Warrior));
        assert!(!auto_equip_if_better(good.clone(), &mut eq, Class::Warrior));
        assert_eq!(eq.head, Some(good));
    }

    #[test]
    fn test_replaces_with_strictly_better() {
        let mut eq = Equipment::new();
        let old = create_test_item(2, Rarity::Common, &[]);
        let new = create_test_item(2, Rarity::Uncommon, &[]);
        auto_equip_if_better(old, &mut eq, Class::Monk);
        assert!(auto_equip_if_better(new.clone(), &mut eq, Class::Monk));
        assert_eq!(eq.head, Some(new));
    }
}
