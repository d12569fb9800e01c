use super::types::{EquipmentSlot, Item};
use crate::data::Area;
use rand::seq::SliceRandom;
use rand::Rng;

pub fn roll_random_slot(rng: &mut impl Rng) -> EquipmentSlot {
    match rng.gen_range(0..8) {
        0 => EquipmentSlot::Head,
        1 => EquipmentSlot::Torso,
        2 => EquipmentSlot::Legs,
        3 => EquipmentSlot::Back,
        4 => EquipmentSlot::MainHand,
        5 => EquipmentSlot::Offhand,
        6 => EquipmentSlot::Ring1,
        7 => EquipmentSlot::Ring2,
        _ => unreachable!(),
    }
}

/// Whether a regular encounter in `area` may drop `item`.
pub fn droppable_in_area(item: &Item, area: &Area) -> bool {
    if item.is_boss_drop() {
        return false;
    }
    if area.allowed_item_levels.is_empty() {
        item.level <= area.max_item_level
    } else {
        area.allowed_item_levels.contains(&item.level)
    }
}

/// Picks a regular-encounter drop: a random slot, then a random eligible
/// item for that slot. `None` when the slot has nothing eligible here.
pub fn pick_enemy_drop<'a>(items: &'a [Item], area: &Area, rng: &mut impl Rng) -> Option<&'a Item> {
    let slot = roll_random_slot(rng);
    let candidates: Vec<&Item> = items
        .iter()
        .filter(|item| item.slot == slot && droppable_in_area(item, area))
        .collect();
    candidates.choose(rng).copied()
}

/// Picks one of a boss's candidate item ids uniformly and resolves it.
pub fn pick_boss_drop<'a>(
    drop_ids: &[u32],
    items: &'a [Item],
    rng: &mut impl Rng,
) -> Option<&'a Item> {
    let id = drop_ids.choose(rng)?;
    items.iter().find(|item| item.id == *id)
}

#[cfg(test)]
mod tests {
    use super::super::types::{Modifiers, Rarity};
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn item(id: u32, slot: EquipmentSlot, level: u32) -> Item {
        Item {
            id,
            name: format!("Item {}", id),
            slot,
            level,
            rarity: Rarity::Common,
            modifiers: Modifiers::new(),
        }
    }

    fn area(allowed: Vec<u32>, max_item_level: u32) -> Area {
        Area {
            id: "meadow".to_string(),
            name: "Meadow".to_string(),
            recommended_level: 1,
            max_level: 10,
            max_item_level,
            description: String::new(),
            allowed_item_levels: allowed,
        }
    }

    #[test]
    fn test_roll_random_slot_covers_all_slots() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(roll_random_slot(&mut rng));
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_droppable_respects_whitelist_and_boss_ids() {
        let a = area(vec![1, 3], 10);
        assert!(droppable_in_area(&item(1, EquipmentSlot::Head, 1), &a));
        assert!(!droppable_in_area(&item(2, EquipmentSlot::Head, 2), &a));
        assert!(!droppable_in_area(&item(5001, EquipmentSlot::Head, 3), &a));
    }

    #[test]
    fn test_empty_whitelist_falls_back_to_max_item_level() {
        let a = area(vec![], 4);
        assert!(droppable_in_area(&item(1, EquipmentSlot::Back, 4), &a));
        assert!(!droppable_in_area(&item(2, EquipmentSlot::Back, 5), &a));
    }

    #[test]
    fn test_enemy_drop_matches_rolled_slot_and_area() {
        let items: Vec<Item> = EquipmentSlot::ALL
            .iter()
            .enumerate()
            .flat_map(|(i, &slot)| {
                vec![
                    item(i as u32 * 10 + 1, slot, 1),
                    item(i as u32 * 10 + 2, slot, 9),
                    item(5000 + i as u32, slot, 1),
                ]
            })
            .collect();
        let a = area(vec![1], 10);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let drop = pick_enemy_drop(&items, &a, &mut rng).unwrap();
            assert_eq!(drop.level, 1);
            assert!(!drop.is_boss_drop());
        }
    }

    #[test]
    fn test_enemy_drop_none_when_nothing_eligible() {
        let items = vec![item(1, EquipmentSlot::Head, 50)];
        let a = area(vec![1], 10);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            assert!(pick_enemy_drop(&items, &a, &mut rng).is_none());
        }
    }

    #[test]
    fn test_boss_drop_is_one_of_candidates() {
        let items = vec![
            item(5001, EquipmentSlot::Head, 5),
            item(5002, EquipmentSlot::Torso, 5),
            item(5003, EquipmentSlot::MainHand, 5),
            item(7, EquipmentSlot::Head, 5),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            let drop = pick_boss_drop(&[5001, 5002, 5003], &items, &mut rng).unwrap();
            seen.insert(drop.id);
        }
        assert_eq!(seen.len(), 3);
        assert!(!seen.contains(&7));
    }

    #[test]
    fn test_boss_drop_unknown_id_or_empty() {
        let items = vec![item(5001, EquipmentSlot::Head, 5)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(pick_boss_drop(&[9999], &items, &mut rng).is_none());
        assert!(pick_boss_drop(&[], &items, &mut rng).is_none());
    }
}
